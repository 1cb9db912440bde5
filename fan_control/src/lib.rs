//! # Fan Control Library
//!
//! Closed-loop temperature-to-PWM controller. Every tick samples the
//! sensor, clamps the reading into the operating band, maps it linearly to a
//! duty cycle, records both values in fixed-width histories, drives the
//! fan and redraws the terminal.
//!
//! ## Loop
//!
//! ```text
//!  Running ──interrupt / fault──► ShuttingDown ──cleanup──► Terminated
//!     │                                │
//!     │ read → clamp → map → record    │ force shutdown speed,
//!     │ → actuate → render → sleep     │ settle, release hardware
//! ```
//!
//! The tick itself ([`cycle::Controller::tick`]) is pure: no I/O, no sleep.
//! I/O lives in [`cycle::CycleRunner`]; the shutdown guarantee lives in
//! [`safety::ActuatorGuard`].

pub mod cycle;
pub mod error;
pub mod history;
pub mod mapping;
pub mod render;
pub mod safety;
pub mod signal;
pub mod state;
pub mod terminal;
