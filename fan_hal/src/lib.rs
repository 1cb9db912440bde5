//! # Fan HAL Library
//!
//! Drivers for the fan controller's two external collaborators: the
//! temperature source and the PWM output. Drivers implement the
//! `TemperatureSensor` / `FanActuator` traits defined in
//! `fan_common::hal::driver` and are built by name through a
//! [`DriverRegistry`].
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Named driver factories
//! - [`drivers`] - Driver implementations (`sysfs`, `simulation`)
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      fan_hal                               │
//! │  ┌──────────────────┐        ┌──────────────────────────┐  │
//! │  │  DriverRegistry  │──name─►│  DriverFactory           │  │
//! │  └──────────────────┘        └────────────┬─────────────┘  │
//! │                                           ▼                │
//! │                 FanDriver { sensor, actuator }             │
//! │            (thermal zone + sysfs PWM, or simulated plant)  │
//! └────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod driver_registry;
pub mod drivers;

// Re-export key types for convenience
pub use crate::driver_registry::DriverRegistry;
