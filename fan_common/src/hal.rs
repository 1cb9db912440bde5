//! Hardware abstraction contracts.
//!
//! This module contains the traits, value types and configuration shared
//! by the driver crate and the control loop.

pub mod config;
pub mod driver;
pub mod types;
