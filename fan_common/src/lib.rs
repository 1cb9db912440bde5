//! Fan Common Library
//!
//! Shared constants, configuration loading and hardware contracts used by
//! every crate of the fan controller workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Default operating band, timing and display constants
//! - [`config`] - `FanConfig`, validation and the `ConfigLoader` trait
//! - [`hal`] - Sensor/actuator traits, `DutyCycle`, `HalError`
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use fan_common::prelude::*;
//!
//! let config = FanConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(DutyCycle::MAX.percent(), 100);
//! ```

pub mod config;
pub mod consts;
pub mod hal;
pub mod prelude;
