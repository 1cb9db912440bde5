//! Prelude module for common re-exports.
//!
//! ```rust
//! use fan_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    ConfigError, ConfigLoader, ControlConfig, DisplayConfig, FanConfig, LogLevel,
};
pub use crate::hal::config::{ActuatorConfig, SensorConfig, SimulationConfig};

// ─── HAL ────────────────────────────────────────────────────────────
pub use crate::hal::driver::{DriverFactory, FanActuator, FanDriver, HalError, TemperatureSensor};
pub use crate::hal::types::DutyCycle;
