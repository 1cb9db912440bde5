//! Linux sysfs backend.
//!
//! Reads the CPU temperature from a thermal zone and drives the fan through
//! the kernel's sysfs PWM interface.

mod pwm;
mod thermal_zone;

pub use pwm::SysfsPwmActuator;
pub use thermal_zone::{ThermalZoneSensor, parse_millidegrees};

use fan_common::config::FanConfig;
use fan_common::hal::driver::{FanDriver, HalError};

/// Registry name of this backend.
pub const DRIVER_NAME: &str = "sysfs";

/// Build a thermal zone sensor and a sysfs PWM actuator from configuration.
pub fn create_driver(config: &FanConfig) -> Result<FanDriver, HalError> {
    config
        .actuator
        .validate()
        .map_err(|e| HalError::ConfigError(e.to_string()))?;

    Ok(FanDriver {
        sensor: Box::new(ThermalZoneSensor::new(&config.sensor.path)),
        actuator: Box::new(SysfsPwmActuator::new(&config.actuator)),
    })
}
