//! Sensor/actuator traits and error types.
//!
//! This module defines:
//! - `TemperatureSensor` trait - Source of temperature samples
//! - `FanActuator` trait - PWM output accepting a duty cycle
//! - `FanDriver` struct - A sensor/actuator pair built by one backend
//! - `HalError` enum - Error types for HAL operations
//! - `DriverFactory` type alias - Factory function type

use crate::config::FanConfig;
use crate::hal::types::DutyCycle;
use thiserror::Error;

/// Error types for HAL operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HalError {
    /// Sensor missing or its content is not a number.
    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// Writing to the PWM output failed.
    #[error("Actuator fault: {0}")]
    ActuatorFault(String),

    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Source of temperature samples.
///
/// # Lifecycle
///
/// 1. `init()` - Acquire the underlying handle, once, before the loop
/// 2. `read_celsius()` - Once per tick
/// 3. `shutdown()` - Release the handle, once, on every exit path
pub trait TemperatureSensor: Send {
    /// Returns the sensor's identifier (e.g., "thermal_zone", "simulation").
    fn name(&self) -> &'static str;

    /// Acquire the underlying resource.
    ///
    /// # Errors
    /// Return `HalError::SensorUnavailable` if the source cannot be opened.
    fn init(&mut self) -> Result<(), HalError> {
        Ok(())
    }

    /// Read the current temperature in degrees Celsius.
    ///
    /// No retry is attempted; a failed read is returned to the caller.
    ///
    /// # Errors
    /// Return `HalError::SensorUnavailable` if the value cannot be read or
    /// is not a finite number.
    fn read_celsius(&mut self) -> Result<f64, HalError>;

    /// Release the underlying resource. Default: no-op.
    fn shutdown(&mut self) {}
}

/// PWM output driving the fan.
///
/// # Lifecycle
///
/// 1. `start()` - Claim and enable the output, once, before the loop
/// 2. `set_duty_cycle()` - Once per tick, and once more on shutdown
/// 3. `release()` - Hand the output back, once, on every exit path
pub trait FanActuator: Send {
    /// Returns the actuator's identifier (e.g., "sysfs_pwm", "simulation").
    fn name(&self) -> &'static str;

    /// Claim and enable the output.
    ///
    /// # Errors
    /// Return `HalError::InitFailed` if the output cannot be claimed.
    fn start(&mut self) -> Result<(), HalError>;

    /// Apply a duty cycle.
    ///
    /// # Errors
    /// Return `HalError::ActuatorFault` if the write fails.
    fn set_duty_cycle(&mut self, duty: DutyCycle) -> Result<(), HalError>;

    /// Release any hardware claim taken by `start()`.
    fn release(&mut self) -> Result<(), HalError>;
}

/// Sensor and actuator produced together by one backend.
pub struct FanDriver {
    /// Temperature source.
    pub sensor: Box<dyn TemperatureSensor>,
    /// PWM output.
    pub actuator: Box<dyn FanActuator>,
}

impl std::fmt::Debug for FanDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanDriver")
            .field("sensor", &self.sensor.name())
            .field("actuator", &self.actuator.name())
            .finish()
    }
}

/// Factory function type for building a backend from configuration.
pub type DriverFactory = fn(&FanConfig) -> Result<FanDriver, HalError>;

impl<T: TemperatureSensor + ?Sized> TemperatureSensor for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn init(&mut self) -> Result<(), HalError> {
        (**self).init()
    }

    fn read_celsius(&mut self) -> Result<f64, HalError> {
        (**self).read_celsius()
    }

    fn shutdown(&mut self) {
        (**self).shutdown()
    }
}

impl<T: FanActuator + ?Sized> FanActuator for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn start(&mut self) -> Result<(), HalError> {
        (**self).start()
    }

    fn set_duty_cycle(&mut self, duty: DutyCycle) -> Result<(), HalError> {
        (**self).set_duty_cycle(duty)
    }

    fn release(&mut self) -> Result<(), HalError> {
        (**self).release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSensor(f64);

    impl TemperatureSensor for FixedSensor {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn read_celsius(&mut self) -> Result<f64, HalError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_hal_error_display() {
        let err = HalError::SensorUnavailable("no such file".to_string());
        assert_eq!(err.to_string(), "Sensor unavailable: no such file");

        let err = HalError::DriverNotFound("ethercat".to_string());
        assert!(err.to_string().contains("ethercat"));
    }

    #[test]
    fn test_boxed_sensor_delegates() {
        let mut sensor: Box<dyn TemperatureSensor> = Box::new(FixedSensor(42.5));
        assert!(sensor.init().is_ok());
        assert_eq!(sensor.name(), "fixed");
        assert_eq!(sensor.read_celsius(), Ok(42.5));
    }
}
