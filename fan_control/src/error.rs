//! Error type of the control loop.

use fan_common::config::ConfigError;
use fan_common::hal::driver::HalError;
use thiserror::Error;

/// Anything that ends the loop other than a user interrupt.
#[derive(Error, Debug)]
pub enum ControlError {
    /// Sensor or actuator failure.
    #[error("HAL error: {0}")]
    Hal(#[from] HalError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Writing a frame to the terminal failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Forcing the shutdown speed or releasing the hardware failed.
    #[error("Cleanup failed: {0}")]
    Cleanup(HalError),
}

impl ControlError {
    /// `true` for a failed sensor read.
    pub fn is_sensor_failure(&self) -> bool {
        matches!(self, Self::Hal(HalError::SensorUnavailable(_)))
    }
}
