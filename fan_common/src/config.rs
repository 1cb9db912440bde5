//! Configuration loading traits and types.
//!
//! The control core never reads a file: it receives an immutable
//! [`FanConfig`] at construction. Every field defaults to the fixed
//! constants in [`crate::consts`], so `FanConfig::default()` is the complete
//! stock behaviour and a TOML file only ever overrides it.
//!
//! # Usage
//!
//! ```rust,no_run
//! use fan_common::config::{ConfigLoader, FanConfig, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = FanConfig::load(Path::new("fan.toml"))?;
//!     config.validate()?;
//!     println!("band: {}..{} °C", config.control.min_temp_c, config.control.max_temp_c);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::consts::{
    DEFAULT_GRAPH_HEIGHT, DEFAULT_GRAPH_WIDTH, DEFAULT_INTERVAL_MS, DEFAULT_MAX_SPEED,
    DEFAULT_MAX_TEMP_C, DEFAULT_MIN_SPEED, DEFAULT_MIN_TEMP_C, DEFAULT_SETTLE_MS,
    DEFAULT_SHUTDOWN_SPEED,
};
use crate::hal::config::{ActuatorConfig, SensorConfig, SimulationConfig};

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Per-tick readings and driver writes.
    Debug,
    /// Lifecycle events.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

// ─── Control ────────────────────────────────────────────────────────

/// Operating band and loop timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlConfig {
    /// Temperature mapped to `min_speed` [°C].
    pub min_temp_c: f64,
    /// Temperature mapped to `max_speed` [°C].
    pub max_temp_c: f64,
    /// Lowest derived speed [%].
    pub min_speed: u8,
    /// Highest derived speed [%].
    pub max_speed: u8,
    /// Speed forced on every exit path [%].
    pub shutdown_speed: u8,
    /// Loop period [ms].
    pub interval_ms: u64,
    /// Wait after forcing `shutdown_speed` before releasing hardware [ms].
    pub settle_ms: u64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            min_temp_c: DEFAULT_MIN_TEMP_C,
            max_temp_c: DEFAULT_MAX_TEMP_C,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            shutdown_speed: DEFAULT_SHUTDOWN_SPEED,
            interval_ms: DEFAULT_INTERVAL_MS,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

impl ControlConfig {
    /// Loop period as a `Duration`.
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Settle delay as a `Duration`.
    #[inline]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Validate the operating band.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - a temperature bound is not finite, or `min_temp_c >= max_temp_c`
    /// - `min_speed >= max_speed` or `max_speed > 100`
    /// - `shutdown_speed > 100`
    /// - `interval_ms == 0`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_temp_c.is_finite() || !self.max_temp_c.is_finite() {
            return Err(ConfigError::ValidationError(
                "control temperature bounds must be finite".to_string(),
            ));
        }
        if self.min_temp_c >= self.max_temp_c {
            return Err(ConfigError::ValidationError(format!(
                "min_temp_c ({}) must be below max_temp_c ({})",
                self.min_temp_c, self.max_temp_c
            )));
        }
        if self.min_speed >= self.max_speed {
            return Err(ConfigError::ValidationError(format!(
                "min_speed ({}) must be below max_speed ({})",
                self.min_speed, self.max_speed
            )));
        }
        if self.max_speed > 100 {
            return Err(ConfigError::ValidationError(format!(
                "max_speed ({}) exceeds 100%",
                self.max_speed
            )));
        }
        if self.shutdown_speed > 100 {
            return Err(ConfigError::ValidationError(format!(
                "shutdown_speed ({}) exceeds 100%",
                self.shutdown_speed
            )));
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "interval_ms cannot be zero".to_string(),
            ));
        }
        Ok(())
    }
}

// ─── Display ────────────────────────────────────────────────────────

/// Terminal display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Draw frames on stdout. When false, each tick is logged instead.
    pub enabled: bool,
    /// Emit ANSI colour sequences.
    pub color: bool,
    /// Graph columns; also the history capacity.
    pub graph_width: usize,
    /// Graph rows.
    pub graph_height: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: true,
            graph_width: DEFAULT_GRAPH_WIDTH,
            graph_height: DEFAULT_GRAPH_HEIGHT,
        }
    }
}

impl DisplayConfig {
    /// Validate the graph geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.graph_width == 0 {
            return Err(ConfigError::ValidationError(
                "graph_width must be at least 1".to_string(),
            ));
        }
        if self.graph_height < 2 {
            return Err(ConfigError::ValidationError(format!(
                "graph_height ({}) must be at least 2",
                self.graph_height
            )));
        }
        Ok(())
    }
}

// ─── Top level ──────────────────────────────────────────────────────

/// Complete controller configuration.
///
/// # TOML Example
///
/// ```toml
/// log_level = "debug"
///
/// [control]
/// max_temp_c = 80.0
/// interval_ms = 2000
///
/// [actuator]
/// chip = 0
/// channel = 1
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FanConfig {
    /// Logging verbosity when `RUST_LOG` is unset.
    pub log_level: LogLevel,
    /// Operating band and timing.
    pub control: ControlConfig,
    /// Terminal output.
    pub display: DisplayConfig,
    /// Temperature source.
    pub sensor: SensorConfig,
    /// PWM output.
    pub actuator: ActuatorConfig,
    /// Thermal plant used by the simulation driver.
    pub simulation: SimulationConfig,
}

impl FanConfig {
    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::ValidationError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.control.validate()?;
        self.display.validate()?;
        self.sensor.validate()?;
        self.actuator.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
///
/// Semantic validation is left to the caller.
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
        assert_eq!(LogLevel::Debug.as_str(), "debug");
    }

    #[test]
    fn test_log_level_deserialization() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct TestWrapper {
            level: LogLevel,
        }

        assert_eq!(
            toml::from_str::<TestWrapper>("level = \"warn\"")
                .unwrap()
                .level,
            LogLevel::Warn
        );
        assert!(toml::from_str::<TestWrapper>("level = \"loud\"").is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.control.interval(), Duration::from_secs(5));
        assert_eq!(config.control.settle(), Duration::from_secs(1));
    }

    #[test]
    fn test_inverted_temperature_band_rejected() {
        let mut config = FanConfig::default();
        config.control.min_temp_c = 75.0;
        config.control.max_temp_c = 75.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_speed_bounds_rejected() {
        let mut control = ControlConfig::default();
        control.max_speed = 101;
        assert!(control.validate().is_err());

        let mut control = ControlConfig::default();
        control.min_speed = 100;
        assert!(control.validate().is_err());

        let mut control = ControlConfig::default();
        control.shutdown_speed = 150;
        assert!(control.validate().is_err());
    }

    #[test]
    fn test_non_finite_band_rejected() {
        let mut control = ControlConfig::default();
        control.max_temp_c = f64::INFINITY;
        assert!(control.validate().is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut control = ControlConfig::default();
        control.interval_ms = 0;
        assert!(control.validate().is_err());
    }

    #[test]
    fn test_graph_geometry_rejected() {
        let mut display = DisplayConfig::default();
        display.graph_height = 1;
        assert!(display.validate().is_err());

        let mut display = DisplayConfig::default();
        display.graph_width = 0;
        assert!(display.validate().is_err());
    }

    #[test]
    fn test_config_loader_file_not_found() {
        let result = FanConfig::load(Path::new("/nonexistent/path/fan.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound)));
    }

    #[test]
    fn test_config_loader_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid toml {{{{").unwrap();

        let result = FanConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"log_level = "debug"

[control]
max_temp_c = 80.0
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = FanConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.control.max_temp_c, 80.0);
        assert_eq!(config.control.min_temp_c, DEFAULT_MIN_TEMP_C);
        assert_eq!(config.display, DisplayConfig::default());
    }
}
