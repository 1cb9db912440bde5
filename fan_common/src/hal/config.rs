//! Driver configuration sections.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ConfigError;
use crate::consts::{DEFAULT_PWM_CLASS_DIR, DEFAULT_PWM_FREQUENCY_HZ, DEFAULT_THERMAL_ZONE_PATH};

/// Temperature source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorConfig {
    /// File holding the temperature in millidegrees Celsius.
    pub path: PathBuf,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_THERMAL_ZONE_PATH),
        }
    }
}

impl SensorConfig {
    /// Validate the sensor section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "sensor path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sysfs PWM output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActuatorConfig {
    /// Sysfs PWM class directory (overridable for testing).
    pub class_dir: PathBuf,
    /// `pwmchipN` index.
    pub chip: u32,
    /// Channel index within the chip (`pwmM`).
    pub channel: u32,
    /// PWM frequency [Hz].
    pub frequency_hz: u32,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            class_dir: PathBuf::from(DEFAULT_PWM_CLASS_DIR),
            chip: 0,
            channel: 0,
            frequency_hz: DEFAULT_PWM_FREQUENCY_HZ,
        }
    }
}

impl ActuatorConfig {
    /// PWM period [ns].
    #[inline]
    pub fn period_ns(&self) -> u64 {
        1_000_000_000 / u64::from(self.frequency_hz.max(1))
    }

    /// Directory of the configured chip (`.../pwmchipN`).
    pub fn chip_dir(&self) -> PathBuf {
        self.class_dir.join(format!("pwmchip{}", self.chip))
    }

    /// Validate the actuator section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frequency_hz == 0 {
            return Err(ConfigError::ValidationError(
                "actuator frequency_hz cannot be zero".to_string(),
            ));
        }
        if self.frequency_hz > 1_000_000_000 {
            return Err(ConfigError::ValidationError(format!(
                "actuator frequency_hz ({}) exceeds 1 GHz",
                self.frequency_hz
            )));
        }
        Ok(())
    }
}

/// First-order thermal plant driven by the simulation driver.
///
/// Each sample advances the plant by one step:
/// `T += heat - (passive + cooling * duty) * (T - ambient)`,
/// where `heat` oscillates by `load_swing_c` over `load_period_steps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Ambient temperature [°C].
    pub ambient_c: f64,
    /// Temperature at start [°C].
    pub initial_c: f64,
    /// Mean heat input per step [°C].
    pub heat_c: f64,
    /// Amplitude of the heat-input swing per step [°C].
    pub load_swing_c: f64,
    /// Steps per full load swing.
    pub load_period_steps: u32,
    /// Passive loss coefficient per step.
    pub passive_loss: f64,
    /// Additional loss coefficient per step at 100% duty.
    pub fan_loss: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ambient_c: 22.0,
            initial_c: 40.0,
            heat_c: 1.5,
            load_swing_c: 0.5,
            load_period_steps: 24,
            passive_loss: 0.01,
            fan_loss: 0.08,
        }
    }
}

impl SimulationConfig {
    /// Validate the plant parameters.
    ///
    /// Every temperature and coefficient must be finite, the loss
    /// coefficients non-negative and their sum at most 1, otherwise the
    /// plant overshoots ambient on every step and diverges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("ambient_c", self.ambient_c),
            ("initial_c", self.initial_c),
            ("heat_c", self.heat_c),
            ("load_swing_c", self.load_swing_c),
            ("passive_loss", self.passive_loss),
            ("fan_loss", self.fan_loss),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::ValidationError(format!(
                "simulation {name} must be finite, got {value}"
            )));
        }
        if self.passive_loss < 0.0 || self.fan_loss < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "simulation loss coefficients must be non-negative (passive_loss={}, fan_loss={})",
                self.passive_loss, self.fan_loss
            )));
        }
        if self.passive_loss + self.fan_loss > 1.0 {
            return Err(ConfigError::ValidationError(format!(
                "simulation passive_loss + fan_loss ({}) exceeds 1",
                self.passive_loss + self.fan_loss
            )));
        }
        Ok(())
    }
}
