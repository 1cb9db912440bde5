//! System-wide constants for the fan controller workspace.
//!
//! Single source of truth for the fixed operating band, loop timing and
//! display geometry. Every value here is the default of the matching
//! [`FanConfig`](crate::config::FanConfig) field.

use static_assertions::const_assert;

/// Temperature at and below which the fan runs at minimum speed [°C].
pub const DEFAULT_MIN_TEMP_C: f64 = 25.0;

/// Temperature at and above which the fan runs at maximum speed [°C].
pub const DEFAULT_MAX_TEMP_C: f64 = 75.0;

/// Minimum derived fan speed [% duty].
pub const DEFAULT_MIN_SPEED: u8 = 0;

/// Maximum derived fan speed [% duty].
pub const DEFAULT_MAX_SPEED: u8 = 100;

/// Speed forced on every shutdown path [% duty].
pub const DEFAULT_SHUTDOWN_SPEED: u8 = 100;

/// Control loop period [ms].
pub const DEFAULT_INTERVAL_MS: u64 = 5000;

/// Delay between forcing shutdown speed and releasing the PWM channel [ms].
pub const DEFAULT_SETTLE_MS: u64 = 1000;

/// Graph width in columns; also the capacity of each history buffer.
pub const DEFAULT_GRAPH_WIDTH: usize = 60;

/// Graph height in rows.
pub const DEFAULT_GRAPH_HEIGHT: usize = 10;

/// Kernel thermal zone exposing the CPU temperature in millidegrees.
pub const DEFAULT_THERMAL_ZONE_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";

/// Sysfs PWM class directory.
pub const DEFAULT_PWM_CLASS_DIR: &str = "/sys/class/pwm";

/// PWM frequency suitable for most 4-pin fans [Hz].
pub const DEFAULT_PWM_FREQUENCY_HZ: u32 = 100;

/// Thermal zones report millidegrees Celsius.
pub const MILLIDEGREES_PER_DEGREE: f64 = 1000.0;

const_assert!(DEFAULT_MIN_TEMP_C < DEFAULT_MAX_TEMP_C);
const_assert!(DEFAULT_MIN_SPEED < DEFAULT_MAX_SPEED);
const_assert!(DEFAULT_MAX_SPEED <= 100);
const_assert!(DEFAULT_SHUTDOWN_SPEED <= 100);
const_assert!(DEFAULT_GRAPH_HEIGHT >= 2);
const_assert!(DEFAULT_GRAPH_WIDTH >= 1);
