//! Linear range mapping and speed derivation.

use fan_common::config::ControlConfig;
use fan_common::hal::types::DutyCycle;

/// Closed interval `[low, high]` used as a scale. Requires `low < high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
}

impl ValueRange {
    /// Create a range.
    #[inline]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// `high - low`.
    #[inline]
    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    /// Clamp `value` into the range.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.low).min(self.high)
    }
}

/// Map `value` from `source` onto `target` by linear interpolation.
///
/// `target.span() * (value - source.low) / source.span() + target.low`.
/// Values outside `source` extrapolate; clamp first to stay inside `target`.
/// A zero-width `source` is a caller bug.
#[inline]
pub fn map(value: f64, source: ValueRange, target: ValueRange) -> f64 {
    debug_assert!(source.span() != 0.0, "degenerate source range {source:?}");
    target.span() * (value - source.low) / source.span() + target.low
}

/// Temperature band and speed band of a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedCurve {
    /// Operating temperature band [°C].
    pub temperature: ValueRange,
    /// Speed band [%].
    pub speed: ValueRange,
}

impl SpeedCurve {
    /// Curve from the control section of the configuration.
    pub fn from_config(control: &ControlConfig) -> Self {
        Self {
            temperature: ValueRange::new(control.min_temp_c, control.max_temp_c),
            speed: ValueRange::new(f64::from(control.min_speed), f64::from(control.max_speed)),
        }
    }

    /// Clamp a raw reading into the temperature band.
    #[inline]
    pub fn clamp(&self, raw_celsius: f64) -> f64 {
        self.temperature.clamp(raw_celsius)
    }

    /// Derive the duty cycle for a raw reading: clamp, map, truncate
    /// toward zero.
    #[inline]
    pub fn speed_for(&self, raw_celsius: f64) -> DutyCycle {
        let mapped = map(self.clamp(raw_celsius), self.temperature, self.speed);
        DutyCycle::saturating(mapped.trunc() as i64)
    }
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self::from_config(&ControlConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BAND: ValueRange = ValueRange::new(25.0, 75.0);
    const PERCENT: ValueRange = ValueRange::new(0.0, 100.0);

    #[test]
    fn band_ends_map_to_speed_ends() {
        assert_eq!(map(25.0, BAND, PERCENT), 0.0);
        assert_eq!(map(75.0, BAND, PERCENT), 100.0);
        assert_eq!(map(50.0, BAND, PERCENT), 50.0);
    }

    #[test]
    fn map_handles_offset_target() {
        let target = ValueRange::new(20.0, 60.0);
        assert_eq!(map(50.0, BAND, target), 40.0);
    }

    #[test]
    fn speed_for_reference_points() {
        let curve = SpeedCurve::default();
        assert_eq!(curve.speed_for(25.0).percent(), 0);
        assert_eq!(curve.speed_for(75.0).percent(), 100);
        assert_eq!(curve.speed_for(50.0).percent(), 50);
        assert_eq!(curve.speed_for(90.0).percent(), 100);
        assert_eq!(curve.speed_for(-40.0).percent(), 0);
    }

    #[test]
    fn speed_truncates_toward_zero() {
        let curve = SpeedCurve::default();
        // 100 * 0.99 / 50 = 1.98
        assert_eq!(curve.speed_for(25.99).percent(), 1);
        // 100 * 49.9 / 50 = 99.8
        assert_eq!(curve.speed_for(74.9).percent(), 99);
    }

    #[test]
    fn clamp_keeps_in_band_values() {
        assert_eq!(BAND.clamp(40.0), 40.0);
        assert_eq!(BAND.clamp(10.0), 25.0);
        assert_eq!(BAND.clamp(120.0), 75.0);
    }

    proptest! {
        #[test]
        fn map_is_monotonic_on_band(a in 25.0f64..=75.0, b in 25.0f64..=75.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(map(lo, BAND, PERCENT) <= map(hi, BAND, PERCENT));
        }

        #[test]
        fn speed_always_in_percent_range(t in -1.0e6f64..1.0e6) {
            let curve = SpeedCurve::default();
            let speed = curve.speed_for(t).percent();
            prop_assert!(speed <= 100);
            let expected = map(curve.clamp(t), BAND, PERCENT).trunc() as u8;
            prop_assert_eq!(speed, expected);
        }
    }
}
