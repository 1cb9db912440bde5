//! HAL value types.

use std::fmt;

/// PWM duty cycle in whole percent, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DutyCycle(u8);

impl DutyCycle {
    /// Fan stopped.
    pub const OFF: Self = Self(0);
    /// Fan at full speed.
    pub const MAX: Self = Self(100);

    /// Create a duty cycle, rejecting values above 100.
    #[inline]
    pub const fn new(percent: u8) -> Option<Self> {
        if percent <= 100 {
            Some(Self(percent))
        } else {
            None
        }
    }

    /// Create a duty cycle, saturating into `0..=100`.
    #[inline]
    pub const fn saturating(percent: i64) -> Self {
        if percent <= 0 {
            Self::OFF
        } else if percent >= 100 {
            Self::MAX
        } else {
            Self(percent as u8)
        }
    }

    /// Percentage value.
    #[inline]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Fraction in `[0, 1]`.
    #[inline]
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for DutyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_above_hundred() {
        assert_eq!(DutyCycle::new(100), Some(DutyCycle::MAX));
        assert_eq!(DutyCycle::new(0), Some(DutyCycle::OFF));
        assert_eq!(DutyCycle::new(101), None);
    }

    #[test]
    fn saturating_clamps_both_ends() {
        assert_eq!(DutyCycle::saturating(-20), DutyCycle::OFF);
        assert_eq!(DutyCycle::saturating(250), DutyCycle::MAX);
        assert_eq!(DutyCycle::saturating(42).percent(), 42);
    }

    #[test]
    fn display_and_fraction() {
        let duty = DutyCycle::saturating(25);
        assert_eq!(duty.to_string(), "25%");
        assert!((duty.fraction() - 0.25).abs() < f64::EPSILON);
    }
}
