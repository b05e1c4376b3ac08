//! Time management utilities
//!
//! Animation playback is driven by an externally supplied frame delta; the
//! engine keeps no internal clock. `AnimationTime` is a signed duration in
//! seconds so a negative playback rate can rewind through zero.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A signed animation duration in seconds
///
/// Supports the arithmetic needed by playback bookkeeping, plus modulo-style
/// wrapping against an animation length for looping playback.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, serde::Serialize, serde::Deserialize)]
pub struct AnimationTime(f32);

impl AnimationTime {
    /// The zero duration
    pub const ZERO: Self = Self(0.0);

    /// Create a duration from seconds
    pub const fn from_seconds(seconds: f32) -> Self {
        Self(seconds)
    }

    /// The duration in seconds
    pub const fn as_seconds(self) -> f32 {
        self.0
    }

    /// Check whether the duration is negative
    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }

    /// The larger of two durations
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }

    /// The smaller of two durations
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Wrap this time into `[0, max]` by repeated subtraction
    ///
    /// Used to reduce an elapsed time to a valid looping playback position.
    /// A non-positive `max` yields zero. The result is never negative.
    pub fn wrap(self, max: Self) -> Self {
        if max.0 <= 0.0 {
            return Self::ZERO;
        }
        let mut time = self;
        while time > max {
            time -= max;
        }
        debug_assert!(time >= Self::ZERO);
        debug_assert!(time <= max);
        time
    }
}

impl Add for AnimationTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for AnimationTime {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for AnimationTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for AnimationTime {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul<f32> for AnimationTime {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self(self.0 * rhs)
    }
}

impl Div for AnimationTime {
    type Output = f32;

    fn div(self, rhs: Self) -> f32 {
        self.0 / rhs.0
    }
}

impl Neg for AnimationTime {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_within_range() {
        let time = AnimationTime::from_seconds(0.4);
        let max = AnimationTime::from_seconds(1.0);
        assert_eq!(time.wrap(max), time);
    }

    #[test]
    fn test_wrap_reduces_by_repeated_subtraction() {
        let time = AnimationTime::from_seconds(2.5);
        let max = AnimationTime::from_seconds(1.0);
        assert_relative_eq!(time.wrap(max).as_seconds(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_wrap_at_exact_boundary_keeps_length() {
        let time = AnimationTime::from_seconds(1.0);
        let max = AnimationTime::from_seconds(1.0);
        assert_relative_eq!(time.wrap(max).as_seconds(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_wrap_zero_length_is_zero() {
        let time = AnimationTime::from_seconds(3.0);
        assert_eq!(time.wrap(AnimationTime::ZERO), AnimationTime::ZERO);
    }

    #[test]
    fn test_scaled_arithmetic() {
        let mut time = AnimationTime::from_seconds(1.0);
        time += AnimationTime::from_seconds(0.5) * 2.0;
        assert_relative_eq!(time.as_seconds(), 2.0, epsilon = 1e-6);
        assert!((-time).is_negative());
    }
}
