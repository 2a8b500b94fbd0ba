//! Physical pixels.
//!
//! Layout works in whole device pixels. [`Px`] is signed so padding
//! arithmetic can dip below zero; the `saturating_*` helpers keep unbounded
//! measurements ([`Px::MAX`]) from overflowing.
//!
//! ```
//! use sweeping_ui::{Px, PxSize};
//!
//! let size = PxSize::new(Px(300), Px(200));
//! assert_eq!(size.min_side(), Px(200));
//! assert_eq!(Px::MAX.saturating_add(Px(8)), Px::MAX);
//! ```

use std::ops::{Add, Sub};

use crate::dp::{Dp, scale_factor};

/// A length in physical pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// The largest length. Unspecified dimensions resolve to this.
    pub const MAX: Self = Self(i32::MAX);

    /// The wrapped pixel count.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Wraps `value`.
    pub const fn new(value: i32) -> Self {
        Px(value)
    }

    /// Converts to density-independent pixels.
    pub fn to_dp(self) -> Dp {
        Dp(f64::from(self.0) / scale_factor())
    }

    /// The length as `f32`, for drawing.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Truncates `value` towards zero. Out-of-range values saturate.
    pub fn from_f32(value: f32) -> Self {
        Px(value as i32)
    }

    /// Addition clamped to the `i32` range.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Px(self.0.saturating_add(rhs.0))
    }

    /// Subtraction clamped to the `i32` range.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Px(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Px(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Px(self.0 - rhs.0)
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value)
    }
}

/// Width and height in physical pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxSize {
    /// Horizontal extent.
    pub width: Px,
    /// Vertical extent.
    pub height: Px,
}

impl PxSize {
    /// `0 x 0`.
    pub const ZERO: Self = Self::square(Px::ZERO);

    /// Creates a size.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }

    /// A size with both sides equal to `side`.
    pub const fn square(side: Px) -> Self {
        Self::new(side, side)
    }

    /// The shorter side.
    pub fn min_side(self) -> Px {
        self.width.min(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_arithmetic() {
        assert_eq!(Px(100) - Px(16) + Px(4), Px(88));
        assert_eq!(Px(6) - Px(10), Px(-4));
        assert_eq!(Px::from(7).raw(), 7);
    }

    #[test]
    fn test_unbounded_lengths_saturate() {
        assert_eq!(Px::MAX.saturating_add(Px(1)), Px::MAX);
        assert_eq!(Px(i32::MIN).saturating_sub(Px(1)), Px(i32::MIN));
        assert_eq!(Px::MAX.saturating_sub(Px(10)).saturating_add(Px(10)), Px::MAX);
    }

    #[test]
    fn test_float_conversions_truncate() {
        assert_eq!(Px::from_f32(8.9), Px(8));
        assert_eq!(Px::from_f32(-3.5), Px(-3));
        assert_eq!(Px::from_f32(f32::MAX), Px::MAX);
        assert_eq!(Px(12).to_f32(), 12.0);
    }

    #[test]
    fn test_px_size_min_side() {
        assert_eq!(PxSize::new(Px(120), Px(80)).min_side(), Px(80));
        assert_eq!(PxSize::square(Px(64)).min_side(), Px(64));
        assert_eq!(PxSize::ZERO, PxSize::new(Px(0), Px(0)));
    }
}
