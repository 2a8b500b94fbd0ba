//! # Density-Independent Pixels (Dp)
//!
//! This module provides the [`Dp`] type used for every size a host configures
//! in device-independent units, such as the stroke width of the progress arc.
//!
//! ## Scale Factor
//!
//! The conversion between dp and physical pixels is controlled by a global
//! scale factor stored in [`SCALE_FACTOR`]. Hosts set it once from the display
//! density with [`set_scale_factor`]; until then one dp equals one pixel.
//!
//! ## Usage
//!
//! ```
//! use sweeping_ui::Dp;
//!
//! let stroke = Dp(8.0);
//! let pixels = stroke.to_pixels_f32();
//! let back = Dp::from_pixels_f32(pixels);
//! assert_eq!(stroke, back);
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::Px;

/// Global scale factor for converting between density-independent pixels and
/// physical pixels.
///
/// The value is the number of physical pixels per dp:
/// - `1.0`: 1 dp = 1 pixel (baseline density)
/// - `2.0`: 1 dp = 2 pixels (high density)
/// - `0.75`: 1 dp = 0.75 pixels (low density)
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Updates the global scale factor.
///
/// Later conversions through [`Dp`] and [`Px`] observe the new value.
pub fn set_scale_factor(scale_factor: f64) {
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(1.0));
    *lock.write() = scale_factor;
}

pub(crate) fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// Density-independent pixels (dp).
///
/// `Dp` wraps a single `f64` value that is converted to physical pixels using
/// the global [`SCALE_FACTOR`] when a pixel-precise measurement is needed.
///
/// ```
/// use sweeping_ui::Dp;
///
/// let base_size = Dp(16.0);
/// let double_size = Dp(base_size.0 * 2.0);
/// assert_eq!(double_size, Dp(32.0));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Zero dp.
    pub const ZERO: Self = Dp(0.0);

    /// Creates a new `Dp` instance with the specified value.
    ///
    /// ```
    /// use sweeping_ui::Dp;
    ///
    /// const STROKE_WIDTH: Dp = Dp::new(8.0);
    /// ```
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Converts this dp value to physical pixels as an `f64`.
    ///
    /// If the scale factor hasn't been initialized, defaults to 1.0.
    pub fn to_pixels_f64(&self) -> f64 {
        self.0 * scale_factor()
    }

    /// Creates a `Dp` value from physical pixels specified as an `f64`.
    pub fn from_pixels_f64(value: f64) -> Self {
        Dp(value / scale_factor())
    }

    /// Converts this dp value to physical pixels as an `f32`.
    ///
    /// This is the form handed to [`Paint`](crate::Paint) stroke widths and arc
    /// bounds, which are all `f32`.
    pub fn to_pixels_f32(&self) -> f32 {
        (self.0 * scale_factor()) as f32
    }

    /// Creates a `Dp` value from physical pixels specified as an `f32`.
    pub fn from_pixels_f32(value: f32) -> Self {
        Dp((value as f64) / scale_factor())
    }

    /// Converts this `Dp` value to a [`Px`] value, truncating towards zero.
    pub fn to_px(&self) -> Px {
        Px::from_f32(self.to_pixels_f32())
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp::new(value)
    }
}

impl From<Px> for Dp {
    fn from(px: Px) -> Self {
        px.to_dp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dp_default_scale_is_identity() {
        // The scale factor is never set in this test binary.
        assert_eq!(Dp(8.0).to_pixels_f32(), 8.0);
        assert_eq!(Dp::from_pixels_f64(24.0), Dp(24.0));
        assert_eq!(Dp(12.9).to_px(), Px(12));
    }

    #[test]
    fn test_dp_from_conversions() {
        let dp: Dp = 4.5.into();
        assert_eq!(dp, Dp(4.5));
        assert_eq!(Dp::from(Px(16)), Dp(16.0));
    }
}
