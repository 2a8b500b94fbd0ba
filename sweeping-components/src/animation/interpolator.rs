//! Easing curves.

/// Maps linear time progress in `[0.0, 1.0]` to eased value progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interpolator {
    /// Constant rate.
    #[default]
    Linear,
    /// Starts fast and slows down towards the end.
    ///
    /// The factor controls the strength: `1.0` gives `1 - (1 - t)^2`, larger
    /// factors give `1 - (1 - t)^(2 * factor)`.
    Decelerate(f32),
}

impl Interpolator {
    /// Decelerate curve with factor `1.0`.
    pub const DECELERATE: Self = Interpolator::Decelerate(1.0);

    /// Applies the curve. Input outside `[0.0, 1.0]` is clamped first.
    pub fn interpolate(self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Interpolator::Linear => t,
            Interpolator::Decelerate(factor) => {
                let remaining = 1.0 - t;
                if factor == 1.0 {
                    1.0 - remaining * remaining
                } else {
                    1.0 - remaining.powf(2.0 * factor)
                }
            }
        }
    }
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
