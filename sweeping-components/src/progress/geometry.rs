//! Square measurement and arc bounds.
//!
//! The indicator always lays out as a square: it takes the lesser of the two
//! sizes its parent allows, fits the padded content square inside that, and
//! insets the arc by the stroke thickness so the stroke is never clipped.

use sweeping_ui::{ArcBounds, Constraint, Px, PxSize};

/// Space between the view's edges and its content.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Padding {
    /// Left edge.
    pub left: Px,
    /// Top edge.
    pub top: Px,
    /// Right edge.
    pub right: Px,
    /// Bottom edge.
    pub bottom: Px,
}

impl Padding {
    /// No padding.
    pub const ZERO: Self = Self {
        left: Px::ZERO,
        top: Px::ZERO,
        right: Px::ZERO,
        bottom: Px::ZERO,
    };

    /// Creates padding from its four edges.
    pub const fn new(left: Px, top: Px, right: Px, bottom: Px) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same padding on every edge.
    pub const fn uniform(value: Px) -> Self {
        Self::new(value, value, value, value)
    }

    /// Total of the left and right padding.
    pub fn horizontal(&self) -> Px {
        self.left.saturating_add(self.right)
    }

    /// Total of the top and bottom padding.
    pub fn vertical(&self) -> Px {
        self.top.saturating_add(self.bottom)
    }
}

/// Resolves `constraint` to a square whose side is the lesser of the two
/// axes. An unspecified axis counts as unbounded.
pub fn measure_equilateral(constraint: Constraint) -> PxSize {
    let side = constraint.width.resolve().min(constraint.height.resolve());
    PxSize::square(side)
}

/// Measures the indicator: a square content area plus `padding` on each axis.
///
/// ```
/// use sweeping_components::progress::{Padding, measure_with_padding};
/// use sweeping_ui::{Constraint, Px, PxSize};
///
/// let size = measure_with_padding(
///     Constraint::fixed(Px(200), Px(120)),
///     Padding::new(Px(10), Px(4), Px(10), Px(4)),
/// );
/// // The square is 120; without padding that leaves 100 wide and 112 tall,
/// // so the content is 100 and each axis gets its padding back.
/// assert_eq!(size, PxSize::new(Px(120), Px(108)));
/// ```
pub fn measure_with_padding(constraint: Constraint, padding: Padding) -> PxSize {
    let square = measure_equilateral(constraint);
    let x_pad = padding.horizontal();
    let y_pad = padding.vertical();
    let width = square.width.saturating_sub(x_pad);
    let height = square.height.saturating_sub(y_pad);
    let size = width.min(height);
    PxSize::new(size.saturating_add(x_pad), size.saturating_add(y_pad))
}

/// Layout resolved for the current view size.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ArcLayout {
    /// Side of the square the view occupies.
    pub size: Px,
    /// Oval the arc is drawn on.
    pub bounds: ArcBounds,
}

impl ArcLayout {
    /// Computes the layout for a view of `view_size`.
    ///
    /// The square side is the lesser of the view's width and height. The arc
    /// bounds are that square minus `padding`, inset by `thickness` on every
    /// side.
    pub fn new(view_size: PxSize, padding: Padding, thickness: f32) -> Self {
        let size = view_size.min_side();
        let side = size.to_f32();
        let bounds = ArcBounds::new(
            padding.left.to_f32() + thickness,
            padding.top.to_f32() + thickness,
            side - padding.right.to_f32() - thickness,
            side - padding.bottom.to_f32() - thickness,
        );
        Self { size, bounds }
    }
}

#[cfg(test)]
mod tests {
    use sweeping_ui::DimensionValue;

    use super::*;

    #[test]
    fn test_equilateral_takes_lesser_side() {
        let size = measure_equilateral(Constraint::fixed(Px(300), Px(180)));
        assert_eq!(size, PxSize::square(Px(180)));

        let size = measure_equilateral(Constraint::new(
            DimensionValue::AtMost(Px(90)),
            DimensionValue::Fixed(Px(400)),
        ));
        assert_eq!(size, PxSize::square(Px(90)));
    }

    #[test]
    fn test_unspecified_axis_is_unbounded() {
        let size = measure_equilateral(Constraint::new(
            DimensionValue::Unspecified,
            DimensionValue::Fixed(Px(64)),
        ));
        assert_eq!(size, PxSize::square(Px(64)));

        let size = measure_equilateral(Constraint::UNSPECIFIED);
        assert_eq!(size, PxSize::square(Px::MAX));
    }

    #[test]
    fn test_padding_is_added_back_per_axis() {
        let padding = Padding::new(Px(4), Px(10), Px(4), Px(10));
        let size = measure_with_padding(Constraint::fixed(Px(100), Px(100)), padding);
        // Width leaves 92, height leaves 80; the square content is 80.
        assert_eq!(size, PxSize::new(Px(88), Px(100)));
    }

    #[test]
    fn test_unbounded_measure_saturates() {
        let size = measure_with_padding(Constraint::UNSPECIFIED, Padding::uniform(Px(2)));
        assert_eq!(size, PxSize::square(Px::MAX));
    }

    #[test]
    fn test_arc_bounds_are_inset_by_thickness() {
        let layout = ArcLayout::new(PxSize::new(Px(100), Px(120)), Padding::ZERO, 8.0);
        assert_eq!(layout.size, Px(100));
        assert_eq!(layout.bounds, ArcBounds::new(8.0, 8.0, 92.0, 92.0));

        let layout = ArcLayout::new(PxSize::square(Px(100)), Padding::uniform(Px(6)), 4.0);
        assert_eq!(layout.bounds, ArcBounds::new(10.0, 10.0, 90.0, 90.0));
    }
}
