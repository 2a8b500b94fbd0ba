//! # Layout Constraints
//!
//! A host hands a view one [`DimensionValue`] per axis when asking it to
//! measure itself. The view answers with a concrete [`PxSize`](crate::PxSize).
//!
//! ## Dimension Types
//!
//! ### Fixed
//! The parent has decided the exact size:
//! ```
//! # use sweeping_ui::{DimensionValue, Px};
//! let exact = DimensionValue::Fixed(Px(100));
//! ```
//!
//! ### AtMost
//! The view may be as large as the given size, but no larger:
//! ```
//! # use sweeping_ui::{DimensionValue, Px};
//! let bounded = DimensionValue::AtMost(Px(300));
//! ```
//!
//! ### Unspecified
//! The parent imposes no bound at all, which measurement treats as
//! [`Px::MAX`](crate::Px::MAX):
//! ```
//! # use sweeping_ui::{DimensionValue, Px};
//! assert_eq!(DimensionValue::Unspecified.resolve(), Px::MAX);
//! ```

use crate::Px;

/// Defines how large a single axis (width or height) is allowed to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DimensionValue {
    /// The dimension is exactly this many pixels.
    Fixed(Px),
    /// The dimension may use up to this many pixels.
    AtMost(Px),
    /// The parent imposes no bound on this dimension.
    #[default]
    Unspecified,
}

impl DimensionValue {
    /// Zero-sized dimension, equivalent to `Fixed(Px(0))`.
    pub const ZERO: Self = DimensionValue::Fixed(Px(0));

    /// Resolves the dimension to the largest size it permits.
    ///
    /// Both `Fixed` and `AtMost` resolve to their size; `Unspecified` resolves
    /// to [`Px::MAX`] so that it never wins a `min` against a bounded axis.
    pub fn resolve(self) -> Px {
        match self {
            DimensionValue::Fixed(px) | DimensionValue::AtMost(px) => px,
            DimensionValue::Unspecified => Px::MAX,
        }
    }

    /// Returns `true` if the parent left this dimension unbounded.
    pub fn is_unspecified(self) -> bool {
        matches!(self, DimensionValue::Unspecified)
    }
}

/// Width and height constraints passed to a view during measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Constraint {
    /// Constraint on the horizontal axis.
    pub width: DimensionValue,
    /// Constraint on the vertical axis.
    pub height: DimensionValue,
}

impl Constraint {
    /// A constraint that leaves both axes unbounded.
    pub const UNSPECIFIED: Self = Self {
        width: DimensionValue::Unspecified,
        height: DimensionValue::Unspecified,
    };

    /// Creates a new constraint from per-axis dimension values.
    pub const fn new(width: DimensionValue, height: DimensionValue) -> Self {
        Self { width, height }
    }

    /// Creates a constraint with both axes fixed to the given sizes.
    pub const fn fixed(width: Px, height: Px) -> Self {
        Self {
            width: DimensionValue::Fixed(width),
            height: DimensionValue::Fixed(height),
        }
    }
}
