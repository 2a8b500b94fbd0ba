//! Frame-driven animation primitives.
//!
//! ## Usage
//!
//! Start a [`ValueAnimator`] or an [`IndeterminateLoop`], then feed it frame
//! times from the host's clock. Neither owns a thread or a timer; they only
//! compute values for the frame time they are given.

pub mod interpolator;
pub mod sequencer;
pub mod value_animator;

pub use interpolator::{Interpolator, lerp};
pub use sequencer::{ArcUpdate, IndeterminateLoop, LoopConfig, LoopFrame};
pub use value_animator::{AnimatorFrame, TimelineStatus, ValueAnimator};
