//! Arc drawing for circular progress indicators.
//!
//! ## Usage
//!
//! Build a [`ProgressArcCommand`] per frame and either replay it on a canvas or
//! batch it into [`ArcInstance`]s.

pub mod command;
pub mod pipeline;

pub use command::ProgressArcCommand;
pub use pipeline::{ArcBatch, ArcInstance};
