//! Host-side primitives for the sweeping circle progress indicator.
//!
//! This crate knows nothing about progress. It provides the vocabulary a view
//! and its host share:
//!
//! - units: [`Dp`], [`Px`], [`PxSize`] and [`Color`]
//! - measurement: [`Constraint`] and [`DimensionValue`]
//! - time: [`FrameClock`] and [`FrameTime`]
//! - drawing: the [`Canvas`] trait and [`RecordingCanvas`]
//! - lifecycle: the [`HostView`] trait, [`Visibility`] and [`HeadlessHost`]
//!
//! # Driving a view
//!
//! ```
//! use std::{sync::Arc, time::Duration};
//!
//! use sweeping_ui::{
//!     Canvas, Constraint, FrameClock, HeadlessHost, HostView, Px, PxSize, RedrawRequest,
//! };
//!
//! struct Dot {
//!     redraw: RedrawRequest,
//! }
//!
//! impl HostView for Dot {
//!     fn on_measure(&self, _constraint: Constraint) -> PxSize {
//!         PxSize::square(Px(4))
//!     }
//!
//!     fn on_attached(&self) {
//!         self.redraw.request();
//!     }
//!
//!     fn take_redraw_request(&self) -> bool {
//!         self.redraw.take()
//!     }
//! }
//!
//! let mut host = HeadlessHost::new(
//!     Arc::new(Dot { redraw: RedrawRequest::new() }),
//!     FrameClock::manual(),
//! );
//! host.layout(Constraint::UNSPECIFIED);
//! host.attach();
//! assert!(host.frame(Duration::from_millis(16)).is_some());
//! assert!(host.frame(Duration::from_millis(16)).is_none());
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod color;
pub mod constraint;
pub mod dp;
pub mod entry_point;
pub mod frame;
pub mod host;
pub mod invalidate;
pub mod px;
pub mod renderer;

pub use crate::{
    color::Color,
    constraint::{Constraint, DimensionValue},
    dp::Dp,
    frame::{FRAME_INTERVAL, FrameClock, FrameTime},
    host::{HeadlessHost, HostView, Visibility},
    invalidate::RedrawRequest,
    px::{Px, PxSize},
    renderer::{ArcBounds, Canvas, DrawCommand, Paint, PaintStyle, RecordingCanvas, StrokeCap},
};
