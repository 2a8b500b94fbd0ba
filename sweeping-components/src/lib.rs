//! Sweeping circle progress indicator.
//!
//! # Usage
//!
//! Build a [`SweepingCircleProgress`](progress::SweepingCircleProgress) from
//! [`CircularProgressArgs`](progress::CircularProgressArgs), hand it to a host
//! as a [`HostView`](sweeping_ui::HostView), and change its progress or mode
//! from anywhere.
//!
//! # Example
//!
//! ```
//! use std::{sync::Arc, time::Duration};
//!
//! use sweeping_components::progress::{
//!     CircularProgressArgs, ProgressCallbacks, SweepingCircleProgress,
//! };
//! use sweeping_ui::{Constraint, FrameClock, HeadlessHost, Px};
//!
//! let indicator = Arc::new(SweepingCircleProgress::new(
//!     CircularProgressArgs::default().autostart(true),
//! ));
//! indicator.listen(Arc::new(
//!     ProgressCallbacks::new().with_progress_end(|progress| println!("done at {progress}")),
//! ));
//!
//! let mut host = HeadlessHost::new(indicator.clone(), FrameClock::manual());
//! host.layout(Constraint::fixed(Px(100), Px(100)));
//! host.attach();
//!
//! indicator.set_progress(50.0);
//! host.run_for(Duration::from_secs(1), Duration::from_millis(16));
//! assert_eq!(indicator.actual_progress(), 50.0);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod pipelines;
pub mod progress;
