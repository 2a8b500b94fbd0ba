//! Sweeping circle progress indicator.
//!
//! ## Usage
//!
//! Show either a bounded progress value as an arc that sweeps towards it, or,
//! when the amount of remaining work is unknown, a continuously chasing arc.
//!
//! ```
//! use sweeping_components::progress::{CircularProgressArgs, SweepingCircleProgress};
//! use sweeping_ui::FrameTime;
//!
//! let indicator = SweepingCircleProgress::new(CircularProgressArgs::default().progress(25.0));
//! indicator.start_animation();
//! indicator.tick(FrameTime::from_millis(0));
//! indicator.tick(FrameTime::from_millis(500));
//! assert_eq!(indicator.actual_progress(), 25.0);
//! ```

pub mod attributes;
pub mod controller;
pub mod geometry;
pub mod listener;

use std::time::Duration;

use derive_setters::Setters;
use sweeping_ui::{Color, Dp, StrokeCap};

pub use attributes::{AttributeError, AttributeSet};
pub use controller::{ArcGeometry, ProgressSnapshot, SweepingCircleProgress, build_arc_command};
pub use geometry::{ArcLayout, Padding, measure_equilateral, measure_with_padding};
pub use listener::{ListenerRegistry, ProgressCallbacks, ProgressEvent, ProgressListener};

/// Default values for the sweeping circle progress indicator.
pub struct ProgressIndicatorDefaults;

impl ProgressIndicatorDefaults {
    /// Default stroke color.
    pub const COLOR: Color = Color::BLACK;
    /// Default scale denominator.
    pub const MAX_PROGRESS: f32 = 100.0;
    /// Default arc thickness.
    pub const STROKE_WIDTH: Dp = Dp(8.0);
    /// Start angle the determinate rotation begins from.
    pub const INIT_ANGLE: f32 = 0.0;
    /// Smallest sweep of the indeterminate arc, in degrees.
    pub const INDETERMINATE_MIN_SWEEP: f32 = 15.0;
    /// Number of phases in one indeterminate cycle.
    pub const INDETERMINATE_PHASES: u32 = 3;
    /// Nominal length of one indeterminate cycle.
    pub const INDETERMINATE_DURATION: Duration = Duration::from_millis(4000);
    /// Length of the determinate baseline rotation.
    pub const ROTATION_DURATION: Duration = Duration::from_millis(5000);
    /// Deceleration factor of the determinate baseline rotation.
    pub const ROTATION_DECELERATION: f32 = 2.0;
    /// Length of one progress sync.
    pub const SYNC_DURATION: Duration = Duration::from_millis(500);
}

/// Arguments for configuring a [`SweepingCircleProgress`].
///
/// Everything here is fixed once the indicator is built, except `progress` and
/// `is_indeterminate`, which only provide initial values.
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct CircularProgressArgs {
    /// Stroke color of the arc.
    pub progress_color: Color,

    /// Initial current progress.
    pub progress: f32,

    /// Value that corresponds to a full circle.
    pub max_progress: f32,

    /// Arc thickness.
    pub stroke_width: Dp,

    /// Initial mode.
    pub is_indeterminate: bool,

    /// Whether to start animating when attached to a host.
    ///
    /// When omitted, follows `is_indeterminate`.
    #[setters(strip_option)]
    pub autostart: Option<bool>,

    /// Space between the view's edges and the arc's stroke.
    pub padding: Padding,

    /// End cap of the arc's stroke.
    pub stroke_cap: StrokeCap,
}

impl Default for CircularProgressArgs {
    fn default() -> Self {
        Self {
            progress_color: ProgressIndicatorDefaults::COLOR,
            progress: 0.0,
            max_progress: ProgressIndicatorDefaults::MAX_PROGRESS,
            stroke_width: ProgressIndicatorDefaults::STROKE_WIDTH,
            is_indeterminate: false,
            autostart: None,
            padding: Padding::ZERO,
            stroke_cap: StrokeCap::Round,
        }
    }
}

impl CircularProgressArgs {
    /// The effective autostart flag.
    pub fn resolved_autostart(&self) -> bool {
        self.autostart.unwrap_or(self.is_indeterminate)
    }
}
