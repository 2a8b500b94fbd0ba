//! Single-value timelines.

use std::time::Duration;

use sweeping_ui::FrameTime;

use super::{Interpolator, lerp};

/// Lifecycle of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimelineStatus {
    /// Created but never started.
    #[default]
    Idle,
    /// Started and producing values.
    Running,
    /// Ran to its natural end.
    Finished,
    /// Stopped early; it will never produce another value.
    Cancelled,
}

/// What a timeline produced for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorFrame {
    /// The timeline is not running and produced nothing.
    Inactive,
    /// The timeline produced an intermediate value.
    Running(f32),
    /// The timeline produced its final value and is now finished.
    Finished(f32),
}

/// Interpolates one `f32` from `from` to `to` over a fixed duration.
///
/// The start time is taken from the first frame after [`start`](Self::start),
/// so a timeline started between frames begins at its initial value instead
/// of skipping ahead.
#[derive(Debug, Clone)]
pub struct ValueAnimator {
    from: f32,
    to: f32,
    duration: Duration,
    interpolator: Interpolator,
    status: TimelineStatus,
    started_at: Option<FrameTime>,
}

impl ValueAnimator {
    /// Creates an idle, linear timeline.
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            interpolator: Interpolator::Linear,
            status: TimelineStatus::Idle,
            started_at: None,
        }
    }

    /// Replaces the easing curve.
    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    /// Start value.
    pub fn from(&self) -> f32 {
        self.from
    }

    /// End value.
    pub fn to(&self) -> f32 {
        self.to
    }

    /// Total run time.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current status.
    pub fn status(&self) -> TimelineStatus {
        self.status
    }

    /// Returns `true` between [`start`](Self::start) and the end or a cancel.
    pub fn is_running(&self) -> bool {
        self.status == TimelineStatus::Running
    }

    /// Starts, or restarts, the timeline from `from`.
    pub fn start(&mut self) {
        self.status = TimelineStatus::Running;
        self.started_at = None;
    }

    /// Cancels a running timeline and returns `true`.
    ///
    /// Cancelling a timeline that is not running does nothing.
    pub fn cancel(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.status = TimelineStatus::Cancelled;
        true
    }

    /// The value `elapsed` after the start, ignoring the status.
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        if elapsed >= self.duration {
            return self.to;
        }
        let fraction = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        lerp(self.from, self.to, self.interpolator.interpolate(fraction))
    }

    /// Advances the timeline to `now`.
    ///
    /// The end is reported exactly once, as [`AnimatorFrame::Finished`] carrying
    /// `to`. Every later call returns [`AnimatorFrame::Inactive`].
    pub fn tick(&mut self, now: FrameTime) -> AnimatorFrame {
        if !self.is_running() {
            return AnimatorFrame::Inactive;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_since(started_at);
        if elapsed >= self.duration {
            self.status = TimelineStatus::Finished;
            AnimatorFrame::Finished(self.to)
        } else {
            AnimatorFrame::Running(self.value_at(elapsed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> FrameTime {
        FrameTime::from_millis(millis)
    }

    #[test]
    fn test_idle_timeline_is_inactive() {
        let mut animator = ValueAnimator::new(0.0, 1.0, Duration::from_millis(100));
        assert_eq!(animator.status(), TimelineStatus::Idle);
        assert_eq!(animator.tick(ms(50)), AnimatorFrame::Inactive);
    }

    #[test]
    fn test_start_time_is_first_frame() {
        let mut animator = ValueAnimator::new(0.0, 100.0, Duration::from_millis(500));
        animator.start();
        assert_eq!(animator.tick(ms(1000)), AnimatorFrame::Running(0.0));
        match animator.tick(ms(1250)) {
            AnimatorFrame::Running(value) => assert!((value - 50.0).abs() < 1e-3),
            other => panic!("unexpected frame {other:?}"),
        }
        assert_eq!(animator.tick(ms(1500)), AnimatorFrame::Finished(100.0));
        assert_eq!(animator.status(), TimelineStatus::Finished);
        assert_eq!(animator.tick(ms(1600)), AnimatorFrame::Inactive);
    }

    #[test]
    fn test_cancel_stops_without_finishing() {
        let mut animator = ValueAnimator::new(0.0, 1.0, Duration::from_millis(100));
        assert!(!animator.cancel());
        animator.start();
        animator.tick(ms(0));
        assert!(animator.cancel());
        assert_eq!(animator.status(), TimelineStatus::Cancelled);
        assert_eq!(animator.tick(ms(500)), AnimatorFrame::Inactive);
        assert!(!animator.cancel());
    }

    #[test]
    fn test_zero_duration_finishes_on_first_frame() {
        let mut animator = ValueAnimator::new(3.0, 7.0, Duration::ZERO);
        animator.start();
        assert_eq!(animator.tick(ms(10)), AnimatorFrame::Finished(7.0));
    }

    #[test]
    fn test_interpolator_shapes_values() {
        let animator = ValueAnimator::new(0.0, 360.0, Duration::from_millis(1000))
            .with_interpolator(Interpolator::DECELERATE);
        let value = animator.value_at(Duration::from_millis(500));
        assert!((value - 270.0).abs() < 1e-2);
        assert_eq!(animator.value_at(Duration::from_secs(5)), 360.0);
    }
}
