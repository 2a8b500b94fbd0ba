//! The indeterminate "chasing arc" loop.
//!
//! One cycle is an ordered list of [`Phase`]s. Each phase runs two half-steps
//! back to back, and each half-step runs two timelines concurrently:
//!
//! 1. front extend + primary rotate: the sweep grows from the minimum to the
//!    maximum while the rotation offset advances;
//! 2. back retract + secondary rotate: the start angle moves forward by the
//!    same amount the sweep grew, so the trailing edge chases the leading edge
//!    back down to the minimum sweep.
//!
//! Phase `k + 1` starts only when phase `k` has completed, and the sweep never
//! leaves `[min_sweep, max_sweep]`.

use std::time::Duration;

use smallvec::SmallVec;
use sweeping_ui::FrameTime;

use super::{Interpolator, TimelineStatus, ValueAnimator};

/// Shape and timing of the indeterminate loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopConfig {
    /// Number of phases in one cycle.
    pub phases: u32,
    /// Smallest sweep, in degrees.
    pub min_sweep: f32,
    /// Nominal length of one cycle.
    pub duration: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            phases: 3,
            min_sweep: 15.0,
            duration: Duration::from_millis(4000),
        }
    }
}

impl LoopConfig {
    /// Largest sweep, in degrees: `360 * (phases - 1) / phases + min_sweep`.
    pub fn max_sweep(&self) -> f32 {
        let phases = self.phases.max(1) as f32;
        360.0 * (phases - 1.0) / phases + self.min_sweep
    }

    /// Length of one half-step, in whole milliseconds.
    pub fn half_step_duration(&self) -> Duration {
        let millis = self.duration.as_millis() as u64 / u64::from(self.phases.max(1)) / 2;
        Duration::from_millis(millis)
    }

    /// Length of a full cycle: every half-step of every phase.
    pub fn cycle_duration(&self) -> Duration {
        self.half_step_duration() * self.phases.max(1) * 2
    }
}

/// Field writes produced by one loop frame. `None` leaves a field untouched.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ArcUpdate {
    /// New indeterminate sweep.
    pub sweep: Option<f32>,
    /// New start angle.
    pub start_angle: Option<f32>,
    /// New rotation offset.
    pub rotate_offset: Option<f32>,
}

impl ArcUpdate {
    /// Overlays `later` on `self`; fields set in `later` win.
    pub fn merge(&mut self, later: ArcUpdate) {
        if later.sweep.is_some() {
            self.sweep = later.sweep;
        }
        if later.start_angle.is_some() {
            self.start_angle = later.start_angle;
        }
        if later.rotate_offset.is_some() {
            self.rotate_offset = later.rotate_offset;
        }
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.sweep.is_none() && self.start_angle.is_none() && self.rotate_offset.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum HalfStepKind {
    FrontExtend,
    BackRetract { origin: f32 },
}

/// Two timelines that run concurrently.
#[derive(Debug, Clone)]
struct HalfStep {
    kind: HalfStepKind,
    primary: ValueAnimator,
    rotation: ValueAnimator,
    max_sweep: f32,
}

impl HalfStep {
    fn update(&self, primary: f32, rotation: f32) -> ArcUpdate {
        match self.kind {
            HalfStepKind::FrontExtend => ArcUpdate {
                sweep: Some(primary),
                start_angle: None,
                rotate_offset: Some(rotation),
            },
            HalfStepKind::BackRetract { origin } => ArcUpdate {
                sweep: Some(self.max_sweep - primary + origin),
                start_angle: Some(primary),
                rotate_offset: Some(rotation),
            },
        }
    }

    fn sample(&self, elapsed: Duration) -> ArcUpdate {
        self.update(
            self.primary.value_at(elapsed),
            self.rotation.value_at(elapsed),
        )
    }

    fn finish(&self) -> ArcUpdate {
        self.update(self.primary.to(), self.rotation.to())
    }
}

/// One segment of the loop: extend, then retract.
#[derive(Debug, Clone)]
pub struct Phase {
    extend: HalfStep,
    retract: HalfStep,
}

impl Phase {
    /// Builds phase number `step` of a loop shaped by `config`.
    pub fn new(step: u32, config: &LoopConfig) -> Self {
        let step = step as f32;
        let phases = config.phases.max(1) as f32;
        let max_sweep = config.max_sweep();
        let grow = max_sweep - config.min_sweep;
        let duration = config.half_step_duration();
        let origin = -90.0 + step * grow;
        let quarter_turns = 720.0 / phases;

        let extend = HalfStep {
            kind: HalfStepKind::FrontExtend,
            primary: ValueAnimator::new(config.min_sweep, max_sweep, duration)
                .with_interpolator(Interpolator::DECELERATE),
            rotation: ValueAnimator::new(
                step * quarter_turns,
                (step + 0.5) * quarter_turns,
                duration,
            ),
            max_sweep,
        };

        let retract = HalfStep {
            kind: HalfStepKind::BackRetract { origin },
            primary: ValueAnimator::new(origin, origin + grow, duration)
                .with_interpolator(Interpolator::DECELERATE),
            rotation: ValueAnimator::new(
                (step + 0.5) * quarter_turns,
                (step + 1.0) * quarter_turns,
                duration,
            ),
            max_sweep,
        };

        Self { extend, retract }
    }

    fn half_step(&self, second: bool) -> &HalfStep {
        if second { &self.retract } else { &self.extend }
    }
}

/// What the loop produced for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopFrame {
    /// The loop is not running.
    Inactive,
    /// Mid-cycle values.
    Running(ArcUpdate),
    /// The last phase completed naturally; carries its final values.
    Completed(ArcUpdate),
}

/// A strictly sequential run of [`Phase`]s.
///
/// The loop itself stops after one cycle and reports
/// [`LoopFrame::Completed`]; the owner restarts it. A cancelled loop never
/// reports completion, so a deliberate stop cannot be mistaken for the end of a
/// cycle.
#[derive(Debug, Clone)]
pub struct IndeterminateLoop {
    config: LoopConfig,
    phases: SmallVec<[Phase; 3]>,
    status: TimelineStatus,
    started_at: Option<FrameTime>,
    finalized: usize,
    cancelled: bool,
}

impl IndeterminateLoop {
    /// Builds an idle loop.
    pub fn new(config: LoopConfig) -> Self {
        let phases = (0..config.phases.max(1))
            .map(|step| Phase::new(step, &config))
            .collect();
        Self {
            config,
            phases,
            status: TimelineStatus::Idle,
            started_at: None,
            finalized: 0,
            cancelled: false,
        }
    }

    /// The loop's configuration.
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Number of phases in one cycle.
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Current status.
    pub fn status(&self) -> TimelineStatus {
        self.status
    }

    /// Returns `true` while the cycle is in progress.
    pub fn is_running(&self) -> bool {
        self.status == TimelineStatus::Running
    }

    /// Returns `true` once [`cancel`](Self::cancel) stopped a running cycle.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Starts the cycle from the first phase on the next frame.
    pub fn start(&mut self) {
        self.status = TimelineStatus::Running;
        self.started_at = None;
        self.finalized = 0;
        self.cancelled = false;
    }

    /// Cancels a running cycle and returns `true`. Otherwise does nothing.
    pub fn cancel(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.cancelled = true;
        self.status = TimelineStatus::Cancelled;
        true
    }

    fn half_step(&self, index: usize) -> &HalfStep {
        self.phases[index / 2].half_step(index % 2 == 1)
    }

    /// Advances the cycle to `now`.
    ///
    /// Half-steps that ended since the previous frame contribute their final
    /// values before the current half-step is sampled, so a long frame gap
    /// never leaves the arc at a stale intermediate position.
    pub fn tick(&mut self, now: FrameTime) -> LoopFrame {
        if self.cancelled || !self.is_running() {
            return LoopFrame::Inactive;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_since(started_at);
        let half = self.config.half_step_duration();
        let total = self.phases.len() * 2;
        let current = if half.is_zero() {
            total
        } else {
            ((elapsed.as_nanos() / half.as_nanos()) as usize).min(total)
        };

        let mut update = ArcUpdate::default();
        while self.finalized < current {
            update.merge(self.half_step(self.finalized).finish());
            self.finalized += 1;
        }

        if current >= total {
            self.status = TimelineStatus::Finished;
            return LoopFrame::Completed(update);
        }

        let local = elapsed.saturating_sub(half * current as u32);
        update.merge(self.half_step(current).sample(local));
        LoopFrame::Running(update)
    }
}
