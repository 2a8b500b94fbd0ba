//! The progress state machine.
//!
//! [`SweepingCircleProgress`] owns the progress values, the arc geometry and
//! the three timelines that animate them:
//!
//! - the determinate baseline rotation,
//! - the determinate progress sync,
//! - the indeterminate chasing-arc loop.
//!
//! All of it lives behind one mutex, so callers on any thread may read or set
//! progress while a frame loop ticks the timelines. Listener callbacks are
//! collected while the lock is held and delivered after it is released.
//!
//! A second, reentrant lock spans each state change together with the
//! delivery of its events. Listeners therefore see events in the order the
//! state changed, and may still call back into the indicator.

use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex};
use smallvec::SmallVec;
use sweeping_ui::{
    ArcBounds, Canvas, Constraint, FrameTime, HostView, Paint, PxSize, RedrawRequest, Visibility,
};
use tracing::{debug, instrument, trace};

use super::{
    CircularProgressArgs, ProgressIndicatorDefaults,
    geometry::{ArcLayout, measure_with_padding},
    listener::{ListenerRegistry, ProgressEvent, ProgressListener},
};
use crate::{
    animation::{
        AnimatorFrame, ArcUpdate, IndeterminateLoop, Interpolator, LoopConfig, LoopFrame,
        ValueAnimator,
    },
    pipelines::progress_arc::ProgressArcCommand,
};

type Events = SmallVec<[ProgressEvent; 4]>;

/// Angles that position the arc.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    /// Baseline angle in degrees.
    pub start_angle: f32,
    /// Sweep used in indeterminate mode.
    pub indeterminate_sweep: f32,
    /// Extra rotation applied in indeterminate mode.
    pub indeterminate_rotate_offset: f32,
}

/// A consistent copy of everything that decides what gets drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    /// Target progress.
    pub current_progress: f32,
    /// Animated progress.
    pub actual_progress: f32,
    /// Value of a full circle.
    pub max_progress: f32,
    /// Current mode.
    pub is_indeterminate: bool,
    /// Current angles.
    pub geometry: ArcGeometry,
}

/// Computes the arc to draw for `snapshot`.
///
/// In indeterminate mode the rotation offset is added to the start angle and
/// the indeterminate sweep is used. Otherwise the sweep is the share of a full
/// circle that `actual_progress` represents.
pub fn build_arc_command(
    snapshot: &ProgressSnapshot,
    bounds: ArcBounds,
    paint: Paint,
) -> ProgressArcCommand {
    let geometry = snapshot.geometry;
    let (start_angle_degrees, sweep_angle_degrees) = if snapshot.is_indeterminate {
        (
            geometry.start_angle + geometry.indeterminate_rotate_offset,
            geometry.indeterminate_sweep,
        )
    } else {
        (
            geometry.start_angle,
            snapshot.actual_progress / snapshot.max_progress * 360.0,
        )
    };
    ProgressArcCommand {
        bounds,
        start_angle_degrees,
        sweep_angle_degrees,
        paint,
    }
}

#[derive(Debug, Default)]
struct Timelines {
    rotation: Option<ValueAnimator>,
    progress_sync: Option<ValueAnimator>,
    indeterminate: Option<IndeterminateLoop>,
}

impl Timelines {
    fn cancel_all(&mut self) {
        if let Some(mut rotation) = self.rotation.take() {
            rotation.cancel();
        }
        if let Some(mut sync) = self.progress_sync.take() {
            sync.cancel();
        }
        if let Some(mut sequence) = self.indeterminate.take() {
            sequence.cancel();
        }
    }

    fn is_running(&self) -> bool {
        self.rotation.as_ref().is_some_and(ValueAnimator::is_running)
            || self
                .progress_sync
                .as_ref()
                .is_some_and(ValueAnimator::is_running)
            || self
                .indeterminate
                .as_ref()
                .is_some_and(IndeterminateLoop::is_running)
    }
}

#[derive(Debug)]
struct ProgressState {
    current_progress: f32,
    actual_progress: f32,
    max_progress: f32,
    is_indeterminate: bool,
    geometry: ArcGeometry,
    timelines: Timelines,
    visibility: Visibility,
    layout: ArcLayout,
}

impl ProgressState {
    fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            current_progress: self.current_progress,
            actual_progress: self.actual_progress,
            max_progress: self.max_progress,
            is_indeterminate: self.is_indeterminate,
            geometry: self.geometry,
        }
    }

    fn start_progress_sync(&mut self) {
        if let Some(mut previous) = self.timelines.progress_sync.take() {
            previous.cancel();
        }
        let mut sync = ValueAnimator::new(
            self.actual_progress,
            self.current_progress,
            ProgressIndicatorDefaults::SYNC_DURATION,
        );
        sync.start();
        self.timelines.progress_sync = Some(sync);
    }

    fn reset(&mut self, events: &mut Events) {
        self.timelines.cancel_all();

        if self.is_indeterminate {
            let config = LoopConfig {
                phases: ProgressIndicatorDefaults::INDETERMINATE_PHASES,
                min_sweep: ProgressIndicatorDefaults::INDETERMINATE_MIN_SWEEP,
                duration: ProgressIndicatorDefaults::INDETERMINATE_DURATION,
            };
            self.geometry.indeterminate_sweep = config.min_sweep;
            let mut sequence = IndeterminateLoop::new(config);
            sequence.start();
            self.timelines.indeterminate = Some(sequence);
            debug!("Started indeterminate loop");
            events.push(ProgressEvent::AnimationReset);
        } else {
            let init = ProgressIndicatorDefaults::INIT_ANGLE;
            self.geometry.start_angle = init;
            let mut rotation = ValueAnimator::new(
                init,
                init + 360.0,
                ProgressIndicatorDefaults::ROTATION_DURATION,
            )
            .with_interpolator(Interpolator::Decelerate(
                ProgressIndicatorDefaults::ROTATION_DECELERATION,
            ));
            rotation.start();
            self.timelines.rotation = Some(rotation);

            self.actual_progress = 0.0;
            self.start_progress_sync();
            debug!(
                target_progress = self.current_progress,
                "Started determinate rotation and sync"
            );
        }
    }

    fn apply(&mut self, update: ArcUpdate) {
        if let Some(sweep) = update.sweep {
            self.geometry.indeterminate_sweep = sweep;
        }
        if let Some(start_angle) = update.start_angle {
            self.geometry.start_angle = start_angle;
        }
        if let Some(offset) = update.rotate_offset {
            self.geometry.indeterminate_rotate_offset = offset;
        }
    }

    /// Advances every timeline. Returns whether any field changed.
    fn tick(&mut self, now: FrameTime, events: &mut Events) -> bool {
        let mut changed = false;

        if let Some(rotation) = self.timelines.rotation.as_mut() {
            match rotation.tick(now) {
                AnimatorFrame::Running(angle) => {
                    self.geometry.start_angle = angle;
                    changed = true;
                }
                AnimatorFrame::Finished(angle) => {
                    self.geometry.start_angle = angle;
                    self.timelines.rotation = None;
                    changed = true;
                }
                AnimatorFrame::Inactive => {}
            }
        }

        if let Some(sync) = self.timelines.progress_sync.as_mut() {
            match sync.tick(now) {
                AnimatorFrame::Running(progress) => {
                    self.actual_progress = progress;
                    changed = true;
                }
                AnimatorFrame::Finished(progress) => {
                    self.actual_progress = progress;
                    self.timelines.progress_sync = None;
                    changed = true;
                    events.push(ProgressEvent::ProgressEnd(self.current_progress));
                }
                AnimatorFrame::Inactive => {}
            }
        }

        if let Some(sequence) = self.timelines.indeterminate.as_mut() {
            match sequence.tick(now) {
                LoopFrame::Running(update) => {
                    self.apply(update);
                    changed = true;
                }
                LoopFrame::Completed(update) => {
                    self.apply(update);
                    self.timelines.indeterminate = None;
                    debug!("Indeterminate loop completed, restarting");
                    self.reset(events);
                    changed = true;
                }
                LoopFrame::Inactive => {}
            }
        }

        changed
    }
}

/// A circular progress indicator with determinate and indeterminate modes.
///
/// Determinate mode draws `actual_progress / max_progress` of a circle while a
/// baseline rotation turns the arc once per reset. Setting progress animates
/// `actual_progress` towards the new target over half a second.
///
/// Indeterminate mode draws an arc whose leading edge extends and whose
/// trailing edge chases it, looping until stopped.
///
/// Every method takes `&self`; share the indicator through an [`Arc`].
pub struct SweepingCircleProgress {
    args: CircularProgressArgs,
    state: Mutex<ProgressState>,
    listeners: ListenerRegistry,
    event_order: ReentrantMutex<()>,
    redraw: RedrawRequest,
}

impl SweepingCircleProgress {
    /// Creates an indicator.
    ///
    /// A determinate indicator starts its baseline rotation and a sync towards
    /// `args.progress` right away. An indeterminate one stays idle until
    /// [`start_animation`](Self::start_animation) or an autostarting attach.
    pub fn new(args: CircularProgressArgs) -> Self {
        let mut state = ProgressState {
            current_progress: args.progress,
            actual_progress: 0.0,
            max_progress: args.max_progress,
            is_indeterminate: args.is_indeterminate,
            geometry: ArcGeometry {
                start_angle: ProgressIndicatorDefaults::INIT_ANGLE,
                indeterminate_sweep: ProgressIndicatorDefaults::INDETERMINATE_MIN_SWEEP,
                indeterminate_rotate_offset: 0.0,
            },
            timelines: Timelines::default(),
            visibility: Visibility::Visible,
            layout: ArcLayout::default(),
        };
        let redraw = RedrawRequest::new();
        if !state.is_indeterminate {
            // The determinate reset emits no events and nobody listens yet.
            state.reset(&mut Events::new());
            redraw.request();
        }
        Self {
            args,
            state: Mutex::new(state),
            listeners: ListenerRegistry::new(),
            event_order: ReentrantMutex::new(()),
            redraw,
        }
    }

    /// The configuration this indicator was built with.
    pub fn args(&self) -> &CircularProgressArgs {
        &self.args
    }

    fn dispatch(&self, events: &[ProgressEvent]) {
        self.listeners.notify(events);
    }

    /// Target progress.
    pub fn progress(&self) -> f32 {
        self.state.lock().current_progress
    }

    /// Sets the target progress.
    ///
    /// In determinate mode this replaces any running sync with one from the
    /// current `actual_progress` to `value`. `on_progress_update` fires right
    /// away in either mode.
    pub fn set_progress(&self, value: f32) {
        let _order = self.event_order.lock();
        {
            let mut state = self.state.lock();
            state.current_progress = value;
            if !state.is_indeterminate {
                state.start_progress_sync();
            }
        }
        trace!(progress = value, "Progress set");
        self.redraw.request();
        self.dispatch(&[ProgressEvent::ProgressUpdate(value)]);
    }

    /// The animated progress value that is drawn.
    pub fn actual_progress(&self) -> f32 {
        self.state.lock().actual_progress
    }

    /// Value of a full circle.
    pub fn max_progress(&self) -> f32 {
        self.args.max_progress
    }

    /// Returns `true` in indeterminate mode.
    pub fn is_indeterminate(&self) -> bool {
        self.state.lock().is_indeterminate
    }

    /// Switches mode, or replays the current one.
    ///
    /// A different `value` switches the mode and fires `on_mode_changed`
    /// without touching the timelines. The current `value` is a reset request
    /// and runs [`reset_animation`](Self::reset_animation).
    pub fn set_indeterminate(&self, value: bool) {
        let _order = self.event_order.lock();
        let mut events = Events::new();
        {
            let mut state = self.state.lock();
            if state.is_indeterminate == value {
                state.reset(&mut events);
            } else {
                state.is_indeterminate = value;
                debug!(is_indeterminate = value, "Progress mode changed");
                events.push(ProgressEvent::ModeChanged(value));
            }
        }
        self.redraw.request();
        self.dispatch(&events);
    }

    /// Registers `listener`. Returns `true`.
    pub fn listen(&self, listener: Arc<dyn ProgressListener>) -> bool {
        self.listeners.listen(listener)
    }

    /// Removes the first registration of `listener`. Returns whether one was
    /// found.
    pub fn unlisten<L: ProgressListener + ?Sized>(&self, listener: &Arc<L>) -> bool {
        self.listeners.unlisten(listener)
    }

    /// Same as [`reset_animation`](Self::reset_animation).
    pub fn start_animation(&self) {
        self.reset_animation();
    }

    /// Cancels every timeline and restarts the current mode's animation.
    #[instrument(level = "debug", skip(self))]
    pub fn reset_animation(&self) {
        let _order = self.event_order.lock();
        let mut events = Events::new();
        self.state.lock().reset(&mut events);
        self.redraw.request();
        self.dispatch(&events);
    }

    /// Cancels every timeline. No listener fires.
    pub fn stop_animation(&self) {
        self.state.lock().timelines.cancel_all();
        debug!("Stopped progress animation");
    }

    /// Returns `true` while any timeline is running.
    pub fn is_animating(&self) -> bool {
        self.state.lock().timelines.is_running()
    }

    /// Current angles.
    pub fn geometry(&self) -> ArcGeometry {
        self.state.lock().geometry
    }

    /// A consistent copy of the drawn state.
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.state.lock().snapshot()
    }

    /// Current visibility.
    pub fn visibility(&self) -> Visibility {
        self.state.lock().visibility
    }

    /// Updates visibility.
    ///
    /// Becoming visible resets the animation, becoming hidden or gone stops
    /// it. Setting the current visibility does nothing.
    pub fn set_visibility(&self, visibility: Visibility) {
        let previous = {
            let mut state = self.state.lock();
            std::mem::replace(&mut state.visibility, visibility)
        };
        if previous == visibility {
            return;
        }
        debug!(?visibility, "Progress visibility changed");
        if visibility.is_visible() {
            self.reset_animation();
        } else {
            self.stop_animation();
        }
    }

    /// Current layout.
    pub fn layout(&self) -> ArcLayout {
        self.state.lock().layout
    }

    /// Advances every running timeline to `now` and delivers the resulting
    /// events.
    pub fn tick(&self, now: FrameTime) {
        let _order = self.event_order.lock();
        let mut events = Events::new();
        let changed = self.state.lock().tick(now, &mut events);
        if changed {
            trace!(?now, "Progress timelines advanced");
            self.redraw.request();
        }
        self.dispatch(&events);
    }

    /// Stroke paint built from the configuration.
    pub fn paint(&self) -> Paint {
        let mut paint = Paint::stroke(
            self.args.progress_color,
            self.args.stroke_width.to_pixels_f32(),
        );
        paint.cap = self.args.stroke_cap;
        paint
    }

    /// The arc for the current state and layout.
    pub fn arc_command(&self) -> ProgressArcCommand {
        let (snapshot, bounds) = {
            let state = self.state.lock();
            (state.snapshot(), state.layout.bounds)
        };
        build_arc_command(&snapshot, bounds, self.paint())
    }

    /// Draws the arc on `canvas` unless the indicator is hidden.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.visibility().is_visible() {
            return;
        }
        self.arc_command().draw(canvas);
    }

    /// Consumes the pending redraw request.
    pub fn take_redraw_request(&self) -> bool {
        self.redraw.take()
    }

    fn resize(&self, size: PxSize) {
        let layout = ArcLayout::new(
            size,
            self.args.padding,
            self.args.stroke_width.to_pixels_f32(),
        );
        self.state.lock().layout = layout;
        debug!(?size, bounds = ?layout.bounds, "Progress layout updated");
        self.redraw.request();
    }
}

impl HostView for SweepingCircleProgress {
    fn on_measure(&self, constraint: Constraint) -> PxSize {
        measure_with_padding(constraint, self.args.padding)
    }

    fn on_size_changed(&self, size: PxSize, _old_size: PxSize) {
        self.resize(size);
    }

    fn on_attached(&self) {
        if self.args.resolved_autostart() {
            debug!("Autostarting progress animation");
            self.start_animation();
        }
    }

    fn on_detached(&self) {
        self.stop_animation();
    }

    fn on_visibility_changed(&self, visibility: Visibility) {
        self.set_visibility(visibility);
    }

    fn on_frame(&self, frame_time: FrameTime) {
        self.tick(frame_time);
    }

    fn on_draw(&self, canvas: &mut dyn Canvas) {
        self.draw(canvas);
    }

    fn take_redraw_request(&self) -> bool {
        SweepingCircleProgress::take_redraw_request(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> FrameTime {
        FrameTime::from_millis(millis)
    }

    fn snapshot(is_indeterminate: bool, actual: f32, geometry: ArcGeometry) -> ProgressSnapshot {
        ProgressSnapshot {
            current_progress: actual,
            actual_progress: actual,
            max_progress: 100.0,
            is_indeterminate,
            geometry,
        }
    }

    #[test]
    fn test_determinate_arc_uses_progress_share() {
        let geometry = ArcGeometry {
            start_angle: 45.0,
            indeterminate_sweep: 200.0,
            indeterminate_rotate_offset: 90.0,
        };
        let command = build_arc_command(
            &snapshot(false, 25.0, geometry),
            ArcBounds::default(),
            Paint::default(),
        );
        assert_eq!(command.start_angle_degrees, 45.0);
        assert_eq!(command.sweep_angle_degrees, 90.0);
    }

    #[test]
    fn test_indeterminate_arc_adds_rotation_offset() {
        let geometry = ArcGeometry {
            start_angle: 45.0,
            indeterminate_sweep: 200.0,
            indeterminate_rotate_offset: 90.0,
        };
        let command = build_arc_command(
            &snapshot(true, 25.0, geometry),
            ArcBounds::default(),
            Paint::default(),
        );
        assert_eq!(command.start_angle_degrees, 135.0);
        assert_eq!(command.sweep_angle_degrees, 200.0);
    }

    #[test]
    fn test_new_determinate_indicator_syncs_to_initial_progress() {
        let indicator = SweepingCircleProgress::new(CircularProgressArgs::default().progress(40.0));
        assert_eq!(indicator.progress(), 40.0);
        assert_eq!(indicator.actual_progress(), 0.0);
        assert!(indicator.is_animating());
        assert!(indicator.take_redraw_request());

        indicator.tick(ms(0));
        indicator.tick(ms(250));
        assert!((indicator.actual_progress() - 20.0).abs() < 1e-3);
        indicator.tick(ms(500));
        assert_eq!(indicator.actual_progress(), 40.0);

        indicator.tick(ms(5000));
        assert_eq!(indicator.geometry().start_angle, 360.0);
        assert!(!indicator.is_animating());
    }

    #[test]
    fn test_new_indeterminate_indicator_is_idle() {
        let indicator =
            SweepingCircleProgress::new(CircularProgressArgs::default().is_indeterminate(true));
        assert!(!indicator.is_animating());
        assert!(!indicator.take_redraw_request());
        indicator.tick(ms(100));
        assert!(!indicator.take_redraw_request());
    }

    #[test]
    fn test_determinate_reset_rotates_once() {
        let indicator = SweepingCircleProgress::new(CircularProgressArgs::default());
        indicator.reset_animation();
        indicator.tick(ms(0));
        assert_eq!(indicator.geometry().start_angle, 0.0);

        indicator.tick(ms(2500));
        // Decelerate(2) at half time is 1 - 0.5^4.
        assert!((indicator.geometry().start_angle - 337.5).abs() < 1e-2);

        indicator.tick(ms(5000));
        assert_eq!(indicator.geometry().start_angle, 360.0);
        assert!(!indicator.is_animating());

        indicator.tick(ms(9000));
        assert_eq!(indicator.geometry().start_angle, 360.0);
    }

    #[test]
    fn test_sync_is_linear() {
        let indicator = SweepingCircleProgress::new(CircularProgressArgs::default());
        indicator.set_progress(80.0);
        indicator.tick(ms(0));
        indicator.tick(ms(250));
        assert!((indicator.actual_progress() - 40.0).abs() < 1e-3);
        indicator.tick(ms(500));
        assert_eq!(indicator.actual_progress(), 80.0);
    }

    #[test]
    fn test_indeterminate_progress_does_not_sync() {
        let indicator =
            SweepingCircleProgress::new(CircularProgressArgs::default().is_indeterminate(true));
        indicator.set_progress(60.0);
        assert_eq!(indicator.progress(), 60.0);
        assert!(!indicator.is_animating());
        assert!(indicator.take_redraw_request());
    }

    #[test]
    fn test_indeterminate_reset_starts_at_min_sweep() {
        let indicator =
            SweepingCircleProgress::new(CircularProgressArgs::default().is_indeterminate(true));
        indicator.start_animation();
        indicator.tick(ms(0));
        assert_eq!(indicator.geometry().indeterminate_sweep, 15.0);
        indicator.tick(ms(333));
        assert!((indicator.geometry().indeterminate_sweep - 195.0).abs() < 1e-2);
        assert!((indicator.geometry().indeterminate_rotate_offset - 60.0).abs() < 1e-2);
    }

    #[test]
    fn test_stop_cancels_everything() {
        let indicator = SweepingCircleProgress::new(CircularProgressArgs::default());
        indicator.start_animation();
        assert!(indicator.is_animating());
        indicator.stop_animation();
        assert!(!indicator.is_animating());
        indicator.tick(ms(100));
        assert_eq!(indicator.geometry().start_angle, 0.0);
    }

    #[test]
    fn test_layout_and_paint_follow_args() {
        let indicator = SweepingCircleProgress::new(
            CircularProgressArgs::default()
                .stroke_width(sweeping_ui::Dp(4.0))
                .progress_color(sweeping_ui::Color::GREEN),
        );
        indicator.on_size_changed(PxSize::square(sweeping_ui::Px(50)), PxSize::ZERO);
        assert_eq!(indicator.layout().bounds, ArcBounds::new(4.0, 4.0, 46.0, 46.0));
        let paint = indicator.paint();
        assert_eq!(paint.stroke_width, 4.0);
        assert_eq!(paint.color, sweeping_ui::Color::GREEN);
        assert_eq!(paint.cap, sweeping_ui::StrokeCap::Round);
    }
}
