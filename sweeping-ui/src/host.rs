//! Host lifecycle hooks and a headless frame loop.
//!
//! ## Usage
//!
//! Implement [`HostView`] for anything a host should measure, tick and draw,
//! then drive it with a real windowing loop or with [`HeadlessHost`].

use std::{sync::Arc, time::Duration};

use tracing::{debug, trace};

use crate::{Canvas, Constraint, DrawCommand, FrameClock, FrameTime, PxSize, RecordingCanvas};

/// Whether a view takes part in drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Drawn normally.
    #[default]
    Visible,
    /// Hidden but still occupying layout space.
    Invisible,
    /// Hidden and removed from layout.
    Gone,
}

impl Visibility {
    /// Returns `true` for [`Visibility::Visible`].
    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

/// Lifecycle hooks a host invokes on a view.
///
/// Every hook except [`on_measure`](Self::on_measure) defaults to a no-op.
/// Hooks take `&self` so views can be shared with threads other than the one
/// running the frame loop.
pub trait HostView: Send + Sync {
    /// Resolves the view's size under `constraint`.
    fn on_measure(&self, constraint: Constraint) -> PxSize;

    /// Called after layout when the view's size differs from the previous one.
    fn on_size_changed(&self, _size: PxSize, _old_size: PxSize) {}

    /// Called when the view becomes part of a displayed hierarchy.
    fn on_attached(&self) {}

    /// Called when the view leaves the displayed hierarchy.
    fn on_detached(&self) {}

    /// Called whenever the host sets the view's visibility, changed or not.
    fn on_visibility_changed(&self, _visibility: Visibility) {}

    /// Advances the view's animations to `frame_time`.
    fn on_frame(&self, _frame_time: FrameTime) {}

    /// Draws the view's current state.
    fn on_draw(&self, _canvas: &mut dyn Canvas) {}

    /// Consumes the view's pending redraw request, if any.
    fn take_redraw_request(&self) -> bool {
        false
    }
}

/// A frame loop without a window.
///
/// The host keeps one [`RecordingCanvas`] and only draws the view on frames
/// where the view asked for a redraw.
pub struct HeadlessHost<V: HostView> {
    view: Arc<V>,
    clock: FrameClock,
    canvas: RecordingCanvas,
    size: PxSize,
    attached: bool,
    frames_drawn: u64,
}

impl<V: HostView> HeadlessHost<V> {
    /// Creates a host around `view`, driven by `clock`.
    pub fn new(view: Arc<V>, clock: FrameClock) -> Self {
        Self {
            view,
            clock,
            canvas: RecordingCanvas::new(),
            size: PxSize::ZERO,
            attached: false,
            frames_drawn: 0,
        }
    }

    /// The hosted view.
    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// The host's frame clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// The size assigned by the last [`layout`](Self::layout).
    pub fn size(&self) -> PxSize {
        self.size
    }

    /// Number of frames on which the view was drawn.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Returns `true` while the view is attached.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Attaches the view. Attaching twice is a no-op.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;
        debug!("Attaching view to headless host");
        self.view.on_attached();
    }

    /// Detaches the view. Detaching a detached view is a no-op.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        debug!("Detaching view from headless host");
        self.view.on_detached();
    }

    /// Forwards a visibility change to the view.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.view.on_visibility_changed(visibility);
    }

    /// Measures the view and notifies it if its size changed.
    pub fn layout(&mut self, constraint: Constraint) -> PxSize {
        let measured = self.view.on_measure(constraint);
        if measured != self.size {
            let old_size = self.size;
            self.size = measured;
            self.view.on_size_changed(measured, old_size);
        }
        measured
    }

    /// Advances the clock by `delta`, ticks the view and draws it if it asked
    /// for a redraw. Returns the commands of the drawn frame.
    pub fn frame(&mut self, delta: Duration) -> Option<Vec<DrawCommand>> {
        let now = self.clock.advance(delta);
        self.view.on_frame(now);
        if !self.view.take_redraw_request() {
            trace!(?now, "No redraw requested");
            return None;
        }
        self.canvas.clear();
        self.view.on_draw(&mut self.canvas);
        self.frames_drawn += 1;
        Some(self.canvas.take_commands())
    }

    /// Runs frames of length `interval` until `duration` has elapsed and
    /// returns the last drawn frame, if any frame was drawn.
    pub fn run_for(&mut self, duration: Duration, interval: Duration) -> Option<Vec<DrawCommand>> {
        let mut last = None;
        let mut elapsed = Duration::ZERO;
        while elapsed < duration {
            if let Some(commands) = self.frame(interval) {
                last = Some(commands);
            }
            elapsed += interval;
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;
    use crate::{ArcBounds, Paint, Px, RedrawRequest};

    #[derive(Default)]
    struct CountingView {
        attached: AtomicUsize,
        detached: AtomicUsize,
        frames: AtomicUsize,
        resized: AtomicUsize,
        hidden: AtomicBool,
        redraw: RedrawRequest,
    }

    impl HostView for CountingView {
        fn on_measure(&self, constraint: Constraint) -> PxSize {
            PxSize::square(constraint.width.resolve().min(constraint.height.resolve()))
        }

        fn on_size_changed(&self, _size: PxSize, _old_size: PxSize) {
            self.resized.fetch_add(1, Ordering::SeqCst);
        }

        fn on_attached(&self) {
            self.attached.fetch_add(1, Ordering::SeqCst);
        }

        fn on_detached(&self) {
            self.detached.fetch_add(1, Ordering::SeqCst);
        }

        fn on_visibility_changed(&self, visibility: Visibility) {
            self.hidden.store(!visibility.is_visible(), Ordering::SeqCst);
        }

        fn on_frame(&self, _frame_time: FrameTime) {
            let frame = self.frames.fetch_add(1, Ordering::SeqCst);
            if frame % 2 == 0 {
                self.redraw.request();
                self.redraw.request();
            }
        }

        fn on_draw(&self, canvas: &mut dyn Canvas) {
            canvas.draw_arc(ArcBounds::default(), 0.0, 10.0, false, &Paint::default());
        }

        fn take_redraw_request(&self) -> bool {
            self.redraw.take()
        }
    }

    #[test]
    fn test_attach_and_detach_are_idempotent() {
        let view = Arc::new(CountingView::default());
        let mut host = HeadlessHost::new(view.clone(), FrameClock::manual());
        host.attach();
        host.attach();
        assert!(host.is_attached());
        host.detach();
        host.detach();
        assert_eq!(view.attached.load(Ordering::SeqCst), 1);
        assert_eq!(view.detached.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_layout_reports_size_changes_once() {
        let view = Arc::new(CountingView::default());
        let mut host = HeadlessHost::new(view.clone(), FrameClock::manual());
        let constraint = Constraint::fixed(Px(100), Px(60));
        assert_eq!(host.layout(constraint), PxSize::square(Px(60)));
        host.layout(constraint);
        assert_eq!(view.resized.load(Ordering::SeqCst), 1);
        assert_eq!(host.size(), PxSize::square(Px(60)));
    }

    #[test]
    fn test_frames_only_draw_when_requested() {
        let view = Arc::new(CountingView::default());
        let mut host = HeadlessHost::new(view.clone(), FrameClock::manual());
        let first = host.frame(Duration::from_millis(16));
        assert_eq!(first.map(|c| c.len()), Some(1));
        assert!(host.frame(Duration::from_millis(16)).is_none());
        assert_eq!(host.frames_drawn(), 1);
        assert_eq!(host.clock().now(), FrameTime::from_millis(32));
    }

    #[test]
    fn test_visibility_is_forwarded() {
        let view = Arc::new(CountingView::default());
        let mut host = HeadlessHost::new(view.clone(), FrameClock::manual());
        host.set_visibility(Visibility::Gone);
        assert!(view.hidden.load(Ordering::SeqCst));
        host.set_visibility(Visibility::Visible);
        assert!(!view.hidden.load(Ordering::SeqCst));
    }

    #[test]
    fn test_run_for_counts_drawn_frames() {
        let view = Arc::new(CountingView::default());
        let mut host = HeadlessHost::new(view, FrameClock::manual());
        let last = host.run_for(Duration::from_millis(100), Duration::from_millis(10));
        assert!(last.is_some());
        assert_eq!(host.frames_drawn(), 5);
    }
}
