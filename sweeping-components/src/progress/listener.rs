//! Progress observers.

use std::sync::Arc;

use parking_lot::RwLock;
use smallvec::SmallVec;

/// Observer of a progress indicator.
///
/// Every method defaults to a no-op, so implementors override only the events
/// they care about. Callbacks run on whichever thread triggered the event and
/// never while the indicator's state is locked, so a listener may call back
/// into the indicator from that same thread.
///
/// Events arrive in the order the indicator's state changed, even when
/// several threads drive it. A callback that blocks on another thread which
/// is itself changing the indicator deadlocks.
pub trait ProgressListener: Send + Sync {
    /// The mode switched. `is_indeterminate` is the new mode.
    fn on_mode_changed(&self, _is_indeterminate: bool) {}

    /// An indeterminate animation was (re)started.
    fn on_animation_reset(&self) {}

    /// The target progress was set.
    fn on_progress_update(&self, _progress: f32) {}

    /// A progress sync ran to completion. Carries the target progress.
    fn on_progress_end(&self, _progress: f32) {}
}

/// An event, as delivered to every [`ProgressListener`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    /// See [`ProgressListener::on_mode_changed`].
    ModeChanged(bool),
    /// See [`ProgressListener::on_animation_reset`].
    AnimationReset,
    /// See [`ProgressListener::on_progress_update`].
    ProgressUpdate(f32),
    /// See [`ProgressListener::on_progress_end`].
    ProgressEnd(f32),
}

impl ProgressEvent {
    /// Calls the listener method matching this event.
    pub fn deliver(&self, listener: &dyn ProgressListener) {
        match *self {
            ProgressEvent::ModeChanged(value) => listener.on_mode_changed(value),
            ProgressEvent::AnimationReset => listener.on_animation_reset(),
            ProgressEvent::ProgressUpdate(progress) => listener.on_progress_update(progress),
            ProgressEvent::ProgressEnd(progress) => listener.on_progress_end(progress),
        }
    }
}

/// Listeners in registration order.
///
/// The same listener may be registered more than once; it is then notified
/// once per registration.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<Vec<Arc<dyn ProgressListener>>>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener`. Always returns `true`.
    pub fn listen(&self, listener: Arc<dyn ProgressListener>) -> bool {
        self.listeners.write().push(listener);
        true
    }

    /// Removes the first registration of `listener`, compared by identity.
    ///
    /// Returns `false` if it was not registered.
    pub fn unlisten<L: ProgressListener + ?Sized>(&self, listener: &Arc<L>) -> bool {
        let mut listeners = self.listeners.write();
        let position = listeners
            .iter()
            .position(|registered| std::ptr::addr_eq(Arc::as_ptr(registered), Arc::as_ptr(listener)));
        match position {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Delivers `events`, in order, to every listener registered right now.
    ///
    /// The registry is not locked while callbacks run, so a callback may
    /// register or remove listeners; the change applies from the next call.
    pub fn notify(&self, events: &[ProgressEvent]) {
        if events.is_empty() {
            return;
        }
        let snapshot: SmallVec<[Arc<dyn ProgressListener>; 4]> =
            self.listeners.read().iter().cloned().collect();
        for event in events {
            for listener in &snapshot {
                event.deliver(listener.as_ref());
            }
        }
    }
}

type ModeCallback = Box<dyn Fn(bool) + Send + Sync>;
type ResetCallback = Box<dyn Fn() + Send + Sync>;
type ProgressCallback = Box<dyn Fn(f32) + Send + Sync>;

/// A [`ProgressListener`] assembled from optional closures.
///
/// ```
/// use std::sync::{
///     Arc,
///     atomic::{AtomicUsize, Ordering},
/// };
///
/// use sweeping_components::progress::{ProgressCallbacks, ProgressListener};
///
/// let ends = Arc::new(AtomicUsize::new(0));
/// let counter = ends.clone();
/// let callbacks = ProgressCallbacks::new().with_progress_end(move |_| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
/// callbacks.on_progress_end(100.0);
/// callbacks.on_animation_reset();
/// assert_eq!(ends.load(Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct ProgressCallbacks {
    mode_changed: Option<ModeCallback>,
    animation_reset: Option<ResetCallback>,
    progress_update: Option<ProgressCallback>,
    progress_end: Option<ProgressCallback>,
}

impl ProgressCallbacks {
    /// No callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mode change callback.
    pub fn with_mode_changed(mut self, f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.mode_changed = Some(Box::new(f));
        self
    }

    /// Sets the animation reset callback.
    pub fn with_animation_reset(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.animation_reset = Some(Box::new(f));
        self
    }

    /// Sets the progress update callback.
    pub fn with_progress_update(mut self, f: impl Fn(f32) + Send + Sync + 'static) -> Self {
        self.progress_update = Some(Box::new(f));
        self
    }

    /// Sets the progress end callback.
    pub fn with_progress_end(mut self, f: impl Fn(f32) + Send + Sync + 'static) -> Self {
        self.progress_end = Some(Box::new(f));
        self
    }
}

impl ProgressListener for ProgressCallbacks {
    fn on_mode_changed(&self, is_indeterminate: bool) {
        if let Some(f) = &self.mode_changed {
            f(is_indeterminate);
        }
    }

    fn on_animation_reset(&self) {
        if let Some(f) = &self.animation_reset {
            f();
        }
    }

    fn on_progress_update(&self, progress: f32) {
        if let Some(f) = &self.progress_update {
            f(progress);
        }
    }

    fn on_progress_end(&self, progress: f32) {
        if let Some(f) = &self.progress_end {
            f(progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<ProgressEvent>>,
    }

    impl ProgressListener for Recorder {
        fn on_mode_changed(&self, is_indeterminate: bool) {
            self.events
                .lock()
                .push(ProgressEvent::ModeChanged(is_indeterminate));
        }

        fn on_progress_end(&self, progress: f32) {
            self.events.lock().push(ProgressEvent::ProgressEnd(progress));
        }
    }

    struct Silent;

    impl ProgressListener for Silent {}

    #[test]
    fn test_default_methods_are_noops() {
        let registry = ListenerRegistry::new();
        registry.listen(Arc::new(Silent));
        registry.notify(&[
            ProgressEvent::AnimationReset,
            ProgressEvent::ProgressUpdate(3.0),
        ]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_events_are_delivered_in_order() {
        let registry = ListenerRegistry::new();
        let recorder = Arc::new(Recorder::default());
        registry.listen(recorder.clone());
        registry.notify(&[
            ProgressEvent::ModeChanged(true),
            ProgressEvent::AnimationReset,
            ProgressEvent::ProgressEnd(40.0),
        ]);
        assert_eq!(
            *recorder.events.lock(),
            vec![
                ProgressEvent::ModeChanged(true),
                ProgressEvent::ProgressEnd(40.0)
            ]
        );
    }

    #[test]
    fn test_unlisten_removes_one_registration() {
        let registry = ListenerRegistry::new();
        let recorder = Arc::new(Recorder::default());
        registry.listen(recorder.clone());
        registry.listen(recorder.clone());
        assert_eq!(registry.len(), 2);

        assert!(registry.unlisten(&recorder));
        registry.notify(&[ProgressEvent::ModeChanged(false)]);
        assert_eq!(recorder.events.lock().len(), 1);

        assert!(registry.unlisten(&recorder));
        assert!(!registry.unlisten(&recorder));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unlisten_compares_identity() {
        let registry = ListenerRegistry::new();
        let kept = Arc::new(Recorder::default());
        let other = Arc::new(Recorder::default());
        registry.listen(kept.clone());
        assert!(!registry.unlisten(&other));

        let erased: Arc<dyn ProgressListener> = kept.clone();
        assert!(registry.unlisten(&erased));
    }

    #[test]
    fn test_callbacks_answer_listener_calls() {
        let ends = Arc::new(Mutex::new(Vec::new()));
        let seen = ends.clone();
        let callbacks = ProgressCallbacks::new().with_progress_end(move |p| seen.lock().push(p));
        callbacks.on_progress_end(100.0);
        callbacks.on_progress_update(5.0);
        callbacks.on_mode_changed(true);
        callbacks.on_animation_reset();
        assert_eq!(*ends.lock(), vec![100.0]);
    }

    #[test]
    fn test_callbacks_adapter() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let modes = seen.clone();
        let updates = seen.clone();
        let callbacks = ProgressCallbacks::new()
            .with_mode_changed(move |value| modes.lock().push(ProgressEvent::ModeChanged(value)))
            .with_progress_update(move |value| {
                updates.lock().push(ProgressEvent::ProgressUpdate(value))
            });

        let registry = ListenerRegistry::new();
        registry.listen(Arc::new(callbacks));
        registry.notify(&[
            ProgressEvent::ModeChanged(true),
            ProgressEvent::ProgressEnd(1.0),
            ProgressEvent::ProgressUpdate(2.0),
        ]);
        assert_eq!(
            *seen.lock(),
            vec![
                ProgressEvent::ModeChanged(true),
                ProgressEvent::ProgressUpdate(2.0)
            ]
        );
    }
}
