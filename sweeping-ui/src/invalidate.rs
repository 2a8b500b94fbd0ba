//! Coalescing redraw requests.

use std::sync::atomic::{AtomicBool, Ordering};

/// A redraw flag that can be raised from any thread and is consumed once per
/// frame by the host.
///
/// Raising the flag several times before the host consumes it still yields a
/// single redraw.
///
/// ```
/// use sweeping_ui::RedrawRequest;
///
/// let redraw = RedrawRequest::new();
/// redraw.request();
/// redraw.request();
/// assert!(redraw.take());
/// assert!(!redraw.take());
/// ```
#[derive(Debug, Default)]
pub struct RedrawRequest {
    pending: AtomicBool,
}

impl RedrawRequest {
    /// Creates a flag with no pending request.
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Raises the flag. Returns `true` if no request was pending before.
    pub fn request(&self) -> bool {
        !self.pending.swap(true, Ordering::AcqRel)
    }

    /// Returns `true` if a redraw is pending without consuming it.
    pub fn is_requested(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Consumes the pending request, returning whether there was one.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}
