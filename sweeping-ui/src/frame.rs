//! Frame timing.
//!
//! Animation in this workspace is frame-paced: the host asks every view to
//! advance to a [`FrameTime`] once per frame, and all timelines derive their
//! progress from that value alone. A [`FrameClock`] produces those times either
//! from the monotonic system clock or, for headless hosts and tests, from a
//! manually advanced counter.

use std::{
    ops::Add,
    time::{Duration, Instant},
};

/// Nominal interval between two frames at 60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// A point in time on a [`FrameClock`], measured from the clock's origin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameTime(Duration);

impl FrameTime {
    /// The clock origin.
    pub const ZERO: Self = FrameTime(Duration::ZERO);

    /// Creates a frame time `millis` milliseconds after the clock origin.
    pub const fn from_millis(millis: u64) -> Self {
        FrameTime(Duration::from_millis(millis))
    }

    /// Returns the time elapsed since the clock origin.
    pub const fn since_origin(self) -> Duration {
        self.0
    }

    /// Returns the time elapsed since `earlier`, or zero if `earlier` is later.
    pub fn saturating_since(self, earlier: FrameTime) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<Duration> for FrameTime {
    type Output = FrameTime;

    fn add(self, rhs: Duration) -> Self::Output {
        FrameTime(self.0 + rhs)
    }
}

#[derive(Debug, Clone, Copy)]
enum ClockSource {
    Monotonic { origin: Instant },
    Manual { now: FrameTime },
}

/// Source of [`FrameTime`] values for a host's frame loop.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    source: ClockSource,
}

impl FrameClock {
    /// A clock that follows [`Instant::now`], starting at the moment of creation.
    pub fn monotonic() -> Self {
        Self {
            source: ClockSource::Monotonic {
                origin: Instant::now(),
            },
        }
    }

    /// A clock that stays at its origin until [`advance`](Self::advance) is called.
    pub fn manual() -> Self {
        Self {
            source: ClockSource::Manual {
                now: FrameTime::ZERO,
            },
        }
    }

    /// Returns the current frame time.
    pub fn now(&self) -> FrameTime {
        match self.source {
            ClockSource::Monotonic { origin } => FrameTime(origin.elapsed()),
            ClockSource::Manual { now } => now,
        }
    }

    /// Moves a manual clock forward by `delta` and returns the new time.
    ///
    /// A monotonic clock cannot be moved; it returns [`now`](Self::now).
    pub fn advance(&mut self, delta: Duration) -> FrameTime {
        if let ClockSource::Manual { now } = &mut self.source {
            *now = *now + delta;
        }
        self.now()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::monotonic()
    }
}
