//! Process-wide setup for hosts: logging and debug-build deadlock detection.
//!
//! ## Usage
//!
//! Call [`init`] once at the top of `main` before creating any view.

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "error,sweeping_components=info";

/// Installs the tracing subscriber and, in debug builds, the deadlock detector.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Like [`init`], with `default_filter` used when `RUST_LOG` is not set.
pub fn init_with_filter(default_filter: &str) {
    init_tracing(default_filter);
    init_deadlock_detection();
}

/// Installs a `tracing-subscriber` formatter filtered by `RUST_LOG`, falling
/// back to `default_filter`.
///
/// An unparsable `default_filter` falls back to errors only. Installing twice
/// is harmless.
pub fn init_tracing(default_filter: &str) {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(default_filter) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

/// Spawns a background thread that reports `parking_lot` deadlocks every ten
/// seconds. Does nothing in release builds.
pub fn init_deadlock_detection() {
    #[cfg(debug_assertions)]
    {
        use std::{sync::Once, thread, time::Duration};

        static INIT: Once = Once::new();
        INIT.call_once(|| {
            thread::spawn(|| {
                loop {
                    thread::sleep(Duration::from_secs(10));
                    let deadlocks = parking_lot::deadlock::check_deadlock();
                    if deadlocks.is_empty() {
                        continue;
                    }

                    tracing::error!("{} deadlocks detected", deadlocks.len());
                    for (idx, threads) in deadlocks.iter().enumerate() {
                        tracing::error!("Deadlock #{}", idx);
                        for thread in threads {
                            tracing::error!("Thread Id {:#?}", thread.thread_id());
                            tracing::error!("{:?}", thread.backtrace());
                        }
                    }
                }
            });
        });
    }
}
