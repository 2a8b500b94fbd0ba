//! Headless showcase for the sweeping circle progress indicator.
//!
//! A simulated button flips the indicator between modes every few seconds and
//! sets progress to 0 when it turns indeterminate or 100 when it turns
//! determinate. Every listener event is logged; run with
//! `RUST_LOG=example=info,sweeping_components=trace` for per-frame output.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use sweeping_components::{
    pipelines::progress_arc::{ArcBatch, ProgressArcCommand},
    progress::{AttributeSet, CircularProgressArgs, ProgressListener, SweepingCircleProgress},
};
use sweeping_ui::{Constraint, FRAME_INTERVAL, FrameClock, HeadlessHost, Px, entry_point};
use tracing::{info, warn};

const TOGGLE_EVERY: Duration = Duration::from_secs(3);
const TOGGLES: u32 = 4;

#[derive(Debug, Default)]
struct Tally {
    mode_changes: u32,
    resets: u32,
    updates: u32,
    ends: u32,
}

#[derive(Default)]
struct LoggingListener {
    tally: Mutex<Tally>,
}

impl ProgressListener for LoggingListener {
    fn on_mode_changed(&self, is_indeterminate: bool) {
        self.tally.lock().mode_changes += 1;
        info!("Indeterminate? {is_indeterminate}");
    }

    fn on_animation_reset(&self) {
        self.tally.lock().resets += 1;
        info!("Animation reset.");
    }

    fn on_progress_update(&self, progress: f32) {
        self.tally.lock().updates += 1;
        info!("Progress: {progress}");
    }

    fn on_progress_end(&self, progress: f32) {
        self.tally.lock().ends += 1;
        info!(progress, "Progress complete.");
    }
}

/// The same settings a layout file would give the view.
fn layout_attributes() -> AttributeSet {
    AttributeSet::new()
        .with("progressColor", "#FF3F51B5")
        .with("stroke", "6dp")
        .with("progress", "100")
        .with("autostart", "true")
        .with("layout_gravity", "center")
}

fn toggle(indicator: &SweepingCircleProgress) {
    indicator.set_indeterminate(!indicator.is_indeterminate());
    let progress = if indicator.is_indeterminate() {
        0.0
    } else {
        100.0
    };
    indicator.set_progress(progress);
}

fn main() {
    entry_point::init_with_filter("error,example=info,sweeping_components=info");

    let args = match CircularProgressArgs::from_attributes(&layout_attributes()) {
        Ok(args) => args,
        Err(err) => {
            warn!("Falling back to default progress args: {err}");
            CircularProgressArgs::default()
        }
    };
    let indicator = Arc::new(SweepingCircleProgress::new(args));
    let listener = Arc::new(LoggingListener::default());
    indicator.listen(listener.clone());

    let mut host = HeadlessHost::new(indicator.clone(), FrameClock::manual());
    let size = host.layout(Constraint::fixed(Px(240), Px(320)));
    info!(?size, "Laid out progress view");
    host.attach();

    let mut batch = ArcBatch::new();
    for _ in 0..TOGGLES {
        if let Some(commands) = host.run_for(TOGGLE_EVERY, FRAME_INTERVAL) {
            for command in commands.iter().filter_map(ProgressArcCommand::from_draw_command) {
                batch.push(command);
            }
        }
        let snapshot = indicator.snapshot();
        info!(
            is_indeterminate = snapshot.is_indeterminate,
            actual_progress = snapshot.actual_progress,
            start_angle = snapshot.geometry.start_angle,
            "Button pressed"
        );
        toggle(&indicator);
    }
    host.run_for(TOGGLE_EVERY, FRAME_INTERVAL);
    host.detach();

    let arcs = batch.len();
    let bytes = batch.finish();
    let tally = listener.tally.lock();
    info!(
        frames_drawn = host.frames_drawn(),
        arcs,
        instance_bytes = bytes.len(),
        ?tally,
        "Showcase finished"
    );
}
