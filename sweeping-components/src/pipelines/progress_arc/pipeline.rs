//! Packing arc commands into GPU instance data.

use sweeping_ui::StrokeCap;

use super::command::ProgressArcCommand;

/// Per-arc instance data in the layout a GPU arc shader reads.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ArcInstance {
    /// `[left, top, right, bottom]` in physical pixels.
    pub bounds: [f32; 4],
    /// RGBA, channels as stored in the paint's [`Color`](sweeping_ui::Color).
    pub color: [f32; 4],
    /// Stroke width in physical pixels.
    pub stroke_width: f32,
    /// Start angle in degrees.
    pub start_angle_degrees: f32,
    /// Sweep angle in degrees.
    pub sweep_angle_degrees: f32,
    /// `0` butt, `1` round, `2` square.
    pub cap: u32,
}

fn cap_code(cap: StrokeCap) -> u32 {
    match cap {
        StrokeCap::Butt => 0,
        StrokeCap::Round => 1,
        StrokeCap::Square => 2,
    }
}

fn build_instances(commands: &[ProgressArcCommand]) -> Vec<ArcInstance> {
    commands
        .iter()
        .filter(|command| !command.bounds.is_empty())
        .map(|command| ArcInstance {
            bounds: [
                command.bounds.left,
                command.bounds.top,
                command.bounds.right,
                command.bounds.bottom,
            ],
            color: command.paint.color.to_array(),
            stroke_width: command.paint.stroke_width,
            start_angle_degrees: command.start_angle_degrees,
            sweep_angle_degrees: command.sweep_angle_degrees,
            cap: cap_code(command.paint.cap),
        })
        .collect()
}

/// Collects arc commands for one frame and packs them for upload.
#[derive(Debug, Default, Clone)]
pub struct ArcBatch {
    commands: Vec<ProgressArcCommand>,
}

impl ArcBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `command`.
    pub fn push(&mut self, command: ProgressArcCommand) {
        self.commands.push(command);
    }

    /// Number of queued commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Instance data for every queued arc with non-empty bounds.
    pub fn instances(&self) -> Vec<ArcInstance> {
        build_instances(&self.commands)
    }

    /// Drains the batch into raw instance bytes.
    pub fn finish(&mut self) -> Vec<u8> {
        let instances = build_instances(&self.commands);
        self.commands.clear();
        bytemuck::cast_slice(&instances).to_vec()
    }
}
