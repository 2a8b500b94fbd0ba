//! The draw command a progress indicator emits each frame.

use sweeping_ui::{ArcBounds, Canvas, DrawCommand, Paint};

/// Draw command for a single progress arc stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressArcCommand {
    /// Oval the arc is drawn on.
    pub bounds: ArcBounds,
    /// Start angle in degrees, clockwise from three o'clock.
    pub start_angle_degrees: f32,
    /// Sweep angle in degrees.
    pub sweep_angle_degrees: f32,
    /// Stroke paint.
    pub paint: Paint,
}

impl ProgressArcCommand {
    /// Replays the command on `canvas` as an open arc.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_arc(
            self.bounds,
            self.start_angle_degrees,
            self.sweep_angle_degrees,
            false,
            &self.paint,
        );
    }

    /// Recovers the arc from a recorded draw call.
    ///
    /// Returns `None` for arcs closed through the center, which a progress
    /// stroke never is.
    pub fn from_draw_command(command: &DrawCommand) -> Option<Self> {
        match *command {
            DrawCommand::Arc {
                bounds,
                start_angle_degrees,
                sweep_angle_degrees,
                use_center: false,
                paint,
            } => Some(Self {
                bounds,
                start_angle_degrees,
                sweep_angle_degrees,
                paint,
            }),
            DrawCommand::Arc { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use sweeping_ui::{Color, RecordingCanvas};

    use super::*;

    #[test]
    fn test_draw_replays_open_arc() {
        let command = ProgressArcCommand {
            bounds: ArcBounds::new(8.0, 8.0, 92.0, 92.0),
            start_angle_degrees: 30.0,
            sweep_angle_degrees: 180.0,
            paint: Paint::stroke(Color::BLUE, 8.0),
        };
        let mut canvas = RecordingCanvas::new();
        command.draw(&mut canvas);

        let recorded = canvas.take_commands();
        assert_eq!(recorded.len(), 1);
        assert_eq!(
            ProgressArcCommand::from_draw_command(&recorded[0]),
            Some(command)
        );
    }

    #[test]
    fn test_closed_arcs_are_not_progress_arcs() {
        let command = DrawCommand::Arc {
            bounds: ArcBounds::default(),
            start_angle_degrees: 0.0,
            sweep_angle_degrees: 90.0,
            use_center: true,
            paint: Paint::default(),
        };
        assert_eq!(ProgressArcCommand::from_draw_command(&command), None);
    }
}
