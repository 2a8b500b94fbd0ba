//! Drawing surface abstraction.
//!
//! Views never talk to a graphics API directly. They describe what to draw on a
//! [`Canvas`], and the host decides how to rasterize it. [`RecordingCanvas`]
//! keeps the calls as [`DrawCommand`]s, which is what headless hosts and tests
//! inspect.

use crate::Color;

/// How the ends of an open stroke are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeCap {
    /// Flat ends that stop exactly at the path ends.
    Butt,
    /// Semicircular ends centered on the path ends.
    #[default]
    Round,
    /// Square ends that extend half the stroke width past the path ends.
    Square,
}

/// Whether a shape is filled or outlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintStyle {
    /// Fill the interior.
    Fill,
    /// Outline with the paint's stroke width.
    #[default]
    Stroke,
}

/// Style information for a draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// Color of the fill or stroke.
    pub color: Color,
    /// Fill or stroke.
    pub style: PaintStyle,
    /// Stroke width in physical pixels.
    pub stroke_width: f32,
    /// End cap for open strokes.
    pub cap: StrokeCap,
    /// Whether edges are anti-aliased.
    pub anti_alias: bool,
}

impl Paint {
    /// An anti-aliased stroke paint with round caps.
    pub fn stroke(color: Color, stroke_width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width,
            cap: StrokeCap::Round,
            anti_alias: true,
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::stroke(Color::BLACK, 1.0)
    }
}

/// Axis-aligned rectangle, in physical pixels, that an arc's oval is inscribed in.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ArcBounds {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl ArcBounds {
    /// Creates bounds from their four edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal extent. Negative when `right < left`.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent. Negative when `bottom < top`.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Returns `true` if the rectangle encloses no area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// A surface that accepts draw calls.
///
/// Angles are in degrees. Zero points along the positive x axis (three
/// o'clock) and positive sweeps run clockwise.
pub trait Canvas {
    /// Draws the arc of the oval inscribed in `bounds`, starting at
    /// `start_angle_degrees` and spanning `sweep_angle_degrees`.
    ///
    /// When `use_center` is true the arc is closed through the oval's center.
    fn draw_arc(
        &mut self,
        bounds: ArcBounds,
        start_angle_degrees: f32,
        sweep_angle_degrees: f32,
        use_center: bool,
        paint: &Paint,
    );
}

/// A draw call captured by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// See [`Canvas::draw_arc`].
    Arc {
        /// Oval bounds.
        bounds: ArcBounds,
        /// Start angle in degrees.
        start_angle_degrees: f32,
        /// Sweep angle in degrees.
        sweep_angle_degrees: f32,
        /// Whether the arc is closed through the center.
        use_center: bool,
        /// Paint used for the call.
        paint: Paint,
    },
}

/// A [`Canvas`] that records every call in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Creates an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Removes and returns the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Discards the recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn draw_arc(
        &mut self,
        bounds: ArcBounds,
        start_angle_degrees: f32,
        sweep_angle_degrees: f32,
        use_center: bool,
        paint: &Paint,
    ) {
        self.commands.push(DrawCommand::Arc {
            bounds,
            start_angle_degrees,
            sweep_angle_degrees,
            use_center,
            paint: *paint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_canvas_keeps_order() {
        let mut canvas = RecordingCanvas::new();
        let bounds = ArcBounds::new(8.0, 8.0, 92.0, 92.0);
        let paint = Paint::stroke(Color::RED, 8.0);
        canvas.draw_arc(bounds, 0.0, 90.0, false, &paint);
        canvas.draw_arc(bounds, 90.0, 45.0, false, &paint);

        let commands = canvas.take_commands();
        assert_eq!(commands.len(), 2);
        match &commands[1] {
            DrawCommand::Arc {
                start_angle_degrees,
                sweep_angle_degrees,
                ..
            } => {
                assert_eq!(*start_angle_degrees, 90.0);
                assert_eq!(*sweep_angle_degrees, 45.0);
            }
        }
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_arc_bounds_geometry() {
        let bounds = ArcBounds::new(10.0, 20.0, 50.0, 40.0);
        assert_eq!(bounds.width(), 40.0);
        assert_eq!(bounds.height(), 20.0);
        assert!(!bounds.is_empty());
        assert!(ArcBounds::new(10.0, 10.0, 5.0, 20.0).is_empty());
    }

    #[test]
    fn test_default_paint_is_round_stroke() {
        let paint = Paint::default();
        assert_eq!(paint.style, PaintStyle::Stroke);
        assert_eq!(paint.cap, StrokeCap::Round);
        assert!(paint.anti_alias);
    }
}
