//! Drawing target abstraction
//!
//! The renderer only issues these three primitives. On the web they map onto
//! a 2D canvas context; `CommandBuffer` records them for tests and the
//! native harness.

use glam::Vec2;

use super::color::Paint;

/// Something the field can be drawn onto
pub trait Surface {
    /// Clear the rectangle (0, 0, width, height)
    fn clear(&mut self, width: f32, height: f32);

    /// Stroke an open polyline through `points`
    fn stroke_path(&mut self, points: &[Vec2], paint: Paint, line_width: f32);

    /// Fill an axis-aligned square with its top-left corner at `origin`
    fn fill_rect(&mut self, origin: Vec2, size: f32, paint: Paint);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Stroke {
        points: Vec<Vec2>,
        paint: Paint,
        line_width: f32,
    },
    Fill {
        origin: Vec2,
        size: f32,
        paint: Paint,
    },
}

impl DrawCommand {
    /// Number of line segments in a stroke (0 for other commands)
    pub fn segment_count(&self) -> usize {
        match self {
            DrawCommand::Stroke { points, .. } => points.len().saturating_sub(1),
            _ => 0,
        }
    }
}

/// Surface that records every call in order
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop recorded commands, keeping the allocation
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn strokes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. }))
    }
}

impl Surface for CommandBuffer {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn stroke_path(&mut self, points: &[Vec2], paint: Paint, line_width: f32) {
        self.commands.push(DrawCommand::Stroke {
            points: points.to_vec(),
            paint,
            line_width,
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: f32, paint: Paint) {
        self.commands.push(DrawCommand::Fill {
            origin,
            size,
            paint,
        });
    }
}

#[cfg(target_arch = "wasm32")]
impl Surface for web_sys::CanvasRenderingContext2d {
    fn clear(&mut self, width: f32, height: f32) {
        self.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn stroke_path(&mut self, points: &[Vec2], paint: Paint, line_width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.begin_path();
        self.set_stroke_style_str(&paint.css());
        self.set_line_width(line_width as f64);
        self.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.line_to(p.x as f64, p.y as f64);
        }
        self.stroke();
    }

    fn fill_rect(&mut self, origin: Vec2, size: f32, paint: Paint) {
        self.begin_path();
        self.rect(origin.x as f64, origin.y as f64, size as f64, size as f64);
        self.set_fill_style_str(&paint.css());
        self.fill();
    }
}
