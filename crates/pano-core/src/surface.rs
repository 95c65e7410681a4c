//! Drawing seam between the marker renderer and a concrete 2D backend.

use crate::types::PointerStyle;

/// Minimal immediate-mode 2D surface. Coordinates are canvas pixels.
/// Colors are CSS color strings.
pub trait DrawSurface {
    fn clear(&mut self, width: f64, height: f64);
    fn set_alpha(&mut self, alpha: f64);
    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: &str);
    fn stroke_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: &str, width: f64);
    fn stroke_polyline(&mut self, points: &[[f64; 2]], color: &str, width: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str);
    fn set_pointer_style(&mut self, style: PointerStyle);
}

/// One recorded surface call, used by tests and headless hosts.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Alpha(f64),
    FillEllipse { cx: f64, cy: f64, rx: f64, ry: f64, color: String },
    StrokeEllipse { cx: f64, cy: f64, rx: f64, ry: f64, color: String },
    Polyline { points: Vec<[f64; 2]>, color: String },
    Text { text: String, x: f64, y: f64 },
    Pointer(PointerStyle),
}

#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillEllipse { .. }))
    }

    pub fn last_pointer(&self) -> Option<PointerStyle> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::Pointer(p) => Some(*p),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.ops.push(DrawOp::Clear);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::Alpha(alpha));
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: &str) {
        self.ops.push(DrawOp::FillEllipse {
            cx,
            cy,
            rx,
            ry,
            color: color.to_string(),
        });
    }

    fn stroke_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: &str, _width: f64) {
        self.ops.push(DrawOp::StrokeEllipse {
            cx,
            cy,
            rx,
            ry,
            color: color.to_string(),
        });
    }

    fn stroke_polyline(&mut self, points: &[[f64; 2]], color: &str, _width: f64) {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _color: &str) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn set_pointer_style(&mut self, style: PointerStyle) {
        self.ops.push(DrawOp::Pointer(style));
    }
}
