//! Marker, ground-cursor and ground-grid drawing.
//!
//! Draw order: grid, nearby markers (far to near), navigation markers (far
//! to near), ground cursor. The only state kept between frames is the
//! per-marker hover scale.

use fnv::FnvHashMap;

use crate::constants::*;
use crate::surface::DrawSurface;
use crate::types::{GroundCursor, MarkerKind, ProjectedMarker};

/// Everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub width: f64,
    pub height: f64,
    pub markers: &'a [ProjectedMarker],
    pub cursor: Option<&'a GroundCursor>,
    pub grid: &'a [Vec<[f64; 2]>],
    pub show_nearby: bool,
    pub hovered_id: Option<&'a str>,
    pub cursor_nearest_id: Option<&'a str>,
    pub selected_id: Option<&'a str>,
    pub label: Option<&'a str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    Selected,
    Hover,
    Plain,
}

impl Highlight {
    fn ring_color(self) -> Option<&'static str> {
        match self {
            Highlight::Selected => Some(COLOR_SELECTED),
            Highlight::Hover => Some(COLOR_HOVER),
            Highlight::Plain => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MarkerRenderer {
    hover_scales: FnvHashMap<String, f64>,
    hover_scale: f64,
    hover_lerp: f64,
}

impl Default for MarkerRenderer {
    fn default() -> Self {
        Self::new(HOVER_SCALE, HOVER_LERP)
    }
}

impl MarkerRenderer {
    pub fn new(hover_scale: f64, hover_lerp: f64) -> Self {
        Self {
            hover_scales: FnvHashMap::default(),
            hover_scale,
            hover_lerp: hover_lerp.clamp(0.0, 1.0),
        }
    }

    /// Current animated scale for a marker (1.0 when settled).
    pub fn scale_of(&self, id: &str) -> f64 {
        self.hover_scales.get(id).copied().unwrap_or(1.0)
    }

    pub fn animating(&self) -> usize {
        self.hover_scales.len()
    }

    pub fn highlight_for(scene: &Scene<'_>, marker: &ProjectedMarker) -> Highlight {
        let id = Some(marker.id.as_str());
        if marker.kind == MarkerKind::Navigation && id == scene.selected_id {
            Highlight::Selected
        } else if id == scene.hovered_id
            || (marker.kind == MarkerKind::Navigation && id == scene.cursor_nearest_id)
        {
            Highlight::Hover
        } else {
            Highlight::Plain
        }
    }

    fn step_hover(&mut self, scene: &Scene<'_>) {
        self.hover_scales
            .retain(|id, _| scene.markers.iter().any(|m| &m.id == id));
        for m in scene.markers.iter().filter(|m| m.visible) {
            let target = if Some(m.id.as_str()) == scene.hovered_id {
                self.hover_scale
            } else {
                1.0
            };
            let cur = self.scale_of(&m.id);
            let next = cur + (target - cur) * self.hover_lerp;
            if target == 1.0 && (next - 1.0).abs() < HOVER_SETTLE_EPS {
                self.hover_scales.remove(&m.id);
            } else {
                self.hover_scales.insert(m.id.clone(), next);
            }
        }
    }

    pub fn draw(&mut self, surface: &mut dyn DrawSurface, scene: &Scene<'_>) {
        self.step_hover(scene);
        surface.clear(scene.width, scene.height);

        for line in scene.grid {
            surface.stroke_polyline(line, COLOR_GRID, 1.0);
        }

        let mut ordered: Vec<&ProjectedMarker> =
            scene.markers.iter().filter(|m| m.visible).collect();
        ordered.sort_by(|a, b| b.distance.total_cmp(&a.distance));

        if scene.show_nearby {
            for m in ordered.iter().filter(|m| m.kind == MarkerKind::Nearby) {
                self.draw_marker(surface, scene, m);
            }
        }
        for m in ordered.iter().filter(|m| m.kind == MarkerKind::Navigation) {
            self.draw_marker(surface, scene, m);
        }

        if let Some(cursor) = scene.cursor {
            draw_cursor(surface, cursor);
        }
    }

    fn draw_marker(&self, surface: &mut dyn DrawSurface, scene: &Scene<'_>, m: &ProjectedMarker) {
        let scale = self.scale_of(&m.id);
        let rx = m.radius * scale;
        let ry = rx * m.flatten_y;
        let (cx, cy) = (m.screen_x, m.screen_y);
        let highlight = Self::highlight_for(scene, m);

        if m.hidden {
            surface.set_alpha(HIDDEN_ALPHA);
        }

        if let Some(ring) = highlight.ring_color() {
            let glow = GLOW_WIDTH_PX * scale;
            surface.stroke_ellipse(cx, cy, rx + glow, ry + glow * m.flatten_y, ring, GLOW_WIDTH_PX);
        }

        let fill = match m.kind {
            MarkerKind::Navigation => COLOR_MARKER_FILL,
            MarkerKind::Nearby => COLOR_NEARBY_FILL,
        };
        surface.fill_ellipse(cx, cy, rx, ry, fill);
        surface.stroke_ellipse(cx, cy, rx, ry, COLOR_MARKER_EDGE, 1.5);

        let dot = match highlight {
            Highlight::Selected => COLOR_SELECTED,
            Highlight::Hover => COLOR_HOVER,
            Highlight::Plain if m.is_next => COLOR_NEXT_DOT,
            Highlight::Plain => COLOR_PLAIN_DOT,
        };
        surface.fill_ellipse(cx, cy, rx * INNER_DOT_RATIO, ry * INNER_DOT_RATIO, dot);

        if m.hidden {
            let k = std::f64::consts::FRAC_1_SQRT_2;
            surface.set_alpha(1.0);
            surface.stroke_polyline(
                &[[cx - rx * k, cy - ry * k], [cx + rx * k, cy + ry * k]],
                COLOR_HIDDEN_MARK,
                2.0,
            );
        }

        if highlight != Highlight::Plain && Some(m.id.as_str()) == scene.hovered_id {
            if let Some(text) = scene.label.filter(|t| !t.is_empty()) {
                surface.fill_text(text, cx, cy + ry + LABEL_OFFSET_PX, COLOR_LABEL);
            }
        }
    }
}

fn draw_cursor(surface: &mut dyn DrawSurface, c: &GroundCursor) {
    let rx = c.radius;
    let ry = rx * c.flatten_y;
    surface.stroke_ellipse(c.screen_x, c.screen_y, rx, ry, COLOR_CURSOR, 2.0);
    surface.fill_ellipse(c.screen_x, c.screen_y, 2.0, 2.0, COLOR_CURSOR);
    if let Some(angle) = c.arrow_angle {
        let (s, co) = angle.sin_cos();
        let tip = [
            c.screen_x + s * (rx + CURSOR_ARROW_LEN_PX),
            c.screen_y - co * (ry + CURSOR_ARROW_LEN_PX),
        ];
        let base = [c.screen_x + s * rx, c.screen_y - co * ry];
        surface.stroke_polyline(&[base, tip], COLOR_CURSOR, 2.0);
    }
}
