use crate::constants::{LABEL_FONT_FAMILY, LABEL_FONT_PX};
use pano_core::{DrawSurface, PointerStyle};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// [`DrawSurface`] backed by a 2D canvas context. Callers draw in CSS
/// pixels; the context transform scales to the backing store. Cursor
/// changes go to the canvas element's inline style.
pub struct Canvas2dSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    font: String,
    dpr: f64,
}

impl Canvas2dSurface {
    pub fn new(canvas: web::HtmlCanvasElement, dpr: f64) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| anyhow::anyhow!("context is not 2d"))?;
        Ok(Self {
            canvas,
            ctx,
            font: label_font(),
            dpr,
        })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    pub fn context(&self) -> &web::CanvasRenderingContext2d {
        &self.ctx
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.dpr = dpr;
    }

    fn ellipse_path(&self, cx: f64, cy: f64, rx: f64, ry: f64) {
        self.ctx.begin_path();
        _ = self
            .ctx
            .ellipse(cx, cy, rx.max(0.0), ry.max(0.0), 0.0, 0.0, TAU);
    }
}

fn label_font() -> String {
    format!("{:.0}px {}", LABEL_FONT_PX, LABEL_FONT_FAMILY)
}

impl DrawSurface for Canvas2dSurface {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.ctx.set_global_alpha(1.0);
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        _ = self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0));
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: &str) {
        self.ellipse_path(cx, cy, rx, ry);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: &str, width: f64) {
        self.ellipse_path(cx, cy, rx, ry);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn stroke_polyline(&mut self, points: &[[f64; 2]], color: &str, width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first[0], first[1]);
        for p in rest {
            self.ctx.line_to(p[0], p[1]);
        }
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str) {
        self.ctx.set_font(&self.font);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("top");
        self.ctx.set_fill_style_str(color);
        _ = self.ctx.fill_text(text, x, y);
    }

    fn set_pointer_style(&mut self, style: PointerStyle) {
        _ = self.canvas.style().set_property("cursor", style.css());
    }
}
