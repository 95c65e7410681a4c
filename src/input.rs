use glam::DVec2;
use web_sys as web;

/// Maps a client-space position into a surface of `target_size` laid over
/// the CSS box at `rect_origin` with size `rect_size`.
#[inline]
pub fn client_to_surface_px(
    client: DVec2,
    rect_origin: DVec2,
    rect_size: DVec2,
    target_size: DVec2,
) -> DVec2 {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return DVec2::ZERO;
    }
    (client - rect_origin) / rect_size * target_size
}

/// Logical (CSS pixel) size of a canvas whose backing store is scaled by `dpr`.
#[inline]
pub fn css_size(backing: (u32, u32), dpr: f64) -> DVec2 {
    let dpr = if dpr > 0.0 { dpr } else { 1.0 };
    DVec2::new(backing.0 as f64, backing.1 as f64) / dpr
}

/// Pointer position in the canvas's CSS pixels, the space the navigator
/// works in. Device pixel scaling is applied by the draw surface.
#[inline]
pub fn pointer_css_px(
    ev: &web::PointerEvent,
    canvas: &web::HtmlCanvasElement,
    dpr: f64,
) -> DVec2 {
    let rect = canvas.get_bounding_client_rect();
    client_to_surface_px(
        DVec2::new(ev.client_x() as f64, ev.client_y() as f64),
        DVec2::new(rect.left(), rect.top()),
        DVec2::new(rect.width(), rect.height()),
        css_size((canvas.width(), canvas.height()), dpr),
    )
}
