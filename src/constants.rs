/// Browser-side tuning for the overlay canvas and its DOM hooks.
///
/// Geometry and interaction constants live in `pano_core::constants`; this
/// file only covers what the host page and frame loop need.
// Warn when a single overlay frame takes longer than this (milliseconds)
pub const FRAME_BUDGET_MS: f64 = 8.0;

// Backing store is capped so very dense displays do not allocate huge canvases
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Element ids the host page may provide
pub const HINT_ELEMENT_ID: &str = "pano-hint";

// Marker label font in CSS pixels; the canvas transform handles density
pub const LABEL_FONT_PX: f64 = 12.0;
pub const LABEL_FONT_FAMILY: &str = "system-ui, sans-serif";

// Hint copy
pub const HINT_NORMAL: &str = "Click a marker to select it, click again to go there";
pub const HINT_SET_FROM_CLICK: &str = "Click the ground where this link should point (Esc cancels)";
pub const HINT_PREVIEW_SUFFIX: &str = " | nearby photos shown";
