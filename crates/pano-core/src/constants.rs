// Shared projection/interaction tuning constants used by the core and the web frontend.

// Geography
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// Marker sizing (screen pixels)
pub const MARKER_RADIUS_MIN_PX: f64 = 6.0;
pub const MARKER_RADIUS_MAX_PX: f64 = 64.0;
pub const MIN_SLANT_DISTANCE_M: f64 = 0.1; // floor for perspective division
pub const NAV_MARKER_RADIUS_M: f64 = 0.6; // world-space radius of a navigation marker
pub const NEARBY_MARKER_RADIUS_M: f64 = 0.4; // world-space radius of a nearby-photo marker

// Ground-plane foreshortening
pub const FLATTEN_MIN: f64 = 0.15;
pub const FLATTEN_MAX: f64 = 0.9;

// Frustum rim tolerance, in degrees of view angle
pub const FRUSTUM_MARGIN_DEG: f64 = 5.0;

// FOV gate: hidden below HIDE, linearly grown up to FULL
pub const FOV_HIDE_DEG: f64 = 12.0;
pub const FOV_FULL_DEG: f64 = 24.0;

// Hover animation
pub const HOVER_SCALE: f64 = 1.25;
pub const HOVER_LERP: f64 = 0.2; // per-frame interpolation factor
pub const HOVER_SETTLE_EPS: f64 = 1e-3; // entries closer than this to 1.0 are evicted

// Interaction
pub const CLICK_TOLERANCE_PX: f64 = 5.0; // max pointer travel for a click (else drag)
pub const CURSOR_SNAP_PX: f64 = 8.0; // find_closest cutoff beyond the marker rim

// Ground cursor
pub const CURSOR_RADIUS_M: f64 = 0.35;
pub const CURSOR_ARROW_LEN_PX: f64 = 18.0;

// Ground grid
pub const GRID_RADII_M: [f64; 10] = [2.0, 5.0, 10.0, 20.0, 30.0, 50.0, 75.0, 100.0, 200.0, 300.0];
pub const GRID_BEARING_COUNT: usize = 36;
pub const GRID_RING_SEGMENTS: usize = 72;
pub const GRID_RADIAL_STEPS: usize = 48;

// Rendering
pub const HIDDEN_ALPHA: f64 = 0.35;
pub const GLOW_WIDTH_PX: f64 = 3.0;
pub const INNER_DOT_RATIO: f64 = 0.35;
pub const LABEL_OFFSET_PX: f64 = 14.0;

// Palette (CSS colors understood by the canvas surface)
pub const COLOR_MARKER_FILL: &str = "rgba(255, 255, 255, 0.55)";
pub const COLOR_MARKER_EDGE: &str = "rgba(20, 24, 32, 0.85)";
pub const COLOR_NEARBY_FILL: &str = "rgba(120, 190, 255, 0.45)";
pub const COLOR_SELECTED: &str = "#ffb020"; // calibration selection
pub const COLOR_HOVER: &str = "#4fd1ff"; // hover / cursor-nearest
pub const COLOR_PLAIN_DOT: &str = "#2b6cb0";
pub const COLOR_NEXT_DOT: &str = "#38a169";
pub const COLOR_HIDDEN_MARK: &str = "#e53e3e";
pub const COLOR_CURSOR: &str = "rgba(255, 255, 255, 0.9)";
pub const COLOR_GRID: &str = "rgba(255, 255, 255, 0.18)";
pub const COLOR_LABEL: &str = "#f7fafc";
