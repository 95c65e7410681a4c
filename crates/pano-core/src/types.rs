//! Data model shared by the projector, hit tester, renderer and navigator.
//!
//! Host-facing records derive serde so the browser binding can accept them
//! as JSON. Per-frame records (`ProjectedMarker`, `GroundCursor`) are rebuilt
//! every frame and never persisted.

use serde::{Deserialize, Serialize};

use crate::error::{finite, positive, ConfigError};

/// Per-photo camera calibration snapshot. Replaced wholesale, never patched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    pub lon: f64,
    pub lat: f64,
    pub ele: f64,
    /// Compass heading of the image's center column, degrees.
    pub heading: f64,
    /// Camera height above ground, meters.
    pub height: f64,
    #[serde(default)]
    pub mesh_rotation_y: f64,
    #[serde(default)]
    pub mesh_rotation_x: f64,
    #[serde(default)]
    pub mesh_rotation_z: f64,
    #[serde(default = "one")]
    pub distance_scale: f64,
    #[serde(default = "one")]
    pub marker_scale: f64,
}

fn one() -> f64 {
    1.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lon: 0.0,
            lat: 0.0,
            ele: 0.0,
            heading: 0.0,
            height: 2.5,
            mesh_rotation_y: 0.0,
            mesh_rotation_x: 0.0,
            mesh_rotation_z: 0.0,
            distance_scale: 1.0,
            marker_scale: 1.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("lon", self.lon)?;
        finite("lat", self.lat)?;
        finite("ele", self.ele)?;
        finite("heading", self.heading)?;
        positive("height", self.height)?;
        finite("meshRotationY", self.mesh_rotation_y)?;
        finite("meshRotationX", self.mesh_rotation_x)?;
        finite("meshRotationZ", self.mesh_rotation_z)?;
        positive("distanceScale", self.distance_scale)?;
        positive("markerScale", self.marker_scale)?;
        Ok(())
    }

    /// Returns a copy with a new camera height, used for live slider previews.
    pub fn with_height(self, height: f64) -> Self {
        Self { height, ..self }
    }

    /// Mesh rotation (x, y, z) in radians for the sphere renderer.
    pub fn mesh_rotation(&self) -> [f64; 3] {
        [self.mesh_rotation_x, self.mesh_rotation_y, self.mesh_rotation_z]
    }
}

/// Ground-plane placement that replaces geographic projection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundOverride {
    pub bearing_deg: f64,
    pub ground_distance_m: f64,
    #[serde(default)]
    pub height_m: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub ele: f64,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub is_next: bool,
    #[serde(default)]
    pub is_original: bool,
    #[serde(default)]
    pub hidden: bool,
    /// Persisted override, before any in-session edit.
    #[serde(default, rename = "override")]
    pub ground_override: Option<GroundOverride>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPhoto {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub ele: f64,
    #[serde(default)]
    pub display_name: String,
}

/// Orientation reported by the panorama renderer for one displayed frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Viewer-local yaw (radians), relative to the image center column.
    pub yaw: f64,
    pub pitch: f64,
    pub fov: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerKind {
    Navigation,
    Nearby,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedMarker {
    pub id: String,
    pub screen_x: f64,
    pub screen_y: f64,
    pub distance: f64,
    pub radius: f64,
    pub flatten_y: f64,
    pub visible: bool,
    pub kind: MarkerKind,
    pub hidden: bool,
    pub is_next: bool,
}

impl ProjectedMarker {
    /// Same ellipse the renderer draws: `(dx/r)² + (dy/(r·f))² ≤ 1`.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !self.visible || self.radius <= 0.0 {
            return false;
        }
        let rx = self.radius;
        let ry = self.radius * self.flatten_y.max(f64::EPSILON);
        let dx = (x - self.screen_x) / rx;
        let dy = (y - self.screen_y) / ry;
        dx * dx + dy * dy <= 1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundCursor {
    pub screen_x: f64,
    pub screen_y: f64,
    pub flatten_y: f64,
    /// Screen-space angle (radians, clockwise from up) toward the nearest target.
    pub arrow_angle: Option<f64>,
    /// Ground distance from the camera foot point, meters.
    pub distance: f64,
    pub fov: f64,
    pub radius: f64,
}

/// Set-from-click result handed to the panel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideProposal {
    pub bearing_deg: f64,
    pub ground_distance_m: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerStyle {
    #[default]
    Default,
    Pointer,
    Crosshair,
}

impl PointerStyle {
    pub fn css(self) -> &'static str {
        match self {
            PointerStyle::Default => "default",
            PointerStyle::Pointer => "pointer",
            PointerStyle::Crosshair => "crosshair",
        }
    }
}

pub fn parse_camera_config(json: &str) -> Result<CameraConfig, ConfigError> {
    let cfg: CameraConfig = serde_json::from_str(json).map_err(|source| ConfigError::Json {
        what: "camera config",
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn parse_targets(json: &str) -> Result<Vec<Target>, ConfigError> {
    serde_json::from_str(json).map_err(|source| ConfigError::Json {
        what: "targets",
        source,
    })
}

pub fn parse_nearby_photos(json: &str) -> Result<Vec<NearbyPhoto>, ConfigError> {
    serde_json::from_str(json).map_err(|source| ConfigError::Json {
        what: "nearby photos",
        source,
    })
}
