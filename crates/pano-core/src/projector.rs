//! Coordinate transforms between geographic, local-meter, camera and screen space.
//!
//! World frame: camera at the origin, `+x` east, `+y` up, `+z` south, so true
//! north sits on `-z`. Camera frame looks down `-z`. Yaw rotates about `+y`,
//! pitch about `+x` (positive pitch looks up). The ground plane is
//! `y = -camera_height`.

use glam::{DVec2, DVec3};

use crate::constants::*;
use crate::types::{CameraConfig, GroundOverride};

/// Result of projecting one world point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// 3D distance from the camera; valid even when `visible` is false.
    pub distance: f64,
    pub visible: bool,
}

/// A direction under the pointer, as a compass heading and elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub heading_deg: f64,
    pub pitch_rad: f64,
}

/// Equirectangular flat-earth offset of `(lon, lat)` from the reference point.
/// Returns `(x, z)` meters with `x` east and `z` south.
pub fn geo_to_local_meters(lon: f64, lat: f64, ref_lon: f64, ref_lat: f64) -> DVec2 {
    let d_lon = (lon - ref_lon).to_radians();
    let d_lat = (lat - ref_lat).to_radians();
    let x = d_lon * EARTH_RADIUS_M * ref_lat.to_radians().cos();
    let z = -d_lat * EARTH_RADIUS_M;
    DVec2::new(x, z)
}

/// Ground point `(x, z)` for a compass bearing and distance.
#[inline]
pub fn bearing_to_local(bearing_deg: f64, distance_m: f64) -> DVec2 {
    let b = bearing_deg.to_radians();
    DVec2::new(distance_m * b.sin(), -distance_m * b.cos())
}

/// Compass bearing in `[0, 360)` and ground distance of a local point.
#[inline]
pub fn local_to_bearing(p: DVec2) -> (f64, f64) {
    (normalize_deg(p.x.atan2(-p.y).to_degrees()), p.length())
}

#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

#[inline]
fn rotate_to_camera(p: DVec3, yaw: f64, pitch: f64) -> DVec3 {
    let (sy, cy) = yaw.sin_cos();
    let x1 = p.x * cy - p.z * sy;
    let z1 = p.x * sy + p.z * cy;
    let (sp, cp) = pitch.sin_cos();
    let y2 = p.y * cp + z1 * sp;
    let z2 = -p.y * sp + z1 * cp;
    DVec3::new(x1, y2, z2)
}

#[inline]
fn rotate_to_world(c: DVec3, yaw: f64, pitch: f64) -> DVec3 {
    let (sp, cp) = pitch.sin_cos();
    let y1 = c.y * cp - c.z * sp;
    let z1 = c.y * sp + c.z * cp;
    let (sy, cy) = yaw.sin_cos();
    let x = c.x * cy + z1 * sy;
    let z = -c.x * sy + z1 * cy;
    DVec3::new(x, y1, z)
}

/// Pure projection state: canvas size and the active camera config.
#[derive(Clone, Debug)]
pub struct Projector {
    width: f64,
    height: f64,
    config: Option<CameraConfig>,
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Projector {
    pub fn new(width: f64, height: f64) -> Self {
        let mut p = Self {
            width: 1.0,
            height: 1.0,
            config: None,
        };
        p.resize(width, height);
        p
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = if width.is_finite() { width.max(1.0) } else { 1.0 };
        self.height = if height.is_finite() { height.max(1.0) } else { 1.0 };
    }

    pub fn set_camera_config(&mut self, config: Option<CameraConfig>) {
        self.config = config;
    }

    pub fn camera_config(&self) -> Option<&CameraConfig> {
        self.config.as_ref()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn camera_height(&self) -> f64 {
        self.config.map(|c| c.height).unwrap_or(0.0)
    }

    fn marker_scale(&self) -> f64 {
        self.config.map(|c| c.marker_scale).unwrap_or(1.0)
    }

    #[inline]
    fn tan_half(fov_deg: f64) -> f64 {
        (fov_deg.to_radians() * 0.5).tan().max(1e-6)
    }

    /// Project a world point to pixels. Points behind the camera or past the
    /// frustum rim (plus `FRUSTUM_MARGIN_DEG / fov`) come back invisible.
    pub fn world_to_screen(
        &self,
        world: DVec3,
        yaw: f64,
        pitch: f64,
        fov_deg: f64,
    ) -> ScreenPoint {
        let distance = world.length();
        let cam = rotate_to_camera(world, yaw, pitch);
        if cam.z >= 0.0 {
            return ScreenPoint {
                x: 0.0,
                y: 0.0,
                distance,
                visible: false,
            };
        }
        let tan_half = Self::tan_half(fov_deg);
        let aspect = self.width / self.height;
        let depth = -cam.z;
        let ndc_x = cam.x / (depth * tan_half * aspect);
        let ndc_y = cam.y / (depth * tan_half);
        let limit = 1.0 + FRUSTUM_MARGIN_DEG / fov_deg.max(1e-6);
        let visible = ndc_x.abs() <= limit && ndc_y.abs() <= limit;
        ScreenPoint {
            x: (ndc_x + 1.0) * 0.5 * self.width,
            y: (1.0 - ndc_y) * 0.5 * self.height,
            distance,
            visible,
        }
    }

    /// World-space unit-less ray direction through a pixel.
    fn screen_ray(&self, sx: f64, sy: f64, yaw: f64, pitch: f64, fov_deg: f64) -> DVec3 {
        let tan_half = Self::tan_half(fov_deg);
        let aspect = self.width / self.height;
        let ndc_x = 2.0 * sx / self.width - 1.0;
        let ndc_y = 1.0 - 2.0 * sy / self.height;
        let cam = DVec3::new(ndc_x * tan_half * aspect, ndc_y * tan_half, -1.0);
        rotate_to_world(cam, yaw, pitch)
    }

    /// Intersect the pixel's ray with the ground plane. `None` when the ray
    /// never descends or the hit lies behind the camera.
    pub fn screen_to_ground(
        &self,
        sx: f64,
        sy: f64,
        yaw: f64,
        pitch: f64,
        fov_deg: f64,
    ) -> Option<DVec2> {
        self.config?;
        let dir = self.screen_ray(sx, sy, yaw, pitch, fov_deg);
        if dir.y >= 0.0 {
            return None;
        }
        let t = -self.camera_height() / dir.y;
        if t < 0.0 || !t.is_finite() {
            return None;
        }
        Some(DVec2::new(dir.x * t, dir.z * t))
    }

    pub fn screen_to_spherical(
        &self,
        sx: f64,
        sy: f64,
        yaw: f64,
        pitch: f64,
        fov_deg: f64,
    ) -> Spherical {
        let dir = self.screen_ray(sx, sy, yaw, pitch, fov_deg).normalize();
        Spherical {
            heading_deg: normalize_deg(dir.x.atan2(-dir.z).to_degrees()),
            pitch_rad: dir.y.clamp(-1.0, 1.0).asin(),
        }
    }

    /// Vertical squash for a ground-plane circle at `horizontal_distance`.
    pub fn flatten_ratio(&self, horizontal_distance: f64, pitch: f64) -> f64 {
        let h = self.camera_height().abs();
        let d = horizontal_distance.abs();
        let hyp = (h * h + d * d).sqrt();
        let base = if hyp > 1e-9 { h / hyp } else { 1.0 };
        let ratio = 1.0 - pitch.cos().abs() * (1.0 - base);
        ratio.clamp(FLATTEN_MIN, FLATTEN_MAX)
    }

    /// Physical marker size in pixels, clamped to `[MIN, MAX]`.
    pub fn marker_radius_px(&self, world_radius: f64, horizontal_distance: f64, fov_deg: f64) -> f64 {
        let focal = (self.height * 0.5) / Self::tan_half(fov_deg);
        let h = self.camera_height();
        let slant = (horizontal_distance * horizontal_distance + h * h)
            .sqrt()
            .max(MIN_SLANT_DISTANCE_M);
        let size = world_radius * self.marker_scale() * focal / slant;
        if size.is_finite() {
            size.clamp(MARKER_RADIUS_MIN_PX, MARKER_RADIUS_MAX_PX)
        } else {
            MARKER_RADIUS_MIN_PX
        }
    }

    /// World position of an override placement.
    pub fn override_world(&self, o: &GroundOverride) -> DVec3 {
        let p = bearing_to_local(o.bearing_deg, o.ground_distance_m);
        DVec3::new(p.x, -self.camera_height() + o.height_m, p.y)
    }

    /// World position of a geographic point, on the ground plane.
    pub fn geo_world(&self, lon: f64, lat: f64) -> Option<DVec3> {
        let cfg = self.config?;
        let p = geo_to_local_meters(lon, lat, cfg.lon, cfg.lat) * cfg.distance_scale;
        Some(DVec3::new(p.x, -cfg.height, p.y))
    }

    pub fn project_from_override(
        &self,
        o: &GroundOverride,
        yaw: f64,
        pitch: f64,
        fov_deg: f64,
    ) -> ScreenPoint {
        self.world_to_screen(self.override_world(o), yaw, pitch, fov_deg)
    }

    /// Project a point lying on the ground plane at local `(x, z)`.
    pub fn project_ground(&self, p: DVec2, yaw: f64, pitch: f64, fov_deg: f64) -> ScreenPoint {
        self.world_to_screen(
            DVec3::new(p.x, -self.camera_height(), p.y),
            yaw,
            pitch,
            fov_deg,
        )
    }
}
