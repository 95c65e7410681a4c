use serde::Deserialize;

use crate::constants::*;
use crate::error::{positive, ConfigError};

/// Host-tunable navigator behavior. Every field defaults to its constant.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigatorSettings {
    pub fov_hide_deg: f64,
    pub fov_full_deg: f64,
    pub nav_marker_radius_m: f64,
    pub nearby_marker_radius_m: f64,
    pub hover_scale: f64,
    pub hover_lerp: f64,
    pub click_tolerance_px: f64,
    pub cursor_snap_px: f64,
    pub grid_radii_m: Vec<f64>,
    pub grid_bearing_count: usize,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            fov_hide_deg: FOV_HIDE_DEG,
            fov_full_deg: FOV_FULL_DEG,
            nav_marker_radius_m: NAV_MARKER_RADIUS_M,
            nearby_marker_radius_m: NEARBY_MARKER_RADIUS_M,
            hover_scale: HOVER_SCALE,
            hover_lerp: HOVER_LERP,
            click_tolerance_px: CLICK_TOLERANCE_PX,
            cursor_snap_px: CURSOR_SNAP_PX,
            grid_radii_m: GRID_RADII_M.to_vec(),
            grid_bearing_count: GRID_BEARING_COUNT,
        }
    }
}

impl NavigatorSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fovHideDeg", self.fov_hide_deg)?;
        positive("fovFullDeg", self.fov_full_deg)?;
        if self.fov_hide_deg >= self.fov_full_deg {
            return Err(ConfigError::FovThresholds {
                hide: self.fov_hide_deg,
                full: self.fov_full_deg,
            });
        }
        positive("navMarkerRadiusM", self.nav_marker_radius_m)?;
        positive("nearbyMarkerRadiusM", self.nearby_marker_radius_m)?;
        positive("hoverScale", self.hover_scale)?;
        positive("hoverLerp", self.hover_lerp)?;
        if self.hover_lerp > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "hoverLerp",
                value: self.hover_lerp,
            });
        }
        positive("clickTolerancePx", self.click_tolerance_px)?;
        positive("cursorSnapPx", self.cursor_snap_px)?;
        if self.grid_radii_m.is_empty() || self.grid_bearing_count == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        for r in &self.grid_radii_m {
            positive("gridRadiiM", *r)?;
        }
        Ok(())
    }

    /// Marker size multiplier for the current zoom: 0 below the hide
    /// threshold, 1 above the full threshold, linear in between.
    pub fn fov_scale(&self, fov_deg: f64) -> f64 {
        ((fov_deg - self.fov_hide_deg) / (self.fov_full_deg - self.fov_hide_deg)).clamp(0.0, 1.0)
    }
}

pub fn parse_settings(json: &str) -> Result<NavigatorSettings, ConfigError> {
    let settings: NavigatorSettings =
        serde_json::from_str(json).map_err(|source| ConfigError::Json {
            what: "settings",
            source,
        })?;
    settings.validate()?;
    Ok(settings)
}
