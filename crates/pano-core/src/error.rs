//! Configuration errors.
//!
//! Projection, hit testing and rendering never fail; geometric degeneracies
//! come back as `None` or `visible == false`. Only host-supplied data that
//! cannot be used at all is rejected here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("field `{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("field `{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("field `{field}` out of range, got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("fov thresholds inverted: hide {hide}° must be below full {full}°")]
    FovThresholds { hide: f64, full: f64 },

    #[error("ground grid needs at least one radius and one bearing")]
    EmptyGrid,

    #[error("malformed {what} payload: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
