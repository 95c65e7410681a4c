//! Effective override resolution.
//!
//! An in-session edit shadows the persisted value. `Cleared` is an explicit
//! edit that removes the override, which is different from "no edit".

use serde::{Deserialize, Serialize};

use crate::types::GroundOverride;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Override {
    #[default]
    None,
    Cleared,
    Set(GroundOverride),
}

/// Edited value if present, else the original, else nothing.
pub fn resolve_override(
    original: Option<GroundOverride>,
    edited: Override,
) -> Option<GroundOverride> {
    match edited {
        Override::Set(o) => Some(o),
        Override::Cleared => None,
        Override::None => original,
    }
}

pub fn parse_override(json: &str) -> Result<Override, crate::error::ConfigError> {
    serde_json::from_str(json).map_err(|source| crate::error::ConfigError::Json {
        what: "override edit",
        source,
    })
}
