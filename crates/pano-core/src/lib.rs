//! Projection, hit testing, marker rendering and interaction state for
//! calibrating navigation links over a live 360° panorama view.
//!
//! Nothing here touches a platform API: drawing goes through [`DrawSurface`]
//! and camera orientation arrives as [`ViewState`] once per frame.

pub mod constants;
pub mod error;
pub mod navigator;
pub mod overrides;
pub mod projector;
pub mod renderer;
pub mod settings;
pub mod surface;
pub mod types;

pub use constants::*;
pub use error::ConfigError;
pub use hit_test::HitTester;
pub use navigator::{
    route_click, ClickOutcome, HitKind, InteractionMode, Navigator, NavigatorCallbacks,
    NavigatorContext, Route, TargetCallback, WorldView,
};
pub use overrides::{parse_override, resolve_override, Override};
pub use projector::{geo_to_local_meters, Projector, ScreenPoint, Spherical};
pub use renderer::{MarkerRenderer, Scene};
pub use settings::{parse_settings, NavigatorSettings};
pub use surface::{DrawOp, DrawSurface, RecordingSurface};
pub use types::*;
