#![cfg(target_arch = "wasm32")]
//! Browser binding for the panorama navigation overlay.
//!
//! The host page owns the panorama renderer and the calibration panel. It
//! constructs a [`PanoNavigator`] over a transparent canvas stacked on the
//! panorama and calls [`PanoNavigator::on_frame`] with the orientation of
//! every frame it draws.

use pano_core::{
    parse_camera_config, parse_nearby_photos, parse_override, parse_settings, parse_targets,
    Navigator, NavigatorSettings, ViewState,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod constants;
mod dispatch;
mod dom;
mod events;
mod frame;
mod hint;
mod input;
mod keymap;
mod overlay;
mod panel;
mod state;
mod surface;

use frame::FrameContext;
use panel::JsCallbacks;
use state::Shared;
use surface::Canvas2dSurface;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    log::error!("{}", e);
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pano-web loaded");
    Ok(())
}

#[wasm_bindgen]
pub struct PanoNavigator {
    shared: Rc<Shared>,
    frame: RefCell<FrameContext>,
}

#[wasm_bindgen]
impl PanoNavigator {
    /// `settings_json` optionally overrides tuning (camelCase keys).
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        on_navigate: js_sys::Function,
        on_target_select: js_sys::Function,
        on_set_from_click: js_sys::Function,
        settings_json: Option<String>,
    ) -> Result<PanoNavigator, JsValue> {
        let js = JsCallbacks {
            on_navigate,
            on_target_select,
            on_set_from_click,
            on_nearby_click: RefCell::new(None),
        };
        init(canvas_id, js, settings_json.as_deref()).map_err(js_error)
    }

    /// Replaces the camera config; `null` disables projection until a new
    /// one arrives.
    pub fn set_camera_config(&self, json: Option<String>) -> Result<(), JsValue> {
        let config = json
            .as_deref()
            .map(parse_camera_config)
            .transpose()
            .map_err(js_error)?;
        self.shared.navigator.borrow_mut().set_camera_config(config);
        Ok(())
    }

    /// Live camera-height preview while the panel's slider moves.
    pub fn preview_camera_height(&self, height: f64) -> Result<(), JsValue> {
        let mut nav = self.shared.navigator.borrow_mut();
        let Some(current) = nav.context().camera else {
            return Err(js_error("no camera config to preview against"));
        };
        let next = current.with_height(height);
        next.validate().map_err(js_error)?;
        nav.set_camera_config(Some(next));
        Ok(())
    }

    pub fn set_targets(&self, json: &str) -> Result<(), JsValue> {
        let targets = parse_targets(json).map_err(js_error)?;
        self.shared.navigator.borrow_mut().set_targets(targets);
        self.shared.refresh_hint();
        Ok(())
    }

    pub fn set_nearby_photos(&self, json: &str) -> Result<(), JsValue> {
        let photos = parse_nearby_photos(json).map_err(js_error)?;
        self.shared.navigator.borrow_mut().set_nearby_photos(photos);
        Ok(())
    }

    pub fn set_nearby_preview_mode(&self, enabled: bool, on_click: Option<js_sys::Function>) {
        *self.shared.js.on_nearby_click.borrow_mut() = on_click;
        let core_cb = enabled.then(|| panel::queue_nearby_callback(&self.shared.events));
        self.shared
            .navigator
            .borrow_mut()
            .set_nearby_preview_mode(enabled, core_cb);
        self.shared.refresh_hint();
    }

    pub fn set_ground_grid_visible(&self, visible: bool) {
        self.shared
            .navigator
            .borrow_mut()
            .set_ground_grid_visible(visible);
    }

    pub fn set_selected_target(&self, id: Option<String>) {
        self.shared.navigator.borrow_mut().set_selected_target(id);
        self.shared.refresh_hint();
    }

    /// `json` is a tagged edit: `{"kind":"none"}`, `{"kind":"cleared"}` or
    /// `{"kind":"set","bearingDeg":..,"groundDistanceM":..,"heightM":..}`.
    pub fn set_override_edit(&self, id: &str, json: &str) -> Result<(), JsValue> {
        let edit = parse_override(json).map_err(js_error)?;
        self.shared
            .navigator
            .borrow_mut()
            .set_override_edit(id, edit);
        Ok(())
    }

    pub fn clear_override_edits(&self) {
        self.shared.navigator.borrow_mut().clear_override_edits();
    }

    pub fn enter_set_from_click(&self) -> bool {
        let entered = self.shared.navigator.borrow_mut().enter_set_from_click();
        self.shared.refresh_hint();
        entered
    }

    pub fn cancel_set_from_click(&self) {
        self.shared.navigator.borrow_mut().cancel_set_from_click();
        self.shared.refresh_hint();
    }

    pub fn is_set_from_click(&self) -> bool {
        self.shared.navigator.borrow().is_set_from_click()
    }

    /// Installs a zero-argument function returning `{yaw, pitch, fov}` for
    /// the camera right now. Clicks resolve against it instead of the last
    /// drawn frame.
    pub fn set_camera_state_getter(&self, getter: Option<js_sys::Function>) {
        *self.shared.camera_getter.borrow_mut() = getter;
    }

    pub fn on_frame(&self, yaw: f64, pitch: f64, fov: f64) {
        self.frame.borrow_mut().frame(ViewState { yaw, pitch, fov });
        self.shared.after_interaction();
    }

    pub fn markers_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.shared.navigator.borrow().markers()).map_err(js_error)
    }

    pub fn hovered_id(&self) -> Option<String> {
        self.shared.navigator.borrow().hovered_id().map(str::to_string)
    }

    pub fn nearest_target_id(&self) -> Option<String> {
        self.shared
            .navigator
            .borrow()
            .nearest_target_id()
            .map(str::to_string)
    }

    pub fn cursor_nearest_target_id(&self) -> Option<String> {
        self.shared
            .navigator
            .borrow()
            .cursor_nearest_target_id()
            .map(str::to_string)
    }

    /// `[x, y, z]` mesh rotation in radians for the sphere renderer.
    pub fn mesh_rotation(&self) -> Option<Vec<f64>> {
        self.shared
            .navigator
            .borrow()
            .context()
            .camera
            .map(|c| c.mesh_rotation().to_vec())
    }

    /// Stops drawing and input handling. The canvas is left cleared.
    pub fn dispose(&self) {
        if self.shared.disposed.replace(true) {
            return;
        }
        let surface = self.shared.surface.borrow();
        let canvas = surface.canvas();
        let ctx = surface.context();
        ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        _ = canvas.style().set_property("cursor", "default");
        log::info!("[panel] navigator disposed");
    }
}

fn init(
    canvas_id: &str,
    js: JsCallbacks,
    settings_json: Option<&str>,
) -> anyhow::Result<PanoNavigator> {
    let settings = match settings_json {
        Some(json) => parse_settings(json)?,
        None => NavigatorSettings::default(),
    };
    let canvas = dom::canvas_by_id(canvas_id)?;
    dom::wire_window_resize(&canvas);
    let dpr = dom::device_pixel_ratio();
    let surface = Canvas2dSurface::new(canvas.clone(), dpr)?;

    let queue: panel::EventQueue = Rc::new(RefCell::new(VecDeque::new()));
    let mut navigator = Navigator::new(settings, panel::queue_callbacks(&queue));
    let size = input::css_size((canvas.width(), canvas.height()), dpr);
    navigator.resize(size.x, size.y);

    let shared = Rc::new(Shared {
        navigator: RefCell::new(navigator),
        surface: RefCell::new(surface),
        events: queue,
        js,
        camera_getter: RefCell::new(None),
        last_hint: RefCell::new(String::new()),
        disposed: Cell::new(false),
    });
    events::wire_pointer_handlers(&shared, &canvas);
    events::wire_global_keydown(&shared);
    shared.refresh_hint();

    log::info!(
        "[panel] navigator ready on #{} ({}x{})",
        canvas_id,
        canvas.width(),
        canvas.height()
    );
    Ok(PanoNavigator {
        frame: RefCell::new(FrameContext::new(shared.clone())),
        shared,
    })
}
