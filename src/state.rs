use crate::dispatch;
use crate::dom;
use crate::hint;
use crate::overlay;
use crate::panel::{self, EventQueue, JsCallbacks};
use crate::surface::Canvas2dSurface;
use pano_core::{Navigator, ViewState};
use std::cell::{Cell, RefCell};
use wasm_bindgen::JsValue;

/// Everything the exported class, DOM listeners and frame driver share.
pub struct Shared {
    pub navigator: RefCell<Navigator>,
    pub surface: RefCell<Canvas2dSurface>,
    pub events: EventQueue,
    pub js: JsCallbacks,
    pub camera_getter: RefCell<Option<js_sys::Function>>,
    pub last_hint: RefCell<String>,
    pub disposed: Cell<bool>,
}

impl Shared {
    /// Orientation to resolve a click against: the host's live camera when a
    /// getter is installed, otherwise the last drawn frame.
    pub fn click_view(&self) -> Option<ViewState> {
        let live = dispatch::current_handler(&self.camera_getter)
            .and_then(|f| match f.call0(&JsValue::NULL) {
                Ok(v) => view_from_js(&v),
                Err(e) => {
                    log::warn!("[panel] camera getter threw: {:?}", e);
                    None
                }
            });
        live.or_else(|| self.navigator.borrow().last_view())
    }

    /// Delivers queued callbacks and refreshes the hint. Must run with no
    /// navigator borrow outstanding.
    pub fn after_interaction(&self) {
        panel::flush(&self.events, &self.js);
        self.refresh_hint();
    }

    pub fn refresh_hint(&self) {
        let text = {
            let nav = self.navigator.borrow();
            let name = nav.hovered_id().and_then(|id| nav.display_name(id));
            hint::hint_text(nav.is_set_from_click(), nav.context().nearby_preview, name)
        };
        if *self.last_hint.borrow() == text {
            return;
        }
        if let Some(document) = dom::window_document() {
            overlay::update_hint(&document, &text);
        }
        *self.last_hint.borrow_mut() = text;
    }
}

fn view_from_js(value: &JsValue) -> Option<ViewState> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    let json: String = js_sys::JSON::stringify(value).ok()?.into();
    match serde_json::from_str::<ViewState>(&json) {
        Ok(view) => Some(view),
        Err(e) => {
            log::warn!("[panel] camera getter returned {}: {}", json, e);
            None
        }
    }
}
