use crate::dom;
use crate::keymap::{self, KeyAction};
use crate::overlay;
use crate::panel;
use crate::state::Shared;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn typing_into_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .is_some_and(|el| keymap::is_text_entry_tag(&el.tag_name()))
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, shared: &Shared) {
    if shared.disposed.get() || typing_into_field(ev) {
        return;
    }
    let Some(action) = keymap::action_for_key(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::CancelPlacement => {
            let mut nav = shared.navigator.borrow_mut();
            if !nav.is_set_from_click() {
                return;
            }
            nav.cancel_set_from_click();
        }
        KeyAction::ToggleGrid => {
            let mut nav = shared.navigator.borrow_mut();
            let visible = !nav.context().grid_visible;
            nav.set_ground_grid_visible(visible);
            log::info!("[keys] ground grid {}", if visible { "on" } else { "off" });
        }
        KeyAction::ToggleNearbyPreview => {
            let mut nav = shared.navigator.borrow_mut();
            let enabled = !nav.context().nearby_preview;
            let on_click = enabled.then(|| panel::queue_nearby_callback(&shared.events));
            nav.set_nearby_preview_mode(enabled, on_click);
        }
        KeyAction::ToggleHint => {
            if let Some(document) = dom::window_document() {
                overlay::toggle(&document);
            }
        }
    }
    ev.prevent_default();
    shared.after_interaction();
}

pub fn wire_global_keydown(shared: &Rc<Shared>) {
    let s = shared.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &s);
    }) as Box<dyn FnMut(web::KeyboardEvent)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
