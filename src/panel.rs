//! Bridge from navigator callbacks to the host page's JS functions.
//!
//! Core callbacks run while the navigator is mutably borrowed, so they only
//! enqueue. The queue is drained after the borrow ends, which lets a JS
//! handler call straight back into `PanoNavigator`.

use crate::dispatch;
use pano_core::{NavigatorCallbacks, OverrideProposal, TargetCallback};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::JsValue;

#[derive(Clone, Debug, PartialEq)]
pub enum PanelEvent {
    Navigate(String),
    TargetSelect(String),
    SetFromClick(String, OverrideProposal),
    NearbyClick(String),
}

pub type EventQueue = Rc<RefCell<VecDeque<PanelEvent>>>;

pub struct JsCallbacks {
    pub on_navigate: js_sys::Function,
    pub on_target_select: js_sys::Function,
    pub on_set_from_click: js_sys::Function,
    pub on_nearby_click: RefCell<Option<js_sys::Function>>,
}

pub fn queue_callbacks(queue: &EventQueue) -> NavigatorCallbacks {
    let q1 = queue.clone();
    let q2 = queue.clone();
    let q3 = queue.clone();
    NavigatorCallbacks {
        on_navigate: Box::new(move |id: &str| {
            q1.borrow_mut()
                .push_back(PanelEvent::Navigate(id.to_string()))
        }),
        on_target_select: Box::new(move |id: &str| {
            q2.borrow_mut()
                .push_back(PanelEvent::TargetSelect(id.to_string()))
        }),
        on_set_from_click: Box::new(move |id: &str, p: OverrideProposal| {
            q3.borrow_mut()
                .push_back(PanelEvent::SetFromClick(id.to_string(), p))
        }),
    }
}

pub fn queue_nearby_callback(queue: &EventQueue) -> TargetCallback {
    let q = queue.clone();
    Box::new(move |id: &str| {
        q.borrow_mut()
            .push_back(PanelEvent::NearbyClick(id.to_string()))
    })
}

/// Calls the JS handler for every queued event. Handler exceptions are
/// logged and do not stop the drain.
pub fn flush(queue: &EventQueue, js: &JsCallbacks) {
    dispatch::drain(queue, |ev| {
        let result = match &ev {
            PanelEvent::Navigate(id) => js
                .on_navigate
                .call1(&JsValue::NULL, &JsValue::from_str(id)),
            PanelEvent::TargetSelect(id) => js
                .on_target_select
                .call1(&JsValue::NULL, &JsValue::from_str(id)),
            PanelEvent::SetFromClick(id, proposal) => match proposal_to_js(proposal) {
                Ok(value) => js
                    .on_set_from_click
                    .call2(&JsValue::NULL, &JsValue::from_str(id), &value),
                Err(e) => Err(e),
            },
            // The handler commonly turns preview off, which replaces itself.
            PanelEvent::NearbyClick(id) => {
                match dispatch::current_handler(&js.on_nearby_click) {
                    Some(f) => f.call1(&JsValue::NULL, &JsValue::from_str(id)),
                    None => Ok(JsValue::UNDEFINED),
                }
            }
        };
        if let Err(e) = result {
            log::error!("[panel] handler for {:?} threw: {:?}", ev, e);
        }
    });
}

fn proposal_to_js(proposal: &OverrideProposal) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(proposal).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}
