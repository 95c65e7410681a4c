use crate::dom;
use crate::input;
use crate::state::Shared;
use pano_core::ClickOutcome;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer_handlers(shared: &Rc<Shared>, canvas: &web::HtmlCanvasElement) {
    wire_pointermove(shared, canvas);
    wire_pointerdown(shared, canvas);
    wire_pointerup(shared, canvas);
    wire_pointerleave(shared, canvas);
}

fn listen(
    canvas: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::PointerEvent)>);
    if let Err(e) = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::error!("[input] failed to listen for {}: {:?}", event, e);
    }
    closure.forget();
}

fn wire_pointermove(shared: &Rc<Shared>, canvas: &web::HtmlCanvasElement) {
    let s = shared.clone();
    let c = canvas.clone();
    listen(canvas, "pointermove", move |ev| {
        if s.disposed.get() {
            return;
        }
        let pos = input::pointer_css_px(&ev, &c, dom::device_pixel_ratio());
        s.navigator.borrow_mut().pointer_move(pos.x, pos.y);
    });
}

fn wire_pointerdown(shared: &Rc<Shared>, canvas: &web::HtmlCanvasElement) {
    let s = shared.clone();
    let c = canvas.clone();
    listen(canvas, "pointerdown", move |ev| {
        if s.disposed.get() || ev.button() != 0 {
            return;
        }
        let pos = input::pointer_css_px(&ev, &c, dom::device_pixel_ratio());
        s.navigator.borrow_mut().pointer_down(pos.x, pos.y);
    });
}

fn wire_pointerup(shared: &Rc<Shared>, canvas: &web::HtmlCanvasElement) {
    let s = shared.clone();
    let c = canvas.clone();
    listen(canvas, "pointerup", move |ev| {
        if s.disposed.get() || ev.button() != 0 {
            return;
        }
        let pos = input::pointer_css_px(&ev, &c, dom::device_pixel_ratio());
        let Some(view) = s.click_view() else {
            log::debug!("[input] click before first frame; ignored");
            return;
        };
        let outcome = s.navigator.borrow_mut().pointer_up(pos.x, pos.y, view);
        if outcome != ClickOutcome::Ignored {
            log::debug!("[input] click at ({:.0},{:.0}) -> {:?}", pos.x, pos.y, outcome);
        }
        s.after_interaction();
    });
}

fn wire_pointerleave(shared: &Rc<Shared>, canvas: &web::HtmlCanvasElement) {
    let s = shared.clone();
    listen(canvas, "pointerleave", move |_ev| {
        if s.disposed.get() {
            return;
        }
        s.navigator.borrow_mut().pointer_leave();
    });
}
