// Host-side tests for callback queue draining.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod dispatch {
    include!("../src/dispatch.rs");
}

use dispatch::*;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[test]
fn drains_in_order_including_events_queued_by_handlers() {
    let queue = RefCell::new(VecDeque::from(vec![1, 2]));
    let mut seen = Vec::new();
    drain(&queue, |ev| {
        seen.push(ev);
        if ev == 1 {
            queue.borrow_mut().push_back(3);
        }
    });
    assert_eq!(seen, vec![1, 2, 3]);
    assert!(queue.borrow().is_empty());
}

#[test]
fn handler_may_replace_itself_while_running() {
    type Handler = Rc<dyn Fn(&str)>;
    let slot: Rc<RefCell<Option<Handler>>> = Rc::new(RefCell::new(None));
    let calls = Rc::new(RefCell::new(Vec::new()));

    let (slot2, calls2) = (slot.clone(), calls.clone());
    let handler: Handler = Rc::new(move |id: &str| {
        calls2.borrow_mut().push(id.to_string());
        // e.g. turning nearby preview off from inside the click handler
        *slot2.borrow_mut() = None;
    });
    *slot.borrow_mut() = Some(handler);

    let queue = RefCell::new(VecDeque::from(vec!["p1", "p2"]));
    drain(&queue, |id| {
        if let Some(f) = current_handler(&slot) {
            f(id);
        }
    });
    assert_eq!(*calls.borrow(), vec!["p1".to_string()]);
    assert!(slot.borrow().is_none());
}
