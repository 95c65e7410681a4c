use std::cell::RefCell;
use std::collections::VecDeque;

/// Pops events one at a time with no borrow held across `dispatch`, so a
/// handler may enqueue more events or touch the queue itself.
pub fn drain<E>(queue: &RefCell<VecDeque<E>>, mut dispatch: impl FnMut(E)) {
    loop {
        let Some(ev) = queue.borrow_mut().pop_front() else {
            break;
        };
        dispatch(ev);
    }
}

/// Copy of a replaceable handler. The slot is not borrowed while the copy
/// runs, so the handler may install a new one.
pub fn current_handler<T: Clone>(slot: &RefCell<Option<T>>) -> Option<T> {
    slot.borrow().clone()
}
