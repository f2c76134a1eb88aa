//! Reconciliation scheduler
//!
//! Decouples store updates from the conversational surface's render cycle.
//! Result callbacks write into the shared [`StreamBuffer`]; a fixed-period
//! interval compares the buffer version against the last consumed one and
//! forwards at most one snapshot per tick. The interval is torn down with
//! the owning surface, discarding whatever is still buffered.

use std::cell::RefCell;
use std::rc::Rc;

use tripline_core::{City, RECONCILE_TICK_MS, ReconcilePass, StreamBuffer};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

/// Callback handed to the conversational surface for each streamed result.
/// Writes only into the buffer, never into the store.
#[must_use]
pub fn result_sink(buffer: &Rc<RefCell<StreamBuffer>>) -> Callback<City> {
    let buffer = Rc::clone(buffer);
    Callback::from(move |city: City| {
        buffer.borrow_mut().push(&city);
    })
}

/// Callback for the end of a completed turn: overwrites the buffered set
/// with the turn's final unique results.
#[must_use]
pub fn turn_complete_sink(buffer: &Rc<RefCell<StreamBuffer>>) -> Callback<Vec<City>> {
    let buffer = Rc::clone(buffer);
    Callback::from(move |cities: Vec<City>| {
        buffer.borrow_mut().replace(&cities);
    })
}

/// Drive the reconcile pass on a fixed browser interval.
///
/// `on_results` fires only when the buffer version has advanced since the
/// last tick; the effect destructor clears the interval on unmount.
#[hook]
pub fn use_reconcile_interval(
    buffer: Rc<RefCell<StreamBuffer>>,
    on_results: Callback<Vec<City>>,
) {
    use_effect_with((), move |()| {
        let mut interval_id: Option<i32> = None;
        let mut stored_closure: Option<Closure<dyn FnMut()>> = None;
        if let (Some(window), Ok(timeout)) =
            (web_sys::window(), i32::try_from(RECONCILE_TICK_MS))
        {
            let mut pass = ReconcilePass::new();
            let closure = Closure::wrap(Box::new(move || {
                let snapshot = pass.tick(&buffer.borrow());
                if let Some(cities) = snapshot {
                    on_results.emit(cities);
                }
            }) as Box<dyn FnMut()>);
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout,
            ) {
                Ok(id) => {
                    interval_id = Some(id);
                    stored_closure = Some(closure);
                }
                Err(err) => {
                    log::error!(
                        "failed to schedule reconcile interval: {}",
                        crate::dom::js_error_message(&err)
                    );
                }
            }
        }
        move || {
            if let Some(id) = interval_id
                && let Some(win) = web_sys::window()
            {
                win.clear_interval_with_handle(id);
            }
            if let Some(closure) = stored_closure {
                drop(closure);
            }
        }
    });
}
