//! Programmatic entry points into the conversational surface
//!
//! Other surfaces (map popups, suggestion chips) originate chat turns by
//! filling the surface's input and submitting its form. Missing elements are
//! a silent no-op: the surface may not be mounted yet.

use wasm_bindgen::JsCast;
use web_sys::{Event, EventInit, HtmlFormElement};

use super::{CHAT_FORM_ID, CHAT_INPUT_ID};
use crate::dom;

/// Submit a query through the conversational surface as if typed.
pub fn submit_query(text: &str) {
    let Some(input) = dom::input_by_id(CHAT_INPUT_ID) else {
        log::warn!("chat input not mounted, dropping query");
        return;
    };
    input.set_value(text);
    let Some(form) = dom::element_by_id(CHAT_FORM_ID)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        log::warn!("chat form not mounted, dropping query");
        return;
    };
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    if let Ok(event) = Event::new_with_event_init_dict("submit", &init) {
        let _ = form.dispatch_event(&event);
    }
}

/// Read the surface's current input value, if the input is mounted.
#[must_use]
pub fn current_input() -> Option<String> {
    dom::input_by_id(CHAT_INPUT_ID).map(|input| input.value())
}
