//! Transcript deduplicator
//!
//! Under its own re-render logic the conversational surface can commit two
//! structurally identical turn nodes (same role, same content) into the
//! transcript it renders. This is a presentation-layer safety net: watch the
//! container's tree, keep the first node per role+content signature, remove
//! the rest. It never touches the trip state store.

use std::collections::HashSet;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MutationObserver, MutationObserverInit};

use super::TURN_ROLE_ATTR;

/// Which of an ordered list of `(role, content)` turns survive dedup.
/// The first occurrence of every signature is kept.
#[must_use]
pub fn dedup_survivors(turns: &[(String, String)]) -> Vec<bool> {
    let mut seen = HashSet::new();
    turns
        .iter()
        .map(|(role, content)| seen.insert(turn_signature(role, content)))
        .collect()
}

fn turn_signature(role: &str, content: &str) -> String {
    // U+0001 cannot appear in rendered text, so the join is unambiguous.
    format!("{role}\u{1}{content}")
}

/// Remove duplicate turn nodes from the transcript container right now.
/// Returns how many nodes were removed.
pub fn scrub_container(container: &Element) -> usize {
    let children = container.children();
    let mut turns = Vec::new();
    let mut elements = Vec::new();
    for idx in 0..children.length() {
        let Some(child) = children.item(idx) else {
            continue;
        };
        let role = child.get_attribute(TURN_ROLE_ATTR).unwrap_or_default();
        let content = child.text_content().unwrap_or_default();
        turns.push((role, content));
        elements.push(child);
    }
    let survivors = dedup_survivors(&turns);
    let mut removed = 0;
    for (element, keep) in elements.iter().zip(survivors) {
        if !keep {
            element.remove();
            removed += 1;
        }
    }
    if removed > 0 {
        log::warn!("transcript dedup removed {removed} duplicate turn node(s)");
    }
    removed
}

/// Mutation observer that scrubs the transcript on every mutation batch.
/// Dropping the deduper disconnects the observer.
pub struct TranscriptDeduper {
    observer: MutationObserver,
    // Held so the callback outlives the observer registration.
    _closure: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl TranscriptDeduper {
    /// Attach to the transcript container and start watching for
    /// childList mutations anywhere under it.
    ///
    /// # Errors
    ///
    /// Returns an error if the observer cannot be constructed or attached.
    pub fn attach(container: &Element) -> Result<Self, JsValue> {
        let target = container.clone();
        let closure = Closure::wrap(Box::new(
            move |_records: js_sys::Array, _observer: MutationObserver| {
                scrub_container(&target);
            },
        )
            as Box<dyn FnMut(js_sys::Array, MutationObserver)>);
        let observer = MutationObserver::new(closure.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer.observe_with_options(container, &init)?;
        // Catch duplicates that landed before the observer attached.
        scrub_container(container);
        Ok(Self {
            observer,
            _closure: closure,
        })
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for TranscriptDeduper {
    fn drop(&mut self) {
        self.disconnect();
    }
}
