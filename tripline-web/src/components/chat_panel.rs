//! Chat surface host: transcript container, query form, and result cards
//!
//! The conversational surface renders its transcript into the container div
//! we own; the result cards below it come from the store's reconciled chat
//! result set, never directly from the surface's callbacks.

use tripline_core::City;
use yew::prelude::*;

use crate::chat::transcript::TranscriptDeduper;
use crate::chat::{CHAT_FORM_ID, CHAT_INPUT_ID, TRANSCRIPT_CONTAINER_ID, bridge};
use crate::dom;

const SUGGESTION_CHIPS: [&str; 3] = [
    "Where can I surf in November?",
    "Romantic city break under $1500",
    "Best food cities in Asia",
];

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub results: Vec<City>,
    #[prop_or_default]
    pub hovered_city_id: Option<String>,
    pub on_hover: Callback<Option<String>>,
    pub on_save: Callback<City>,
    pub on_toggle_stop: Callback<City>,
    #[prop_or_default]
    pub on_submit: Callback<String>,
}

#[function_component(ChatPanel)]
pub fn chat_panel(p: &Props) -> Html {
    // The observer lives exactly as long as this panel's transcript is
    // mounted; a remounted panel gets a fresh observer on its fresh
    // container element.
    use_effect_with((), |()| {
        let deduper = dom::element_by_id(TRANSCRIPT_CONTAINER_ID).and_then(|container| {
            TranscriptDeduper::attach(&container)
                .map_err(|e| {
                    log::error!(
                        "transcript observer failed to attach: {}",
                        dom::js_error_message(&e)
                    );
                })
                .ok()
        });
        move || drop(deduper)
    });

    let on_form_submit = {
        let on_submit = p.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(query) = bridge::current_input() {
                let query = query.trim().to_string();
                if !query.is_empty() {
                    on_submit.emit(query);
                }
            }
        })
    };

    let chips = SUGGESTION_CHIPS.iter().map(|chip| {
        let text = (*chip).to_string();
        let onclick = Callback::from(move |_| bridge::submit_query(&text));
        html! { <button class="chip" onclick={onclick}>{ chip }</button> }
    });

    let cards = p.results.iter().map(|city| {
        let hovered = p.hovered_city_id.as_deref() == Some(city.object_id.as_str());
        let onmouseenter = {
            let on_hover = p.on_hover.clone();
            let id = city.object_id.clone();
            Callback::from(move |_| on_hover.emit(Some(id.clone())))
        };
        let onmouseleave = {
            let on_hover = p.on_hover.clone();
            Callback::from(move |_| on_hover.emit(None))
        };
        let on_save = {
            let on_save = p.on_save.clone();
            let city = city.clone();
            Callback::from(move |_| on_save.emit(city.clone()))
        };
        let on_stop = {
            let on_toggle_stop = p.on_toggle_stop.clone();
            let city = city.clone();
            Callback::from(move |_| on_toggle_stop.emit(city.clone()))
        };
        html! {
            <article
                class={classes!("city-card", hovered.then_some("hovered"))}
                {onmouseenter}
                {onmouseleave}
            >
                <header>
                    <h3>{ city.name.clone() }</h3>
                    <span class="muted">{ format!("{}, {}", city.country, city.continent) }</span>
                </header>
                <p>{ city.description.clone() }</p>
                <ul class="vibe-tags" role="list">
                    { for city.vibe_tags.iter().map(|tag| html! { <li>{ tag.clone() }</li> }) }
                </ul>
                <footer class="card-actions">
                    <button onclick={on_save}>{ "Save" }</button>
                    <button onclick={on_stop}>{ "Add stop" }</button>
                </footer>
            </article>
        }
    });

    html! {
        <section class="panel chat-panel" aria-label="Trip search chat">
            <div id={TRANSCRIPT_CONTAINER_ID} class="chat-transcript" role="log" aria-live="polite" />
            <div class="result-cards" role="list">
                { for cards }
            </div>
            <form id={CHAT_FORM_ID} onsubmit={on_form_submit}>
                <input
                    id={CHAT_INPUT_ID}
                    type="text"
                    placeholder="Ask about your next trip..."
                    aria-label="Trip search query"
                />
                <button type="submit">{ "Ask" }</button>
            </form>
            <div class="chips">
                { for chips }
            </div>
        </section>
    }
}
