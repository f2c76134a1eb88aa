//! Step-by-step itinerary setup

use std::rc::Rc;

use chrono::NaiveDate;
use tripline_core::{CityCatalog, Itinerary, Pace, TravelStyle, generate_itinerary};
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::wizard::{WizardDraft, WizardStep};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub catalog: Rc<CityCatalog>,
    pub on_complete: Callback<Itinerary>,
    /// Pre-selected destination, e.g. from a wishlist "Plan trip" button.
    #[prop_or_default]
    pub initial_destination_id: Option<String>,
}

const INTEREST_CHOICES: [&str; 5] = ["culture", "adventure", "nature", "beach", "nightlife"];

#[function_component(WizardPanel)]
pub fn wizard_panel(p: &Props) -> Html {
    let step = use_state(|| WizardStep::Destination);
    let draft = use_state(|| WizardDraft {
        destination_id: p.initial_destination_id.clone(),
        ..WizardDraft::default()
    });

    let on_next = {
        let step = step.clone();
        Callback::from(move |_| step.set(step.next()))
    };
    let on_back = {
        let step = step.clone();
        Callback::from(move |_| step.set(step.back()))
    };

    let body = match *step {
        WizardStep::Destination => {
            let options = p.catalog.cities.iter().map(|city| {
                let selected = draft.destination_id.as_deref() == Some(city.object_id.as_str());
                let onclick = {
                    let draft = draft.clone();
                    let id = city.object_id.clone();
                    Callback::from(move |_| {
                        draft.set(WizardDraft {
                            destination_id: Some(id.clone()),
                            ..(*draft).clone()
                        });
                    })
                };
                html! {
                    <button class={classes!("dest-option", selected.then_some("selected"))} {onclick}>
                        { format!("{}, {}", city.name, city.country) }
                    </button>
                }
            });
            html! { <div class="dest-grid">{ for options }</div> }
        }
        WizardStep::Schedule => {
            let on_duration = {
                let draft = draft.clone();
                Callback::from(move |e: Event| {
                    if let Some(input) = e
                        .target()
                        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                    {
                        let days = input.value().parse::<u32>().unwrap_or(0).min(30);
                        draft.set(WizardDraft {
                            duration_days: days,
                            ..(*draft).clone()
                        });
                    }
                })
            };
            let on_date = {
                let draft = draft.clone();
                Callback::from(move |e: Event| {
                    if let Some(input) = e
                        .target()
                        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                    {
                        let date = NaiveDate::parse_from_str(&input.value(), "%Y-%m-%d").ok();
                        draft.set(WizardDraft {
                            start_date: date,
                            ..(*draft).clone()
                        });
                    }
                })
            };
            html! {
                <div class="schedule-fields">
                    <label for="wiz-days">{ "How many days?" }</label>
                    <input id="wiz-days" type="number" min="0" max="30"
                        value={draft.duration_days.to_string()} onchange={on_duration} />
                    <label for="wiz-date">{ "Start date (optional)" }</label>
                    <input id="wiz-date" type="date" onchange={on_date} />
                </div>
            }
        }
        WizardStep::Interests => {
            let toggles = INTEREST_CHOICES.iter().map(|interest| {
                let active = draft
                    .interests
                    .iter()
                    .any(|i| i.eq_ignore_ascii_case(interest));
                let onclick = {
                    let draft = draft.clone();
                    let interest = (*interest).to_string();
                    Callback::from(move |_| {
                        let mut next = (*draft).clone();
                        next.toggle_interest(&interest);
                        draft.set(next);
                    })
                };
                html! {
                    <button class={classes!("chip", active.then_some("active"))} {onclick}>
                        { interest }
                    </button>
                }
            });
            html! { <div class="chips">{ for toggles }</div> }
        }
        WizardStep::Style => {
            let style_buttons = [
                (TravelStyle::Relaxed, "Relaxed"),
                (TravelStyle::Balanced, "Balanced"),
                (TravelStyle::Active, "Active"),
            ]
            .map(|(style, label)| {
                let active = draft.travel_style == style;
                let onclick = {
                    let draft = draft.clone();
                    Callback::from(move |_| {
                        draft.set(WizardDraft {
                            travel_style: style,
                            ..(*draft).clone()
                        });
                    })
                };
                html! {
                    <button class={classes!("chip", active.then_some("active"))} {onclick}>{ label }</button>
                }
            });
            let pace_buttons = [
                (Pace::Relaxed, "Easy going"),
                (Pace::Moderate, "Keep moving"),
                (Pace::Packed, "See everything"),
            ]
            .map(|(pace, label)| {
                let active = draft.pace == pace;
                let onclick = {
                    let draft = draft.clone();
                    Callback::from(move |_| {
                        draft.set(WizardDraft {
                            pace,
                            ..(*draft).clone()
                        });
                    })
                };
                html! {
                    <button class={classes!("chip", active.then_some("active"))} {onclick}>{ label }</button>
                }
            });
            html! {
                <div class="style-fields">
                    <h4>{ "Travel style" }</h4>
                    <div class="chips">{ for style_buttons }</div>
                    <h4>{ "Pace" }</h4>
                    <div class="chips">{ for pace_buttons }</div>
                </div>
            }
        }
        WizardStep::Review => {
            let destination = draft
                .destination_id
                .as_deref()
                .and_then(|id| p.catalog.find(id))
                .map_or_else(|| "—".to_string(), |c| c.name.clone());
            let on_generate = {
                let draft = draft.clone();
                let catalog = p.catalog.clone();
                let on_complete = p.on_complete.clone();
                Callback::from(move |_| {
                    let generated_at = js_sys::Date::now() as i64;
                    if let Some(input) = draft.build_input(&catalog, generated_at) {
                        on_complete.emit(generate_itinerary(&input));
                    }
                })
            };
            html! {
                <div class="review">
                    <p>{ format!("{destination}, {} days", draft.duration_days) }</p>
                    <p class="muted">{
                        if draft.interests.is_empty() {
                            "No interests picked; the city's own strengths decide.".to_string()
                        } else {
                            draft.interests.join(", ")
                        }
                    }</p>
                    <button class="primary" onclick={on_generate}>{ "Generate itinerary" }</button>
                </div>
            }
        }
    };

    let can_advance = draft.can_advance(*step);
    html! {
        <section class="panel wizard-panel" aria-label="Trip setup">
            <header><h2>{ "Plan a trip" }</h2></header>
            { body }
            <footer class="wizard-nav">
                { if *step == WizardStep::Destination { Html::default() } else {
                    html! { <button onclick={on_back}>{ "Back" }</button> }
                } }
                { if can_advance {
                    html! { <button onclick={on_next}>{ "Next" }</button> }
                } else {
                    Html::default()
                } }
            </footer>
        </section>
    }
}
