//! Application shell
//!
//! Owns the one store instance per session, the stream buffer feeding it,
//! and the view switch between the explore surfaces and the wizard flow.

use std::rc::Rc;

use tripline_core::{
    City, CityCatalog, Itinerary, MapBounds, StreamBuffer, TripAction, TripState,
};
use yew::prelude::*;

use crate::chat::scheduler::{result_sink, turn_complete_sink, use_reconcile_interval};
use crate::components::chat_panel::ChatPanel;
use crate::components::itinerary_view::ItineraryView;
use crate::components::map_panel::MapPanel;
use crate::components::wishlist_panel::WishlistPanel;
use crate::components::wizard_panel::WizardPanel;
use crate::{map, persistence};

/// The store state wrapped for `use_reducer`. All surfaces dispatch
/// [`TripAction`] values; nothing mutates the snapshot directly.
#[derive(Clone, PartialEq, Default)]
pub struct PlannerState {
    pub trip: TripState,
}

impl PlannerState {
    fn hydrated() -> Self {
        let items = persistence::load_wishlist();
        Self {
            trip: TripState::default().apply(&TripAction::SetWishlist { items }),
        }
    }
}

impl Reducible for PlannerState {
    type Action = TripAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(Self {
            trip: self.trip.apply(&action),
        })
    }
}

#[derive(Clone, PartialEq)]
enum View {
    Explore,
    Wizard { destination_id: Option<String> },
    Itinerary(Rc<Itinerary>),
}

/// Stand-in for the search backend: match the query text against the
/// embedded catalog. The real conversational surface streams its own
/// results through the same sinks.
fn local_matches(catalog: &CityCatalog, query: &str) -> Vec<City> {
    let needle = query.to_ascii_lowercase();
    catalog
        .cities
        .iter()
        .filter(|city| {
            city.name.to_ascii_lowercase().contains(&needle)
                || city.country.to_ascii_lowercase().contains(&needle)
                || city.description.to_ascii_lowercase().contains(&needle)
                || city
                    .vibe_tags
                    .iter()
                    .any(|tag| tag.to_ascii_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_reducer(PlannerState::hydrated);
    let catalog = use_memo((), |()| CityCatalog::load_from_static());
    let view = use_state(|| View::Explore);

    // One buffer per session, owned alongside the scheduler that drains it.
    let buffer = use_mut_ref(StreamBuffer::new);

    {
        let dispatcher = store.dispatcher();
        use_reconcile_interval(
            Rc::clone(&buffer),
            Callback::from(move |cities: Vec<City>| {
                dispatcher.dispatch(TripAction::SetChatResults { cities });
            }),
        );
    }

    // Persist the wishlist whenever it changes.
    {
        let wishlist = store.trip.wishlist.clone();
        use_effect_with(wishlist, |items| {
            persistence::save_wishlist(items);
            || {}
        });
    }

    let on_query = {
        let catalog = catalog.clone();
        let buffer = Rc::clone(&buffer);
        Callback::from(move |query: String| {
            let push = result_sink(&buffer);
            let complete = turn_complete_sink(&buffer);
            let matches = local_matches(&catalog, &query);
            for city in &matches {
                push.emit(city.clone());
            }
            complete.emit(matches);
        })
    };

    let on_hover = {
        let dispatcher = store.dispatcher();
        Callback::from(move |city_id: Option<String>| {
            dispatcher.dispatch(map::hover_action(city_id));
        })
    };

    let on_viewport_settle = {
        let dispatcher = store.dispatcher();
        Callback::from(move |bounds: MapBounds| {
            dispatcher.dispatch(map::viewport_settled_action(bounds));
        })
    };

    let on_save = {
        let dispatcher = store.dispatcher();
        Callback::from(move |city: City| {
            dispatcher.dispatch(TripAction::AddToWishlist {
                city,
                notes: None,
                added_at: js_sys::Date::now() as i64,
            });
        })
    };

    let on_toggle_stop = {
        let store = store.clone();
        Callback::from(move |city: City| {
            store.dispatch(map::stop_toggle_action(&store.trip, &city));
        })
    };

    let on_marker_click = {
        let store = store.clone();
        Callback::from(move |city_id: String| {
            // Popup is component-local; a second click adds the stop.
            let marker_city = store
                .trip
                .chat_results
                .iter()
                .chain(store.trip.wishlist.iter().map(|i| &i.city))
                .find(|c| c.object_id == city_id)
                .cloned();
            if let Some(city) = marker_city {
                if store.trip.stop_for(&city.object_id).is_none() {
                    store.dispatch(TripAction::AddTripStop { city });
                }
            }
        })
    };

    let on_remove_wishlist = {
        let dispatcher = store.dispatcher();
        Callback::from(move |city_id: String| {
            dispatcher.dispatch(TripAction::RemoveFromWishlist { city_id });
        })
    };

    let on_plan = {
        let view = view.clone();
        Callback::from(move |city: City| {
            view.set(View::Wizard {
                destination_id: Some(city.object_id),
            });
        })
    };

    let on_open_wizard = {
        let view = view.clone();
        Callback::from(move |_| {
            view.set(View::Wizard {
                destination_id: None,
            });
        })
    };

    let on_wizard_complete = {
        let view = view.clone();
        Callback::from(move |itinerary: Itinerary| {
            view.set(View::Itinerary(Rc::new(itinerary)));
        })
    };

    let on_restart = {
        let view = view.clone();
        Callback::from(move |()| {
            view.set(View::Wizard {
                destination_id: None,
            });
        })
    };

    let markers = map::marker_set(&store.trip);
    let auto_fit = map::fit_bounds(&store.trip.chat_results);
    let route = map::route_points(&store.trip);

    let main = match &*view {
        View::Explore => html! {
            <>
                <ChatPanel
                    results={store.trip.chat_results.clone()}
                    hovered_city_id={store.trip.hovered_city_id.clone()}
                    on_hover={on_hover.clone()}
                    on_save={on_save}
                    on_toggle_stop={on_toggle_stop}
                    on_submit={on_query}
                />
                <MapPanel
                    markers={markers}
                    route={route}
                    auto_fit={auto_fit}
                    on_hover={on_hover}
                    on_viewport_settle={on_viewport_settle}
                    on_marker_click={on_marker_click}
                />
                <WishlistPanel
                    items={store.trip.wishlist.clone()}
                    on_remove={on_remove_wishlist}
                    on_plan={on_plan}
                />
                <button class="open-wizard" onclick={on_open_wizard}>{ "Plan a trip" }</button>
            </>
        },
        View::Wizard { destination_id } => html! {
            <WizardPanel
                catalog={catalog.clone()}
                initial_destination_id={destination_id.clone()}
                on_complete={on_wizard_complete}
            />
        },
        View::Itinerary(itinerary) => html! {
            <ItineraryView itinerary={(**itinerary).clone()} on_restart={on_restart} />
        },
    };

    html! {
        <main id="main" role="main" class="tripline-app">
            { main }
        </main>
    }
}
