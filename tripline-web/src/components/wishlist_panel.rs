use tripline_core::{City, WishlistItem};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub items: Vec<WishlistItem>,
    pub on_remove: Callback<String>,
    pub on_plan: Callback<City>,
}

#[function_component(WishlistPanel)]
pub fn wishlist_panel(p: &Props) -> Html {
    if p.items.is_empty() {
        return html! {
            <section class="panel wishlist-panel">
                <h2>{ "Wishlist" }</h2>
                <p class="muted">{ "Save cities from the chat to compare them later." }</p>
            </section>
        };
    }
    let rows = p.items.iter().map(|item| {
        let on_remove = {
            let on_remove = p.on_remove.clone();
            let id = item.city.object_id.clone();
            Callback::from(move |_| on_remove.emit(id.clone()))
        };
        let on_plan = {
            let on_plan = p.on_plan.clone();
            let city = item.city.clone();
            Callback::from(move |_| on_plan.emit(city.clone()))
        };
        html! {
            <li class="wishlist-row">
                <span class="city-name">{ item.city.name.clone() }</span>
                { item.notes.as_ref().map_or_else(Html::default, |n| html! {
                    <span class="muted">{ n.clone() }</span>
                }) }
                <button onclick={on_plan}>{ "Plan trip" }</button>
                <button onclick={on_remove} aria-label={format!("Remove {}", item.city.name)}>
                    { "Remove" }
                </button>
            </li>
        }
    });
    html! {
        <section class="panel wishlist-panel">
            <h2>{ "Wishlist" }</h2>
            <ul role="list">
                { for rows }
            </ul>
        </section>
    }
}
