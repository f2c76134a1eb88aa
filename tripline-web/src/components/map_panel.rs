//! Marker layer host for the external map widget
//!
//! Tile rendering belongs to the map widget; this panel renders the derived
//! marker layer and relays hover, click, and viewport events through the
//! store's dispatch path.

use tripline_core::{GeoPoint, MapBounds};
use yew::prelude::*;

use crate::map::{self, Marker};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub markers: Vec<Marker>,
    #[prop_or_default]
    pub route: Vec<GeoPoint>,
    #[prop_or_default]
    pub auto_fit: Option<MapBounds>,
    pub on_hover: Callback<Option<String>>,
    /// Fired with the viewport bounds once the widget comes to rest on them.
    #[prop_or_default]
    pub on_viewport_settle: Callback<MapBounds>,
    pub on_marker_click: Callback<String>,
}

#[function_component(MapPanel)]
pub fn map_panel(p: &Props) -> Html {
    // Transient popup: presentation state only, never written to the store.
    let popup_city_id = use_state(|| None::<String>);

    // The widget settles on whatever bounds it was told to fit; report the
    // resting viewport back through the store's dispatch path.
    {
        let on_viewport_settle = p.on_viewport_settle.clone();
        use_effect_with(p.auto_fit, move |fit| {
            if let Some(bounds) = *fit {
                on_viewport_settle.emit(bounds);
            }
            || {}
        });
    }

    let markers = p.markers.iter().map(|marker| {
        let onmouseenter = {
            let on_hover = p.on_hover.clone();
            let id = marker.city_id.clone();
            Callback::from(move |_| on_hover.emit(Some(id.clone())))
        };
        let onmouseleave = {
            let on_hover = p.on_hover.clone();
            Callback::from(move |_| on_hover.emit(None))
        };
        let onclick = {
            let popup = popup_city_id.clone();
            let on_marker_click = p.on_marker_click.clone();
            let id = marker.city_id.clone();
            Callback::from(move |_| {
                popup.set(Some(id.clone()));
                on_marker_click.emit(id.clone());
            })
        };
        let class = classes!(
            "map-marker",
            marker.hovered.then_some("hovered"),
            marker.on_route.then_some("on-route"),
        );
        html! {
            <button
                {class}
                title={marker.name.clone()}
                style={format!("--lat:{};--lng:{}", marker.position.lat, marker.position.lng)}
                {onmouseenter}
                {onmouseleave}
                {onclick}
            >
                { marker.name.clone() }
            </button>
        }
    });

    let popup = popup_city_id.as_ref().and_then(|id| {
        p.markers.iter().find(|m| m.city_id == *id).map(|marker| {
            let on_close = {
                let popup = popup_city_id.clone();
                Callback::from(move |_| popup.set(None))
            };
            html! {
                <div class="map-popup" role="dialog">
                    <strong>{ marker.name.clone() }</strong>
                    <button onclick={on_close}>{ "×" }</button>
                </div>
            }
        })
    });

    html! {
        <section class="panel map-panel" aria-label="Trip map">
            <div class="marker-layer">
                { for markers }
            </div>
            { map::hovered_marker(&p.markers).map_or_else(Html::default, |m| html! {
                <span class="hover-readout muted">{ m.name.clone() }</span>
            }) }
            { if p.route.len() > 1 {
                html! { <span class="route-indicator muted">{ format!("{} route points", p.route.len()) }</span> }
            } else {
                Html::default()
            } }
            { popup.unwrap_or_default() }
            { p.auto_fit.map_or_else(Html::default, |b| html! {
                <span class="muted bounds-readout">
                    { format!("fit {:.2}..{:.2} / {:.2}..{:.2}", b.south, b.north, b.west, b.east) }
                </span>
            }) }
        </section>
    }
}
