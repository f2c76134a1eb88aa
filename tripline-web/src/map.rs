//! Map/chat sync adapter
//!
//! Derives everything the map widget needs from the shared [`TripState`]
//! and translates map events back into store actions. The relation between
//! markers and chat cards is the `hovered_city_id` lookup in the store;
//! the two surfaces never hold references to each other.

use tripline_core::{City, GeoPoint, MapBounds, TripAction, TripState};

/// Padding applied around auto-fit bounds, in degrees.
const BOUNDS_PADDING_DEG: f64 = 0.05;

/// One renderable map marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub city_id: String,
    pub name: String,
    pub position: GeoPoint,
    pub hovered: bool,
    pub on_route: bool,
}

/// Markers for every city the map should show: current chat results,
/// wishlist entries, and route stops. Cities without coordinates stay
/// visible in lists but never become markers.
#[must_use]
pub fn marker_set(state: &TripState) -> Vec<Marker> {
    let mut markers: Vec<Marker> = Vec::new();
    let cities = state
        .chat_results
        .iter()
        .chain(state.wishlist.iter().map(|item| &item.city))
        .chain(state.stops.iter().map(|stop| &stop.city));
    for city in cities {
        if markers.iter().any(|m| m.city_id == city.object_id) {
            continue;
        }
        let Some(position) = city.coordinates else {
            continue;
        };
        markers.push(Marker {
            city_id: city.object_id.clone(),
            name: city.name.clone(),
            position,
            hovered: state.hovered_city_id.as_deref() == Some(city.object_id.as_str()),
            on_route: state.stop_for(&city.object_id).is_some(),
        });
    }
    markers
}

/// Bounding box enclosing the given cities, padded so edge markers are not
/// clipped. `None` when no city has coordinates.
#[must_use]
pub fn fit_bounds(cities: &[City]) -> Option<MapBounds> {
    let mut points = cities.iter().filter_map(|city| city.coordinates);
    let first = points.next()?;
    let mut bounds = MapBounds {
        north: first.lat,
        south: first.lat,
        east: first.lng,
        west: first.lng,
    };
    for point in points {
        bounds.north = bounds.north.max(point.lat);
        bounds.south = bounds.south.min(point.lat);
        bounds.east = bounds.east.max(point.lng);
        bounds.west = bounds.west.min(point.lng);
    }
    bounds.north += BOUNDS_PADDING_DEG;
    bounds.south -= BOUNDS_PADDING_DEG;
    bounds.east += BOUNDS_PADDING_DEG;
    bounds.west -= BOUNDS_PADDING_DEG;
    Some(bounds)
}

/// Coordinates of the trip route, in stop order.
#[must_use]
pub fn route_points(state: &TripState) -> Vec<GeoPoint> {
    state
        .ordered_stops()
        .into_iter()
        .filter_map(|stop| stop.city.coordinates)
        .collect()
}

/// The marker currently hovered, resolved through the store relation.
#[must_use]
pub fn hovered_marker(markers: &[Marker]) -> Option<&Marker> {
    markers.iter().find(|m| m.hovered)
}

/// Marker hover (or hover end) as a store action.
#[must_use]
pub fn hover_action(city_id: Option<String>) -> TripAction {
    TripAction::SetHoveredCity { city_id }
}

/// Viewport-settled event as a store action.
#[must_use]
pub fn viewport_settled_action(bounds: MapBounds) -> TripAction {
    TripAction::SetMapBounds { bounds }
}

/// Marker-click stop toggle: adds the city to the route, or removes it if
/// it is already a stop.
#[must_use]
pub fn stop_toggle_action(state: &TripState, city: &City) -> TripAction {
    if state.stop_for(&city.object_id).is_some() {
        TripAction::RemoveTripStop {
            city_id: city.object_id.clone(),
        }
    } else {
        TripAction::AddTripStop { city: city.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city_at(id: &str, name: &str, lat: f64, lng: f64) -> City {
        City {
            object_id: id.to_string(),
            name: name.to_string(),
            coordinates: Some(GeoPoint { lat, lng }),
            ..City::default()
        }
    }

    fn landlocked(id: &str, name: &str) -> City {
        City {
            object_id: id.to_string(),
            name: name.to_string(),
            coordinates: None,
            ..City::default()
        }
    }

    #[test]
    fn markers_skip_cities_without_coordinates() {
        let state = TripState::default()
            .apply(&TripAction::SetChatResults {
                cities: vec![
                    city_at("a", "Lisbon", 38.72, -9.14),
                    landlocked("b", "Nowhere"),
                ],
            });
        let markers = marker_set(&state);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].city_id, "a");
    }

    #[test]
    fn hovered_flag_follows_store_relation() {
        let state = TripState::default()
            .apply(&TripAction::SetChatResults {
                cities: vec![
                    city_at("a", "Lisbon", 38.72, -9.14),
                    city_at("b", "Porto", 41.16, -8.63),
                ],
            })
            .apply(&TripAction::SetHoveredCity {
                city_id: Some("b".into()),
            });
        let markers = marker_set(&state);
        assert!(!markers[0].hovered);
        assert!(markers[1].hovered);
        assert_eq!(hovered_marker(&markers).map(|m| m.city_id.as_str()), Some("b"));
    }

    #[test]
    fn wishlist_and_stops_merge_without_duplicate_markers() {
        let lisbon = city_at("a", "Lisbon", 38.72, -9.14);
        let state = TripState::default()
            .apply(&TripAction::SetChatResults {
                cities: vec![lisbon.clone()],
            })
            .apply(&TripAction::AddToWishlist {
                city: lisbon.clone(),
                notes: None,
                added_at: 0,
            })
            .apply(&TripAction::AddTripStop { city: lisbon });
        let markers = marker_set(&state);
        assert_eq!(markers.len(), 1);
        assert!(markers[0].on_route);
    }

    #[test]
    fn fit_bounds_encloses_all_points_with_padding() {
        let cities = vec![
            city_at("a", "Lisbon", 38.72, -9.14),
            city_at("b", "Tokyo", 35.68, 139.65),
            landlocked("c", "Nowhere"),
        ];
        let bounds = fit_bounds(&cities).expect("two located cities");
        assert!(bounds.north > 38.72);
        assert!(bounds.south < 35.68);
        assert!(bounds.east > 139.65);
        assert!(bounds.west < -9.14);
    }

    #[test]
    fn fit_bounds_is_none_without_coordinates() {
        assert!(fit_bounds(&[landlocked("a", "Nowhere")]).is_none());
        assert!(fit_bounds(&[]).is_none());
    }

    #[test]
    fn route_points_follow_stop_order() {
        let state = TripState::default()
            .apply(&TripAction::AddTripStop {
                city: city_at("a", "Lisbon", 38.72, -9.14),
            })
            .apply(&TripAction::AddTripStop {
                city: city_at("b", "Porto", 41.16, -8.63),
            })
            .apply(&TripAction::ReorderTripStop { from: 1, to: 0 });
        let points = route_points(&state);
        assert_eq!(points.len(), 2);
        assert!((points[0].lat - 41.16).abs() < f64::EPSILON);
    }

    #[test]
    fn viewport_settle_writes_bounds_last_wins() {
        let lisbon_box = MapBounds {
            north: 39.0,
            south: 38.0,
            east: -8.5,
            west: -9.5,
        };
        let tokyo_box = MapBounds {
            north: 36.0,
            south: 35.0,
            east: 140.0,
            west: 139.0,
        };
        let state = TripState::default()
            .apply(&viewport_settled_action(lisbon_box))
            .apply(&viewport_settled_action(tokyo_box));
        assert_eq!(state.map_bounds, Some(tokyo_box));
    }

    #[test]
    fn stop_toggle_round_trips() {
        let lisbon = city_at("a", "Lisbon", 38.72, -9.14);
        let state = TripState::default();
        let add = stop_toggle_action(&state, &lisbon);
        assert!(matches!(add, TripAction::AddTripStop { .. }));
        let state = state.apply(&add);
        let remove = stop_toggle_action(&state, &lisbon);
        assert!(matches!(remove, TripAction::RemoveTripStop { .. }));
    }
}
