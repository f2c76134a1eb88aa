//! Trip state store: single source of truth for every planning surface
//!
//! The chat surface, the map, and the setup wizard all read from one
//! [`TripState`] value and write to it exclusively through [`TripAction`]
//! dispatch. Every action produces a fresh state value; nothing mutates a
//! snapshot that a surface may still be rendering.

use crate::city::{City, MapBounds, TripStop, WishlistItem};
use serde::{Deserialize, Serialize};

/// Most recent chat results kept when cities are appended one at a time.
pub const CHAT_RESULT_CAP: usize = 3;
/// Cities the comparison tray can hold side by side.
pub const COMPARE_CAP: usize = 2;

/// Shared planning state. One instance per session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TripState {
    pub wishlist: Vec<WishlistItem>,
    pub chat_results: Vec<City>,
    pub compare: Vec<City>,
    pub hovered_city_id: Option<String>,
    pub map_bounds: Option<MapBounds>,
    pub stops: Vec<TripStop>,
    pub preferences: Vec<String>,
}

/// Everything a surface may ask the store to do.
#[derive(Debug, Clone, PartialEq)]
pub enum TripAction {
    AddToWishlist {
        city: City,
        notes: Option<String>,
        added_at: i64,
    },
    RemoveFromWishlist {
        city_id: String,
    },
    /// Hydration from persistence; replaces the whole wishlist.
    SetWishlist {
        items: Vec<WishlistItem>,
    },
    /// Full replacement at the end of a completed chat turn. An empty
    /// vector clears the set.
    SetChatResults {
        cities: Vec<City>,
    },
    /// Incremental add for a single streamed city.
    AddChatResult {
        city: City,
    },
    SetHoveredCity {
        city_id: Option<String>,
    },
    SetMapBounds {
        bounds: MapBounds,
    },
    AddTripStop {
        city: City,
    },
    RemoveTripStop {
        city_id: String,
    },
    ReorderTripStop {
        from: usize,
        to: usize,
    },
    ToggleCompare {
        city: City,
    },
    ClearCompare,
    SavePreference {
        statement: String,
    },
    ClearPreferences,
}

impl TripState {
    /// Apply one action and return the next state.
    ///
    /// Malformed payloads (missing identity fields, out-of-range indices)
    /// leave the state unchanged; nothing in here panics, so a bad payload
    /// from an external surface can never take the whole client down.
    #[must_use]
    pub fn apply(&self, action: &TripAction) -> Self {
        match action {
            TripAction::AddToWishlist {
                city,
                notes,
                added_at,
            } => self.add_to_wishlist(city, notes.clone(), *added_at),
            TripAction::RemoveFromWishlist { city_id } => {
                let mut next = self.clone();
                next.wishlist.retain(|item| item.city.object_id != *city_id);
                next
            }
            TripAction::SetWishlist { items } => {
                let mut next = self.clone();
                next.wishlist = items
                    .iter()
                    .filter(|item| item.city.is_valid())
                    .cloned()
                    .collect();
                next
            }
            TripAction::SetChatResults { cities } => {
                let mut next = self.clone();
                next.chat_results = cities.iter().filter(|c| c.is_valid()).cloned().collect();
                next
            }
            TripAction::AddChatResult { city } => self.add_chat_result(city),
            TripAction::SetHoveredCity { city_id } => {
                let mut next = self.clone();
                next.hovered_city_id = city_id.clone();
                next
            }
            TripAction::SetMapBounds { bounds } => {
                let mut next = self.clone();
                next.map_bounds = Some(*bounds);
                next
            }
            TripAction::AddTripStop { city } => self.add_trip_stop(city),
            TripAction::RemoveTripStop { city_id } => {
                let mut next = self.clone();
                next.stops.retain(|stop| stop.city.object_id != *city_id);
                renumber_stops(&mut next.stops);
                next
            }
            TripAction::ReorderTripStop { from, to } => self.reorder_trip_stop(*from, *to),
            TripAction::ToggleCompare { city } => self.toggle_compare(city),
            TripAction::ClearCompare => {
                let mut next = self.clone();
                next.compare.clear();
                next
            }
            TripAction::SavePreference { statement } => {
                let trimmed = statement.trim();
                if trimmed.is_empty() {
                    return self.clone();
                }
                let mut next = self.clone();
                next.preferences.push(trimmed.to_string());
                next
            }
            TripAction::ClearPreferences => {
                let mut next = self.clone();
                next.preferences.clear();
                next
            }
        }
    }

    fn add_to_wishlist(&self, city: &City, notes: Option<String>, added_at: i64) -> Self {
        if !city.is_valid() {
            log::warn!("dropping wishlist add with missing identity fields");
            return self.clone();
        }
        let mut next = self.clone();
        // Re-adding replaces the entry and refreshes its timestamp.
        next.wishlist
            .retain(|item| item.city.object_id != city.object_id);
        next.wishlist.push(WishlistItem {
            city: city.clone(),
            notes,
            added_at,
        });
        next
    }

    fn add_chat_result(&self, city: &City) -> Self {
        if !city.is_valid() {
            log::warn!("dropping chat result with missing identity fields");
            return self.clone();
        }
        // First insert wins on a case-insensitive name collision.
        if self
            .chat_results
            .iter()
            .any(|existing| existing.name_matches(&city.name))
        {
            return self.clone();
        }
        let mut next = self.clone();
        next.chat_results.push(city.clone());
        let overflow = next.chat_results.len().saturating_sub(CHAT_RESULT_CAP);
        if overflow > 0 {
            // FIFO: evict the oldest entries.
            next.chat_results.drain(..overflow);
        }
        next
    }

    fn add_trip_stop(&self, city: &City) -> Self {
        if !city.is_valid()
            || self
                .stops
                .iter()
                .any(|stop| stop.city.object_id == city.object_id)
        {
            return self.clone();
        }
        let mut next = self.clone();
        next.stops.push(TripStop {
            city: city.clone(),
            order: next.stops.len(),
        });
        next
    }

    fn reorder_trip_stop(&self, from: usize, to: usize) -> Self {
        if from >= self.stops.len() || to >= self.stops.len() {
            return self.clone();
        }
        let mut next = self.clone();
        let stop = next.stops.remove(from);
        next.stops.insert(to, stop);
        renumber_stops(&mut next.stops);
        next
    }

    fn toggle_compare(&self, city: &City) -> Self {
        if !city.is_valid() {
            return self.clone();
        }
        let mut next = self.clone();
        let had = next.compare.len();
        next.compare.retain(|c| c.object_id != city.object_id);
        if next.compare.len() == had {
            next.compare.push(city.clone());
            let overflow = next.compare.len().saturating_sub(COMPARE_CAP);
            if overflow > 0 {
                next.compare.drain(..overflow);
            }
        }
        next
    }

    #[must_use]
    pub fn wishlist_contains(&self, city_id: &str) -> bool {
        self.wishlist
            .iter()
            .any(|item| item.city.object_id == city_id)
    }

    #[must_use]
    pub fn stop_for(&self, city_id: &str) -> Option<&TripStop> {
        self.stops.iter().find(|stop| stop.city.object_id == city_id)
    }

    /// Stops in route order, regardless of insertion history.
    #[must_use]
    pub fn ordered_stops(&self) -> Vec<&TripStop> {
        let mut stops: Vec<&TripStop> = self.stops.iter().collect();
        stops.sort_by_key(|stop| stop.order);
        stops
    }
}

fn renumber_stops(stops: &mut [TripStop]) {
    for (idx, stop) in stops.iter_mut().enumerate() {
        stop.order = idx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(id: &str, name: &str) -> City {
        City {
            object_id: id.to_string(),
            name: name.to_string(),
            ..City::default()
        }
    }

    #[test]
    fn wishlist_keeps_one_entry_per_city() {
        let state = TripState::default();
        let state = state.apply(&TripAction::AddToWishlist {
            city: city("lisbon-pt", "Lisbon"),
            notes: Some("spring?".into()),
            added_at: 100,
        });
        let state = state.apply(&TripAction::AddToWishlist {
            city: city("lisbon-pt", "Lisbon"),
            notes: None,
            added_at: 200,
        });
        assert_eq!(state.wishlist.len(), 1);
        assert_eq!(state.wishlist[0].added_at, 200);
        assert_eq!(state.wishlist[0].notes, None);
    }

    #[test]
    fn remove_from_wishlist_is_noop_when_absent() {
        let state = TripState::default().apply(&TripAction::RemoveFromWishlist {
            city_id: "ghost".into(),
        });
        assert!(state.wishlist.is_empty());
    }

    #[test]
    fn chat_result_dedupe_is_case_insensitive_first_wins() {
        let mut state = TripState::default();
        for name in ["Paris", "paris", "PARIS"] {
            state = state.apply(&TripAction::AddChatResult {
                city: city("paris-fr", name),
            });
        }
        assert_eq!(state.chat_results.len(), 1);
        assert_eq!(state.chat_results[0].name, "Paris");
    }

    #[test]
    fn chat_results_evict_oldest_beyond_cap() {
        let mut state = TripState::default();
        for (id, name) in [
            ("a", "Lisbon"),
            ("b", "Tokyo"),
            ("c", "Paris"),
            ("d", "Marrakech"),
        ] {
            state = state.apply(&TripAction::AddChatResult {
                city: city(id, name),
            });
        }
        let names: Vec<&str> = state.chat_results.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Tokyo", "Paris", "Marrakech"]);
    }

    #[test]
    fn set_chat_results_clears_with_empty_vec() {
        let state = TripState::default().apply(&TripAction::AddChatResult {
            city: city("a", "Lisbon"),
        });
        let state = state.apply(&TripAction::SetChatResults { cities: vec![] });
        assert!(state.chat_results.is_empty());
    }

    #[test]
    fn malformed_city_leaves_state_unchanged() {
        let state = TripState::default();
        let next = state.apply(&TripAction::AddChatResult {
            city: City::default(),
        });
        assert_eq!(next, state);
        let next = state.apply(&TripAction::AddToWishlist {
            city: city("", "Nameless"),
            notes: None,
            added_at: 0,
        });
        assert_eq!(next, state);
    }

    #[test]
    fn trip_stop_order_stays_contiguous() {
        let mut state = TripState::default();
        for (id, name) in [("a", "Lisbon"), ("b", "Tokyo"), ("c", "Paris")] {
            state = state.apply(&TripAction::AddTripStop {
                city: city(id, name),
            });
        }
        let state = state.apply(&TripAction::ReorderTripStop { from: 2, to: 0 });
        let orders: Vec<usize> = state.stops.iter().map(|s| s.order).collect();
        assert_eq!(orders, [0, 1, 2]);
        assert_eq!(state.stops[0].city.name, "Paris");

        let state = state.apply(&TripAction::RemoveTripStop {
            city_id: "b".into(),
        });
        let orders: Vec<usize> = state.stops.iter().map(|s| s.order).collect();
        assert_eq!(orders, [0, 1]);
    }

    #[test]
    fn reorder_out_of_range_is_noop() {
        let state = TripState::default().apply(&TripAction::AddTripStop {
            city: city("a", "Lisbon"),
        });
        let next = state.apply(&TripAction::ReorderTripStop { from: 0, to: 5 });
        assert_eq!(next, state);
    }

    #[test]
    fn duplicate_trip_stop_is_rejected() {
        let state = TripState::default().apply(&TripAction::AddTripStop {
            city: city("a", "Lisbon"),
        });
        let next = state.apply(&TripAction::AddTripStop {
            city: city("a", "Lisbon"),
        });
        assert_eq!(next.stops.len(), 1);
    }

    #[test]
    fn compare_tray_toggles_and_caps() {
        let mut state = TripState::default();
        for (id, name) in [("a", "Lisbon"), ("b", "Tokyo"), ("c", "Paris")] {
            state = state.apply(&TripAction::ToggleCompare {
                city: city(id, name),
            });
        }
        assert_eq!(state.compare.len(), COMPARE_CAP);
        let names: Vec<&str> = state.compare.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Tokyo", "Paris"]);

        let state = state.apply(&TripAction::ToggleCompare {
            city: city("b", "Tokyo"),
        });
        assert_eq!(state.compare.len(), 1);
    }

    #[test]
    fn preferences_append_and_bulk_clear() {
        let state = TripState::default()
            .apply(&TripAction::SavePreference {
                statement: "  somewhere warm ".into(),
            })
            .apply(&TripAction::SavePreference {
                statement: "".into(),
            })
            .apply(&TripAction::SavePreference {
                statement: "under $2k".into(),
            });
        assert_eq!(state.preferences, ["somewhere warm", "under $2k"]);
        let state = state.apply(&TripAction::ClearPreferences);
        assert!(state.preferences.is_empty());
    }

    #[test]
    fn hover_relation_sets_and_clears() {
        let state = TripState::default().apply(&TripAction::SetHoveredCity {
            city_id: Some("paris-fr".into()),
        });
        assert_eq!(state.hovered_city_id.as_deref(), Some("paris-fr"));
        let state = state.apply(&TripAction::SetHoveredCity { city_id: None });
        assert!(state.hovered_city_id.is_none());
    }
}
