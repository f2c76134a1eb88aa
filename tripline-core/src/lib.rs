//! Tripline Core
//!
//! Platform-agnostic trip-planning logic for the Tripline client. This crate
//! provides the shared state store, the streaming-result reconciliation
//! primitives, and the itinerary engine without UI or browser dependencies.

pub mod catalog;
pub mod city;
pub mod itinerary;
pub mod state;
pub mod stream;

// Re-export commonly used types
pub use catalog::{CatalogError, CityCatalog};
pub use city::{City, GeoPoint, MapBounds, SCORE_DIMENSIONS, ScoreVector, TripStop, WishlistItem};
pub use itinerary::{
    Activity, ActivityTemplate, CostTier, Day, Itinerary, ItineraryConfig, ItineraryInput, Pace,
    TimeSlot, TravelStyle, default_itinerary_config, generate_itinerary, generate_itinerary_with,
};
pub use state::{CHAT_RESULT_CAP, COMPARE_CAP, TripAction, TripState};
pub use stream::{RECONCILE_TICK_MS, STREAM_CARD_CAP, ReconcilePass, StreamBuffer};

/// Trait for abstracting wishlist persistence.
/// Platform-specific implementations should provide this.
pub trait WishlistStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be written.
    fn save_wishlist(&self, items: &[WishlistItem]) -> Result<(), Self::Error>;

    /// Load the persisted wishlist. Missing data is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load_wishlist(&self) -> Result<Option<Vec<WishlistItem>>, Self::Error>;

    /// Drop the persisted wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn clear_wishlist(&self) -> Result<(), Self::Error>;
}

/// Load a wishlist, degrading every failure mode to an empty list.
///
/// Corrupted or missing persisted data must never surface as an error to the
/// planning UI; it is logged and treated as a fresh wishlist.
pub fn load_wishlist_or_default<S: WishlistStorage>(storage: &S) -> Vec<WishlistItem> {
    match storage.load_wishlist() {
        Ok(Some(items)) => items
            .into_iter()
            .filter(|item| item.city.is_valid())
            .collect(),
        Ok(None) => Vec::new(),
        Err(err) => {
            log::warn!("failed to load persisted wishlist, starting empty: {err}");
            Vec::new()
        }
    }
}
