//! Wishlist persistence over browser `localStorage`
//!
//! Corrupted or missing stored data always degrades to an empty wishlist;
//! nothing in here surfaces an error to the planning UI.

use tripline_core::{WishlistItem, WishlistStorage, load_wishlist_or_default};

use crate::dom;

const WISHLIST_KEY: &str = "tripline.wishlist.v1";

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// `localStorage`-backed wishlist store.
pub struct LocalWishlistStorage;

impl WishlistStorage for LocalWishlistStorage {
    type Error = WebStorageError;

    fn save_wishlist(&self, items: &[WishlistItem]) -> Result<(), Self::Error> {
        let json = serde_json::to_string(items)?;
        let storage =
            dom::local_storage().map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))?;
        storage
            .set_item(WISHLIST_KEY, &json)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }

    fn load_wishlist(&self) -> Result<Option<Vec<WishlistItem>>, Self::Error> {
        let storage =
            dom::local_storage().map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))?;
        let raw = storage
            .get_item(WISHLIST_KEY)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn clear_wishlist(&self) -> Result<(), Self::Error> {
        let storage =
            dom::local_storage().map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))?;
        storage
            .remove_item(WISHLIST_KEY)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }
}

/// Load the persisted wishlist, treating every failure as an empty list.
#[must_use]
pub fn load_wishlist() -> Vec<WishlistItem> {
    load_wishlist_or_default(&LocalWishlistStorage)
}

/// Persist the wishlist; failures are logged and swallowed.
pub fn save_wishlist(items: &[WishlistItem]) {
    if let Err(err) = LocalWishlistStorage.save_wishlist(items) {
        log::warn!("failed to persist wishlist: {err}");
    }
}
