//! Embedded destination catalog
//!
//! The catalog backs demo data, the setup wizard's destination picker, and
//! tests. Live search results arrive through the chat surface instead and
//! never pass through here.

use crate::city::City;
use serde::{Deserialize, Serialize};

const DEFAULT_CITIES_DATA: &str =
    include_str!("../../tripline-web/static/assets/data/cities.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CityCatalog {
    #[serde(default)]
    pub cities: Vec<City>,
}

impl CityCatalog {
    /// Parse a catalog document, dropping records that lack identity fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON of the expected shape.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let mut catalog: Self = serde_json::from_str(json)?;
        let before = catalog.cities.len();
        catalog.cities.retain(City::is_valid);
        if catalog.cities.len() < before {
            log::warn!(
                "catalog dropped {} malformed city records",
                before - catalog.cities.len()
            );
        }
        Ok(catalog)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_CITIES_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn find(&self, object_id: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.object_id == object_id)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.name_matches(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_catalog_parses_and_resolves() {
        let catalog = CityCatalog::load_from_static();
        assert!(!catalog.cities.is_empty(), "embedded catalog should load");
        let paris = catalog.find("paris-fr").expect("paris present");
        assert_eq!(paris.name, "Paris");
        assert!(catalog.find_by_name("tokyo").is_some());
        assert!(catalog.find("nowhere").is_none());
    }

    #[test]
    fn malformed_records_are_dropped_not_fatal() {
        let json = r#"{"cities": [
            {"objectID": "ok-1", "name": "Okay City"},
            {"objectID": "", "name": "Ghost"},
            {"objectID": "ok-2", "name": ""}
        ]}"#;
        let catalog = CityCatalog::from_json(json).expect("document parses");
        assert_eq!(catalog.cities.len(), 1);
        assert_eq!(catalog.cities[0].object_id, "ok-1");
    }
}
