//! Destination records and the score vector describing their character
use serde::{Deserialize, Serialize};

/// The five 1-10 ratings describing what a destination is good at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreVector {
    #[serde(default)]
    pub culture: u8,
    #[serde(default)]
    pub adventure: u8,
    #[serde(default)]
    pub nature: u8,
    #[serde(default)]
    pub beach: u8,
    #[serde(default)]
    pub nightlife: u8,
}

impl ScoreVector {
    /// Score for a named dimension; unknown names rate zero.
    #[must_use]
    pub fn dimension(&self, name: &str) -> u8 {
        match name {
            "culture" => self.culture,
            "adventure" => self.adventure,
            "nature" => self.nature,
            "beach" => self.beach,
            "nightlife" => self.nightlife,
            _ => 0,
        }
    }
}

/// Names of the score dimensions, in display order.
pub const SCORE_DIMENSIONS: [&str; 5] = ["culture", "adventure", "nature", "beach", "nightlife"];

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A destination as fetched from the search backend.
///
/// Immutable once fetched; collections hold clones of the fetched record
/// rather than mutating it in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct City {
    /// Globally unique record identity assigned by the search index.
    #[serde(rename = "objectID", alias = "object_id")]
    pub object_id: String,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub continent: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vibe_tags: Vec<String>,
    #[serde(default)]
    pub scores: ScoreVector,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl City {
    /// Whether the record carries the identity fields every consumer relies on.
    /// Payloads that fail this check are dropped at the boundary, never stored.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.object_id.trim().is_empty() && !self.name.trim().is_empty()
    }

    /// Case-insensitive display-name equality, the dedupe key for chat results.
    #[must_use]
    pub fn name_matches(&self, other_name: &str) -> bool {
        self.name.eq_ignore_ascii_case(other_name)
    }
}

/// An entry on the user's wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub city: City,
    #[serde(default)]
    pub notes: Option<String>,
    /// Unix milliseconds at the time the city was (re-)added.
    pub added_at: i64,
}

/// A city placed on the ordered trip route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripStop {
    pub city: City,
    /// Position on the route; always a contiguous `0..N-1` permutation.
    pub order: usize,
}

/// Map viewport edges in degrees. Last write wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_vector_resolves_known_dimensions() {
        let scores = ScoreVector {
            culture: 9,
            adventure: 4,
            nature: 6,
            beach: 2,
            nightlife: 8,
        };
        assert_eq!(scores.dimension("culture"), 9);
        assert_eq!(scores.dimension("nightlife"), 8);
        assert_eq!(scores.dimension("shopping"), 0);
    }

    #[test]
    fn city_validity_requires_identity_fields() {
        let mut city = City {
            object_id: "city-1".into(),
            name: "Lisbon".into(),
            ..City::default()
        };
        assert!(city.is_valid());
        city.object_id = "  ".into();
        assert!(!city.is_valid());
    }

    #[test]
    fn city_deserializes_search_payload_shape() {
        let json = r#"{
            "objectID": "paris-fr",
            "name": "Paris",
            "country": "France",
            "continent": "Europe",
            "vibe_tags": ["romantic", "historic"],
            "scores": {"culture": 10, "nightlife": 8},
            "coordinates": {"lat": 48.8566, "lng": 2.3522},
            "_highlightResult": {"ignored": true}
        }"#;
        let city: City = serde_json::from_str(json).expect("payload parses");
        assert!(city.is_valid());
        assert_eq!(city.scores.culture, 10);
        assert_eq!(city.scores.beach, 0);
        assert!(city.name_matches("PARIS"));
    }
}
