use serde::{Deserialize, Serialize};

/// One point of interest, the canonical record shape of `data/places.json`.
///
/// Every field is always present; missing source data normalizes to an
/// empty string or zero. Only `lat`/`lng` are optional, and only the
/// geocode pass sets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub google_maps_url: String,
    #[serde(default)]
    pub booking_url: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: f64,
    #[serde(default)]
    pub distance_hint: f64,
    #[serde(default)]
    pub vibe_score: f64,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Place {
    pub fn has_coords(&self) -> bool {
        self.lat.is_some() && self.lng.is_some()
    }
}
