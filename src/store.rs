use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::place::Place;

pub const PLACES_PATH: &str = "data/places.json";

/// Overwrite the places file with the full collection, pretty-printed
/// with two-space indent. Parent directories are created if missing.
pub fn write_places(path: &Path, places: &[Place]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let mut json = serde_json::to_string_pretty(places)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn read_places(path: &Path) -> Result<Vec<Place>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Place> {
        vec![
            Place {
                id: "p-1".into(),
                name: "Trattoria X".into(),
                category: "Trattoria".into(),
                price: "€€".into(),
                address: "Via Roma 1, Rome".into(),
                phone: "+39 06 123".into(),
                website: "https://example.com".into(),
                google_maps_url: "".into(),
                booking_url: "".into(),
                notes: "Book ahead".into(),
                rating: 4.5,
                review_count: 812.0,
                distance_hint: 0.0,
                vibe_score: 7.5,
                confidence_score: 0.9,
                lat: Some(41.8902),
                lng: Some(12.4922),
            },
            Place {
                id: "p-2".into(),
                name: "Bar Y".into(),
                category: "Bar".into(),
                price: "".into(),
                address: "".into(),
                phone: "".into(),
                website: "".into(),
                google_maps_url: "".into(),
                booking_url: "".into(),
                notes: "".into(),
                rating: 0.0,
                review_count: 0.0,
                distance_hint: 0.0,
                vibe_score: 0.0,
                confidence_score: 0.0,
                lat: None,
                lng: None,
            },
        ]
    }

    #[test]
    fn round_trip_is_deep_equal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.json");
        let places = sample();
        write_places(&path, &places).unwrap();
        let loaded = read_places(&path).unwrap();
        assert_eq!(loaded, places);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/places.json");
        write_places(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.json");
        write_places(&path, &sample()).unwrap();
        write_places(&path, &[]).unwrap();
        assert_eq!(read_places(&path).unwrap(), vec![]);
    }

    #[test]
    fn missing_coords_are_omitted_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.json");
        write_places(&path, &sample()).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        let values: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        assert!(values[0].get("lat").is_some());
        assert!(values[1].get("lat").is_none());
        assert!(values[1].get("lng").is_none());
        // two-space indent
        assert!(raw.contains("\n  {"));
    }
}
