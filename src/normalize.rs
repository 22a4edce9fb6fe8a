use std::collections::HashMap;

use crate::notion::{Page, Property};
use crate::place::Place;

/// Map one raw database row to a `Place`.
///
/// Total: a property that is absent, of the wrong kind, or empty degrades
/// to "" or 0 instead of failing.
pub fn normalize(page: &Page) -> Place {
    let p = &page.properties;

    Place {
        id: page.id.clone(),
        name: text(p, "Name"),
        category: select(p, "Category"),
        price: select(p, "Price"),
        address: text(p, "Address"),
        phone: phone(p, "Phone"),
        website: url(p, "Website"),
        google_maps_url: url(p, "Google Maps URL"),
        booking_url: url(p, "Booking URL"),
        notes: text(p, "Notes"),
        rating: number(p, "Rating"),
        review_count: number(p, "Review Count"),
        distance_hint: number(p, "Distance Hint"),
        vibe_score: number(p, "Vibe Score"),
        confidence_score: number(p, "Confidence Score"),
        lat: None,
        lng: None,
    }
}

/// First text run's plain content from a title or rich-text property.
fn text(props: &HashMap<String, Property>, key: &str) -> String {
    match props.get(key) {
        Some(Property::Title { title }) => first_run(title),
        Some(Property::RichText { rich_text }) => first_run(rich_text),
        _ => String::new(),
    }
}

fn first_run(runs: &[crate::notion::TextRun]) -> String {
    runs.first().map(|r| r.plain_text.clone()).unwrap_or_default()
}

fn select(props: &HashMap<String, Property>, key: &str) -> String {
    match props.get(key) {
        Some(Property::Select { select: Some(opt) }) => opt.name.clone(),
        _ => String::new(),
    }
}

fn number(props: &HashMap<String, Property>, key: &str) -> f64 {
    match props.get(key) {
        Some(Property::Number { number: Some(n) }) => *n,
        _ => 0.0,
    }
}

fn url(props: &HashMap<String, Property>, key: &str) -> String {
    match props.get(key) {
        Some(Property::Url { url: Some(u) }) => u.clone(),
        _ => String::new(),
    }
}

fn phone(props: &HashMap<String, Property>, key: &str) -> String {
    match props.get(key) {
        Some(Property::PhoneNumber {
            phone_number: Some(n),
        }) => n.clone(),
        _ => String::new(),
    }
}
