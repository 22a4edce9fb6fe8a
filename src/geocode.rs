use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{info, warn};

use crate::place::Place;

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = "placesync/0.1 (personal trip planner)";

/// Nominatim's usage policy caps clients at one request per second.
/// Every lookup attempt is followed by this delay; never shorten it and
/// never run lookups in parallel.
pub const LOOKUP_DELAY: Duration = Duration::from_millis(1100);

#[derive(Debug, Default, PartialEq)]
pub struct GeocodeStats {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl GeocodeStats {
    pub fn print(&self) {
        println!(
            "Geocoded {} places ({} skipped, {} failed).",
            self.updated, self.skipped, self.failed
        );
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

pub fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build geocoding HTTP client")
}

/// Resolve one free-text address to coordinates. `Ok(None)` means the
/// service returned no match for the address.
pub async fn lookup(client: &reqwest::Client, address: String) -> Result<Option<(f64, f64)>> {
    let results: Vec<SearchResult> = client
        .get(SEARCH_URL)
        .query(&[("q", address.as_str()), ("format", "json"), ("limit", "1")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(results.first().and_then(parse_coords))
}

fn parse_coords(result: &SearchResult) -> Option<(f64, f64)> {
    Some((result.lat.parse().ok()?, result.lon.parse().ok()?))
}

/// Geocode every place that is missing coordinates, strictly in sequence.
///
/// Records that already carry coordinates are skipped; records without an
/// address, or whose lookup errors or comes back empty, are counted as
/// failed and left untouched. One record's failure never aborts the run.
/// `lookup` and `delay` are parameters so tests run without network or
/// wall-clock waits.
pub async fn geocode_all<L, LFut, D, DFut>(
    places: &mut [Place],
    mut lookup: L,
    delay: D,
) -> GeocodeStats
where
    L: FnMut(String) -> LFut,
    LFut: Future<Output = Result<Option<(f64, f64)>>>,
    D: Fn() -> DFut,
    DFut: Future<Output = ()>,
{
    let pb = ProgressBar::new(places.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} (eta {eta})")
            .unwrap()
            .progress_chars("=> "),
    );

    let mut stats = GeocodeStats::default();

    for place in places.iter_mut() {
        if place.has_coords() {
            stats.skipped += 1;
            pb.inc(1);
            continue;
        }
        if place.address.is_empty() {
            warn!("{}: no address, cannot geocode", place.name);
            stats.failed += 1;
            pb.inc(1);
            continue;
        }

        match lookup(place.address.clone()).await {
            Ok(Some((lat, lng))) => {
                info!("{}: {} -> ({}, {})", place.name, place.address, lat, lng);
                place.lat = Some(lat);
                place.lng = Some(lng);
                stats.updated += 1;
            }
            Ok(None) => {
                warn!("{}: no result for {:?}", place.name, place.address);
                stats.failed += 1;
            }
            Err(e) => {
                warn!("{}: lookup failed: {e:#}", place.name);
                stats.failed += 1;
            }
        }

        delay().await;
        pb.inc(1);
    }

    pb.finish_and_clear();
    stats
}
