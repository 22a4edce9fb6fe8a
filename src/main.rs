mod config;
mod geocode;
mod normalize;
mod notion;
mod place;
mod store;

use std::path::Path;
use std::time::Instant;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "placesync", about = "Sync trip places from Notion and geocode them")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the Notion database and rewrite the places file
    Sync,
    /// Geocode places missing coordinates (one throttled lookup at a time)
    Geocode,
    /// Show geocoding coverage of the places file
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sync => sync().await,
        Commands::Geocode => run_geocode().await,
        Commands::Stats => stats(),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn sync() -> anyhow::Result<()> {
    let token = config::resolve_token()?;
    let pages = notion::query_database(&token).await?;
    let places: Vec<_> = pages.iter().map(normalize::normalize).collect();
    store::write_places(Path::new(store::PLACES_PATH), &places)?;
    println!("Synced {} places to {}", places.len(), store::PLACES_PATH);
    Ok(())
}

async fn run_geocode() -> anyhow::Result<()> {
    let path = Path::new(store::PLACES_PATH);
    let mut places = store::read_places(path)?;
    if places.is_empty() {
        println!("No places in {}. Run 'sync' first.", store::PLACES_PATH);
        return Ok(());
    }

    let client = geocode::client()?;
    println!(
        "Geocoding {} places (one lookup per {:.1}s)...",
        places.len(),
        geocode::LOOKUP_DELAY.as_secs_f64()
    );

    let stats = geocode::geocode_all(
        &mut places,
        |address| geocode::lookup(&client, address),
        || tokio::time::sleep(geocode::LOOKUP_DELAY),
    )
    .await;

    store::write_places(path, &places)?;
    stats.print();
    Ok(())
}

fn stats() -> anyhow::Result<()> {
    let places = store::read_places(Path::new(store::PLACES_PATH))?;
    let geocoded = places.iter().filter(|p| p.has_coords()).count();
    let no_address = places
        .iter()
        .filter(|p| !p.has_coords() && p.address.is_empty())
        .count();

    println!("Total:      {}", places.len());
    println!("Geocoded:   {}", geocoded);
    println!("Pending:    {}", places.len() - geocoded - no_address);
    println!("No address: {}", no_address);
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
