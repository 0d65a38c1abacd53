use std::collections::HashSet;

use anyhow::Result;
use clap::{Parser, Subcommand};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use monhoru_map::config;
use monhoru_map::geocode::nominatim::NominatimGeocoder;
use monhoru_map::supabase::client::SupabaseClient;

/// Monhoru map core: pin clustering and address resolution.
///
/// Groups geotagged manhole posts into map pins and resolves display
/// addresses, the same pipeline the app's map view runs.
#[derive(Parser)]
#[command(name = "monhoru-map", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch posts, group them into pins, and print the pin list
    Pins {
        /// Also resolve a display address for every pin
        #[arg(long)]
        addresses: bool,

        /// Max posts to fetch (default: 500)
        #[arg(long, default_value = "500")]
        limit: u32,

        /// Concurrent geocoding requests (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: u32,
    },

    /// Reverse geocode a single coordinate
    Address {
        latitude: f64,
        longitude: f64,
    },

    /// Show configured endpoints
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("monhoru_map=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pins {
            addresses,
            limit,
            concurrency,
        } => {
            let config = config::Config::load()?;
            config.require_supabase()?;
            let client = SupabaseClient::new(&config.supabase_url, &config.supabase_anon_key)?;

            println!("Fetching posts (up to {limit})...");
            let posts = monhoru_map::supabase::posts::fetch_posts(&client, limit as usize).await?;

            let mut aggregation = monhoru_map::cluster::aggregate(&posts);
            info!(
                posts = posts.len(),
                groups = aggregation.groups.len(),
                excluded = aggregation.excluded,
                "Aggregated map pins"
            );

            // Resolve display names for each pin's first discoverer
            let mut seen = HashSet::new();
            let discoverers: Vec<String> = aggregation
                .groups
                .iter()
                .map(|g| g.first().user_id.clone())
                .filter(|id| seen.insert(id.clone()))
                .collect();
            let names =
                monhoru_map::supabase::users::resolve_display_names(&client, &discoverers).await?;

            if addresses && !aggregation.groups.is_empty() {
                let geocoder = NominatimGeocoder::new(&config.geocoder_url)?;
                println!(
                    "Resolving addresses for {} pins ({} concurrent)...",
                    aggregation.groups.len(),
                    concurrency,
                );

                let pb = ProgressBar::new(aggregation.groups.len() as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("  Geocoding [{bar:30}] {pos}/{len} ({eta})")
                        .unwrap(),
                );

                // Addresses resolve out of order; each result carries its
                // group index so it lands on the right pin.
                let coords: Vec<(usize, f64, f64)> = aggregation
                    .groups
                    .iter()
                    .enumerate()
                    .map(|(i, g)| (i, g.latitude, g.longitude))
                    .collect();

                let geocoder_ref = &geocoder;
                let results: Vec<(usize, String)> =
                    stream::iter(coords.into_iter().map(|(i, lat, lng)| async move {
                        let address =
                            monhoru_map::geocode::resolve_display_address(geocoder_ref, lat, lng)
                                .await;
                        (i, address)
                    }))
                    .buffer_unordered(concurrency as usize)
                    .collect()
                    .await;

                for (i, address) in results {
                    aggregation.groups[i].address = address;
                    pb.inc(1);
                }
                pb.finish_and_clear();
            }

            monhoru_map::output::terminal::display_pin_list(
                &aggregation.groups,
                &names,
                aggregation.excluded,
            );
        }

        Commands::Address {
            latitude,
            longitude,
        } => {
            let config = config::Config::load()?;
            let geocoder = NominatimGeocoder::new(&config.geocoder_url)?;

            let address =
                monhoru_map::geocode::resolve_display_address(&geocoder, latitude, longitude).await;
            if address.is_empty() {
                println!("No address found for ({latitude}, {longitude})");
            } else {
                println!("{address}");
            }
        }

        Commands::Status => {
            let config = config::Config::load()?;

            if config.supabase_url.is_empty() {
                println!("Supabase: not configured");
                println!("  Set SUPABASE_URL and SUPABASE_ANON_KEY in your .env file");
            } else {
                println!("Supabase: {}", config.supabase_url);
                let key = if config.supabase_anon_key.is_empty() {
                    "missing"
                } else {
                    "present"
                };
                println!("Anon key: {key}");
            }
            println!("Geocoder: {}", config.geocoder_url);
        }
    }

    Ok(())
}
