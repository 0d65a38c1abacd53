// Nominatim reverse geocoding client.
//
// Queries the OSM Nominatim `/reverse` endpoint with address details and
// maps its loosely-structured address object onto region + locality.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::traits::{PlaceName, ReverseGeocoder};

/// Default public Nominatim instance.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Reverse geocoder backed by a Nominatim instance.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: AddressDetails,
}

/// Nominatim's address object — which keys appear depends on the place.
/// Only the levels the map cares about are modeled.
#[derive(Debug, Default, Deserialize)]
struct AddressDetails {
    state: Option<String>,
    province: Option<String>,
    county: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
}

impl NominatimGeocoder {
    /// Create a new geocoder pointing at the given base URL.
    ///
    /// The public instance requires an identifying user agent; pass a
    /// different URL for a self-hosted mirror or for testing.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("monhoru-map/0.1 (pin address resolution)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<PlaceName> {
        let url = format!("{}/reverse", self.base_url);
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        debug!(latitude = latitude, longitude = longitude, "Reverse geocode request");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "jsonv2"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("addressdetails", "1"),
                ("accept-language", "ja"),
                ("zoom", "14"),
            ])
            .send()
            .await
            .context("Nominatim request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Nominatim returned {status}: {body}");
        }

        let reverse: ReverseResponse = response
            .json()
            .await
            .context("Failed to parse Nominatim response")?;

        let addr = reverse.address;
        let region = addr
            .state
            .or(addr.province)
            .or(addr.county)
            .unwrap_or_default();
        let locality = addr
            .city
            .or(addr.town)
            .or(addr.village)
            .or(addr.municipality)
            .unwrap_or_default();

        Ok(PlaceName { region, locality })
    }
}
