// Reverse geocoder trait — the swap-ready abstraction.
//
// Implementations must be async because every real provider is an HTTP
// API. Tests use in-process mocks.

use anyhow::Result;
use async_trait::async_trait;

/// Place-name components extracted from a geocoder response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceName {
    /// Prefecture / state level component.
    pub region: String,
    /// City / town / village level component.
    pub locality: String,
}

impl PlaceName {
    /// The address line shown on a pin: region then locality, run together
    /// in the Japanese postal style ("東京都千代田区"). When the geocoder
    /// returns the same string for both levels, it appears once.
    pub fn display(&self) -> String {
        if self.locality.is_empty() || self.locality == self.region {
            self.region.clone()
        } else if self.region.is_empty() {
            self.locality.clone()
        } else {
            format!("{}{}", self.region, self.locality)
        }
    }
}

/// Trait for turning a coordinate into place-name components.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<PlaceName>;
}
