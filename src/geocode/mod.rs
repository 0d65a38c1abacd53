// Reverse geocoding — trait-based abstraction for swappable providers.
//
// The ReverseGeocoder trait defines the interface. NominatimGeocoder
// implements it against the public OSM instance; tests swap in mocks.

pub mod nominatim;
pub mod traits;

pub use nominatim::NominatimGeocoder;
pub use traits::{PlaceName, ReverseGeocoder};

use tracing::warn;

/// Resolve a display address, swallowing failures into an empty string.
///
/// The map prefers a blank address line over a crash — a pin with no
/// address is still a pin.
pub async fn resolve_display_address(
    geocoder: &dyn ReverseGeocoder,
    latitude: f64,
    longitude: f64,
) -> String {
    match geocoder.reverse(latitude, longitude).await {
        Ok(place) => place.display(),
        Err(e) => {
            warn!(
                latitude = latitude,
                longitude = longitude,
                error = %e,
                "Reverse geocoding failed"
            );
            String::new()
        }
    }
}
