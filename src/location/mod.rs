// Device location — a scoped watch subscription for the map.

pub mod watch;

pub use watch::{GeoPoint, LocationProvider, LocationWatch};
