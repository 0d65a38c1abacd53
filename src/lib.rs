// Monhoru map core: pin clustering and bottom-sheet disclosure.
//
// This is the library root. Each module corresponds to one subsystem of
// the map view: grouping geotagged posts into pins, resolving addresses,
// driving the disclosure panel, and talking to the backend.

pub mod cluster;
pub mod config;
pub mod geocode;
pub mod location;
pub mod output;
pub mod panel;
pub mod session;
pub mod supabase;
