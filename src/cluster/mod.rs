// Pin clustering — proximity grouping of geotagged posts.

pub mod aggregate;

pub use aggregate::{aggregate, is_nearby, Aggregation, GroupKey, PinGroup, NEARBY_THRESHOLD_DEG};
