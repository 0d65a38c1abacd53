// Single-pass proximity grouping.
//
// Posts arrive ascending by creation time; each one either joins the
// first existing group with a nearby member or starts a new group. The
// scan is O(n²) over valid posts — the map shows hundreds of pins, not
// millions, so no spatial index.

use tracing::debug;

use crate::supabase::posts::Post;

/// Proximity threshold in degrees, per axis (~40 m at mid-latitudes).
///
/// Equirectangular box comparison, not geodesic distance. Good enough to
/// merge covers photographed from opposite sides of the same street.
pub const NEARBY_THRESHOLD_DEG: f64 = 0.0004;

/// Two coordinates are nearby when both axis deltas are under the threshold.
pub fn is_nearby(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> bool {
    (lat_a - lat_b).abs() < NEARBY_THRESHOLD_DEG && (lng_a - lng_b).abs() < NEARBY_THRESHOLD_DEG
}

/// Stable identity for a group, derived from its representative coordinate.
///
/// Quantized to microdegrees so async results (geocoding) can be applied
/// by key instead of by position in the group list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey {
    lat_e6: i64,
    lng_e6: i64,
}

impl GroupKey {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            lat_e6: (latitude * 1e6).round() as i64,
            lng_e6: (longitude * 1e6).round() as i64,
        }
    }
}

/// One map pin: the posts merged at (approximately) one location.
///
/// The representative coordinate is the first member's — not a centroid —
/// so the pin never moves as later members join during the pass. Members
/// keep fetch order, which puts the first discoverer at the front.
#[derive(Debug, Clone)]
pub struct PinGroup {
    pub latitude: f64,
    pub longitude: f64,
    pub members: Vec<Post>,
    /// Display address, empty until reverse geocoding resolves it.
    pub address: String,
}

impl PinGroup {
    fn new(post: Post, latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            members: vec![post],
            address: String::new(),
        }
    }

    /// The first discoverer's post. Groups are never empty.
    pub fn first(&self) -> &Post {
        &self.members[0]
    }

    pub fn key(&self) -> GroupKey {
        GroupKey::new(self.latitude, self.longitude)
    }

    /// Whether any member sits within the proximity threshold of the point.
    ///
    /// Membership chains: a post can be nearby the newest member while far
    /// from the representative, and it still belongs here.
    fn contains_nearby(&self, latitude: f64, longitude: f64) -> bool {
        self.members.iter().any(|m| {
            match (m.latitude, m.longitude) {
                (Some(lat), Some(lng)) => is_nearby(lat, lng, latitude, longitude),
                _ => false,
            }
        })
    }
}

/// The result of one grouping pass.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub groups: Vec<PinGroup>,
    /// Posts dropped for missing coordinates.
    pub excluded: usize,
}

/// Group posts into map pins by proximity.
///
/// Posts without coordinates are excluded and counted, never an error.
/// The first matching group wins; a post nearby two distant groups joins
/// whichever was created earlier, and the groups are not merged.
/// Deterministic for a fixed input order.
pub fn aggregate(posts: &[Post]) -> Aggregation {
    let mut groups: Vec<PinGroup> = Vec::new();
    let mut excluded = 0usize;

    for post in posts {
        let (Some(lat), Some(lng)) = (post.latitude, post.longitude) else {
            excluded += 1;
            continue;
        };

        match groups.iter_mut().find(|g| g.contains_nearby(lat, lng)) {
            Some(group) => group.members.push(post.clone()),
            None => groups.push(PinGroup::new(post.clone(), lat, lng)),
        }
    }

    if excluded > 0 {
        debug!(excluded, "Skipped posts without coordinates");
    }

    Aggregation { groups, excluded }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        // Exactly one threshold apart on an axis is NOT nearby.
        assert!(!is_nearby(35.0, 139.0, 35.0 + NEARBY_THRESHOLD_DEG, 139.0));
        assert!(is_nearby(35.0, 139.0, 35.0 + NEARBY_THRESHOLD_DEG * 0.99, 139.0));
    }

    #[test]
    fn nearby_requires_both_axes() {
        // Close in latitude but far in longitude is not nearby.
        assert!(!is_nearby(35.0, 139.0, 35.0001, 139.01));
    }

    #[test]
    fn group_key_quantizes() {
        assert_eq!(
            GroupKey::new(35.698012, 139.770049),
            GroupKey::new(35.6980121, 139.7700489)
        );
        assert_ne!(GroupKey::new(35.6980, 139.7700), GroupKey::new(35.6981, 139.7700));
    }
}
