// Unit tests for the proximity aggregator.
//
// Covers the partition properties: chaining membership, exclusion of
// coordinate-less posts, determinism, and the first-match-wins rule for
// posts that bridge two existing groups.

use chrono::{Duration, TimeZone, Utc};

use monhoru_map::cluster::{aggregate, PinGroup};
use monhoru_map::supabase::posts::Post;

/// Build a post at the given coordinate. Ids double as creation order:
/// each post is created one minute after the previous one.
fn post(seq: i64, id: &str, lat: Option<f64>, lng: Option<f64>) -> Post {
    Post {
        id: id.to_string(),
        title: format!("マンホール {id}"),
        memo: String::new(),
        image_url: None,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap() + Duration::minutes(seq),
        latitude: lat,
        longitude: lng,
        user_id: format!("user-{id}"),
    }
}

fn member_ids(group: &PinGroup) -> Vec<&str> {
    group.members.iter().map(|m| m.id.as_str()).collect()
}

// ============================================================
// Grouping — proximity and partitioning
// ============================================================

#[test]
fn nearby_posts_share_a_group_distant_posts_do_not() {
    let posts = vec![
        post(0, "a", Some(35.6980), Some(139.7700)),
        post(1, "b", Some(35.6981), Some(139.7701)),
        post(2, "c", Some(35.8000), Some(139.9000)),
    ];

    let result = aggregate(&posts);

    assert_eq!(result.groups.len(), 2);
    assert_eq!(member_ids(&result.groups[0]), vec!["a", "b"]);
    assert_eq!(member_ids(&result.groups[1]), vec!["c"]);
    assert_eq!(result.excluded, 0);
}

#[test]
fn chained_membership_links_posts_beyond_the_threshold() {
    // a-b and b-c are each within the threshold; a-c is not. All three
    // still form one group because membership chains through b.
    let posts = vec![
        post(0, "a", Some(35.0000), Some(139.0)),
        post(1, "b", Some(35.00035), Some(139.0)),
        post(2, "c", Some(35.0007), Some(139.0)),
    ];

    let result = aggregate(&posts);

    assert_eq!(result.groups.len(), 1);
    assert_eq!(member_ids(&result.groups[0]), vec!["a", "b", "c"]);
}

#[test]
fn bridging_post_joins_the_first_matching_group() {
    // a and b are too far apart to merge and form separate groups. c is
    // nearby both; the earlier group wins and the two groups stay apart.
    let posts = vec![
        post(0, "a", Some(35.0000), Some(139.0)),
        post(1, "b", Some(35.0007), Some(139.0)),
        post(2, "c", Some(35.00035), Some(139.0)),
    ];

    let result = aggregate(&posts);

    assert_eq!(result.groups.len(), 2);
    assert_eq!(member_ids(&result.groups[0]), vec!["a", "c"]);
    assert_eq!(member_ids(&result.groups[1]), vec!["b"]);
}

// ============================================================
// Exclusion of coordinate-less posts
// ============================================================

#[test]
fn posts_without_coordinates_are_excluded_and_counted() {
    let posts = vec![
        post(0, "a", Some(35.6980), Some(139.7700)),
        post(1, "b", None, Some(139.7700)),
        post(2, "c", Some(35.6980), None),
        post(3, "d", None, None),
    ];

    let result = aggregate(&posts);

    assert_eq!(result.excluded, 3);
    assert_eq!(result.groups.len(), 1);
    for group in &result.groups {
        for member in &group.members {
            assert!(member.latitude.is_some() && member.longitude.is_some());
        }
    }
}

#[test]
fn empty_input_produces_empty_aggregation() {
    let result = aggregate(&[]);
    assert!(result.groups.is_empty());
    assert_eq!(result.excluded, 0);
}

// ============================================================
// Stability — determinism, representatives, member order
// ============================================================

#[test]
fn aggregate_is_deterministic_for_a_fixed_input_order() {
    let posts = vec![
        post(0, "a", Some(35.6980), Some(139.7700)),
        post(1, "b", Some(35.6981), Some(139.7701)),
        post(2, "c", Some(35.8000), Some(139.9000)),
        post(3, "d", Some(35.69805), Some(139.77005)),
    ];

    let first = aggregate(&posts);
    let second = aggregate(&posts);

    assert_eq!(first.groups.len(), second.groups.len());
    for (g1, g2) in first.groups.iter().zip(second.groups.iter()) {
        assert_eq!(g1.key(), g2.key());
        assert_eq!(member_ids(g1), member_ids(g2));
    }
}

#[test]
fn representative_coordinate_is_the_first_member_and_never_moves() {
    let posts = vec![
        post(0, "a", Some(35.6980), Some(139.7700)),
        post(1, "b", Some(35.6981), Some(139.7701)),
        post(2, "c", Some(35.6982), Some(139.7702)),
    ];

    let result = aggregate(&posts);

    assert_eq!(result.groups.len(), 1);
    let group = &result.groups[0];
    assert_eq!(group.latitude, 35.6980);
    assert_eq!(group.longitude, 139.7700);
    assert_eq!(group.first().id, "a");
}

#[test]
fn members_keep_fetch_order_earliest_first() {
    let posts = vec![
        post(0, "first", Some(35.0), Some(139.0)),
        post(1, "second", Some(35.0001), Some(139.0001)),
        post(2, "third", Some(35.0002), Some(139.0)),
    ];

    let result = aggregate(&posts);

    assert_eq!(result.groups.len(), 1);
    assert_eq!(member_ids(&result.groups[0]), vec!["first", "second", "third"]);
    let times: Vec<_> = result.groups[0].members.iter().map(|m| m.created_at).collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn fresh_groups_have_no_address() {
    let result = aggregate(&[post(0, "a", Some(35.0), Some(139.0))]);
    assert_eq!(result.groups[0].address, "");
}
