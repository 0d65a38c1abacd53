// Post fetching — paginated reads from the `posts` table.
//
// Fetches every geotagged post for the map, oldest first. Ascending
// creation order matters downstream: the aggregator treats the earliest
// post at a location as the pin's representative ("first discoverer").

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::client::SupabaseClient;

/// Page size for post fetches (PostgREST caps responses server-side anyway).
const PAGE_SIZE: usize = 500;

/// A post row — just the fields the map needs.
///
/// `latitude`/`longitude` are nullable at the wire level: rows created
/// before location capture shipped have no coordinates. The aggregator
/// excludes those rather than failing.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub memo: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub user_id: String,
}

/// Fetch posts for the map, handling pagination automatically.
///
/// `max_posts` caps how many rows to collect. Rows come back ascending by
/// `created_at` so downstream grouping sees them in discovery order.
pub async fn fetch_posts(client: &SupabaseClient, max_posts: usize) -> Result<Vec<Post>> {
    let mut posts: Vec<Post> = Vec::new();

    loop {
        let page_size = PAGE_SIZE.min(max_posts.saturating_sub(posts.len()));
        if page_size == 0 {
            break;
        }
        let limit = page_size.to_string();
        let offset = posts.len().to_string();

        let page: Vec<Post> = client
            .rest_get(
                "posts",
                &[
                    (
                        "select",
                        "id,title,memo,image_url,created_at,latitude,longitude,user_id",
                    ),
                    ("order", "created_at.asc"),
                    ("limit", &limit),
                    ("offset", &offset),
                ],
            )
            .await
            .context("Failed to fetch posts")?;

        let page_len = page.len();
        posts.extend(page);

        debug!(
            page_posts = page_len,
            total = posts.len(),
            "Fetched post page"
        );

        if page_len < page_size {
            break;
        }
    }

    Ok(posts)
}
