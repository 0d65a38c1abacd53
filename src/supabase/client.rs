// Thin Supabase PostgREST client — unauthenticated reads with the anon key.
//
// The map only ever reads (posts, user names); row-level security on the
// backend keeps the anon key harmless. Writes go through the upload flow,
// which is a different part of the app entirely.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for PostgREST reads against a Supabase project.
///
/// A thin reqwest wrapper with a generic table-GET helper. Every read
/// endpoint the map uses goes through `rest_get`.
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// Create a new client for the given project URL and anon key.
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("monhoru-map/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    /// Make a GET request against a table and deserialize the JSON rows.
    ///
    /// `table` is the bare table name (e.g. "posts"). `params` are
    /// PostgREST query pairs — selects, filters, ordering, limits.
    pub async fn rest_get<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);

        debug!(table = table, "PostgREST GET request");

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(params)
            .send()
            .await
            .with_context(|| format!("PostgREST request failed: {table}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("PostgREST {table} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {table} response"))
    }
}
