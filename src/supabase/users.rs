// User-name resolution — batch id-to-display-name lookups.
//
// Used to label a pin's first discoverer. The `users` table is queried
// with an `in.(...)` filter in chunks to keep URLs bounded.

use std::collections::HashMap;

use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, warn};

use super::client::SupabaseClient;

/// Fallback shown for ids that fail to resolve or have no name set.
pub const ANONYMOUS_NAME: &str = "anonymous";

/// Ids per `in.(...)` filter chunk.
const CHUNK_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
struct UserRow {
    id: String,
    name: Option<String>,
}

/// Resolve a batch of user ids to their display names.
///
/// Returns a map of id → name. Ids that fail to resolve are omitted from
/// the result — use [`display_name`] at the call site to fall back.
/// A failed chunk is logged and skipped; one bad batch never hides the rest.
pub async fn resolve_display_names(
    client: &SupabaseClient,
    user_ids: &[String],
) -> Result<HashMap<String, String>> {
    let mut result = HashMap::new();

    for chunk in user_ids.chunks(CHUNK_SIZE) {
        let filter = format!("in.({})", chunk.join(","));

        let rows: Result<Vec<UserRow>> = client
            .rest_get("users", &[("select", "id,name"), ("id", &filter)])
            .await;

        match rows {
            Ok(rows) => {
                debug!(
                    resolved = rows.len(),
                    requested = chunk.len(),
                    "Resolved user names"
                );
                for row in rows {
                    if let Some(name) = row.name {
                        if !name.is_empty() {
                            result.insert(row.id, name);
                        }
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, batch_size = chunk.len(), "Failed to resolve user batch");
            }
        }
    }

    Ok(result)
}

/// Look up a display name, falling back to [`ANONYMOUS_NAME`].
pub fn display_name<'a>(names: &'a HashMap<String, String>, user_id: &str) -> &'a str {
    names.get(user_id).map(String::as_str).unwrap_or(ANONYMOUS_NAME)
}
