use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Supabase project URL (e.g. https://xyz.supabase.co)
    pub supabase_url: String,
    /// Supabase anon key — read-only access to posts and user names.
    pub supabase_anon_key: String,
    /// Reverse-geocoding endpoint (defaults to the public Nominatim instance).
    pub geocoder_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the geocoder URL has a default — the Supabase credentials are
    /// required for anything that touches the backend.
    pub fn load() -> Result<Self> {
        Ok(Self {
            supabase_url: env::var("SUPABASE_URL").unwrap_or_default(),
            supabase_anon_key: env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
            geocoder_url: env::var("MONHORU_GEOCODER_URL")
                .unwrap_or_else(|_| crate::geocode::nominatim::DEFAULT_NOMINATIM_URL.to_string()),
        })
    }

    /// Check that the Supabase credentials are configured.
    /// Call this before any operation that fetches posts or user names.
    pub fn require_supabase(&self) -> Result<()> {
        if self.supabase_url.is_empty() || self.supabase_anon_key.is_empty() {
            anyhow::bail!(
                "SUPABASE_URL and SUPABASE_ANON_KEY not set. Add them to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
