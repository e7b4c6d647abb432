// src/config.rs
// =============================================================================
// Environment configuration.
//
// SEARXNG_URL   base URL of the metasearch instance
//               (default: http://localhost:8080)
//
// A .env file in the working directory is loaded first if one exists.
// =============================================================================

use dotenvy::dotenv;
use std::env;

pub const DEFAULT_SEARXNG_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub searxng_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let _ = dotenv();
        Self::from_value(env::var("SEARXNG_URL").ok())
    }

    fn from_value(searxng_url: Option<String>) -> Self {
        let url = searxng_url
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SEARXNG_URL.to_string());

        Self { searxng_url: url }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_value(None)
    }
}
