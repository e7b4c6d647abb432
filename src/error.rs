// src/error.rs
// =============================================================================
// Typed failures for every layer of the tool.
//
// - UrlError:   a string could not become a canonical http(s) URL
// - FetchError: a single page could not be retrieved (recoverable in a crawl)
// - ToolError:  a failure surfaced to the caller of search / fetch / crawl
//
// The crawl loop pattern-matches on UrlError and FetchError and moves on;
// only ToolError ever reaches the user.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Invalid URL '{input}': {reason}")]
    Invalid { input: String, reason: String },

    #[error("Unsupported URL scheme '{scheme}' in {url}")]
    UnsupportedScheme { url: String, scheme: String },
}

/// Why a page fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Too many redirects")]
    TooManyRedirects,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] FetchError),

    #[error("Cannot connect to SearXNG at {base_url}. Is the server running?")]
    SearchUnavailable { base_url: String },

    #[error("Search failed: {0}")]
    Search(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}
