// src/fetch/mod.rs
// =============================================================================
// Page fetching.
//
// Submodules:
// - http: bounded GET with typed failures and the content-type policy
// - mock: canned in-memory fetcher (tests only)
// =============================================================================

mod http;
#[cfg(test)]
pub mod mock;

pub use http::{FetchPolicy, HttpFetcher, PageFetcher, USER_AGENT};
