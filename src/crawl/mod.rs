// src/crawl/mod.rs
// =============================================================================
// Website crawling.
//
// Submodules:
// - canonical: canonical URLs and same-domain scoping
// - frontier: the FIFO queue + visited set owned by one crawl
// - orchestrator: the breadth-first loop and the final report
// =============================================================================

pub mod canonical;
mod frontier;
mod orchestrator;

pub use orchestrator::{crawl, CrawlOptions, CrawlReport};
