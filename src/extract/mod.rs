// src/extract/mod.rs
// =============================================================================
// Turning fetched HTML into something readable.
//
// Submodules:
// - content: noise removal, title, main text, normalization, truncation
// - links: outbound link discovery and resolution
// =============================================================================

mod content;
mod links;

pub use content::{
    extract_content, parse_document, truncate_chars, CRAWL_CONTENT_LIMIT, FETCH_CONTENT_LIMIT,
};
pub use links::extract_page_links;
