// src/extract/links.rs
// =============================================================================
// Extracts outbound links from a cleaned HTML document.
//
// For every <a href="...">:
// - resolve against the page's own URL ("/docs" -> "https://site/docs")
// - keep only http/https, strip "#fragment"
// - drop anything the crawl has already visited
//
// Links inside removed noise (nav, header, footer, ...) are never seen.
// Duplicates within one page are kept; the frontier checks visited state
// again when it queues them.
// =============================================================================

use scraper::{Html, Selector};
use tracing::trace;
use url::Url;

use crate::crawl::canonical::resolve;

pub fn extract_page_links<F>(document: &Html, page_url: &Url, is_visited: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let selector = Selector::parse("a[href]").expect("static selector is valid");

    // Through the live tree: detached noise is still in the arena
    document
        .root_element()
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| match resolve(page_url, href) {
            Ok(url) => Some(url),
            Err(e) => {
                trace!(href, error = %e, "skipping link");
                None
            }
        })
        .map(String::from)
        .filter(|url| !is_visited(url.as_str()))
        .collect()
}
