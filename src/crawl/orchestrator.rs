// src/crawl/orchestrator.rs
// =============================================================================
// Bounded breadth-first crawl.
//
// How it works:
// 1. Canonicalize the seed (the only fatal failure) and queue it at depth 0
// 2. Pop the oldest queued item, canonicalize it, mark it visited
// 3. Skip it if it is out of scope, fails to fetch, or is not html/plain text
// 4. Extract title/content; below the depth ceiling also extract links
// 5. Record the page, then queue its links at depth + 1
// 6. Stop when the queue is empty or max_pages pages have been recorded
//
// Every per-page failure is a Skip value. The loop logs it and moves on, so
// one bad page never aborts the crawl. Fetches are strictly sequential.
// =============================================================================

use serde::Serialize;
use std::fmt;
use tracing::{debug, info};
use url::Url;

use super::frontier::{Frontier, FrontierItem};
use super::canonical::{canonicalize, DomainScope};
use crate::error::{FetchError, UrlError};
use crate::extract::{extract_content, extract_page_links, parse_document, CRAWL_CONTENT_LIMIT};
use crate::fetch::PageFetcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrawlOptions {
    pub max_depth: usize,
    pub max_pages: usize,
    pub same_domain: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_pages: 10,
            same_domain: true,
        }
    }
}

/// One successfully crawled page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub depth: usize,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub start_url: String,
    pub pages_crawled: usize,
    pub max_depth: usize,
    pub pages: Vec<PageRecord>,
}

// Why a dequeued item produced no page
#[derive(Debug)]
enum Skip {
    InvalidUrl(UrlError),
    AlreadyVisited,
    OutOfScope,
    Fetch(FetchError),
    NotText(Option<String>),
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::InvalidUrl(e) => write!(f, "{}", e),
            Skip::AlreadyVisited => write!(f, "already visited"),
            Skip::OutOfScope => write!(f, "outside the start domain"),
            Skip::Fetch(e) => write!(f, "fetch failed: {}", e),
            Skip::NotText(Some(ct)) => write!(f, "content type {} not crawlable", ct),
            Skip::NotText(None) => write!(f, "no content type"),
        }
    }
}

/// Crawls from `start_url`. Only an unparseable seed is an error.
pub async fn crawl(
    start_url: &str,
    options: CrawlOptions,
    fetcher: &dyn PageFetcher,
) -> Result<CrawlReport, UrlError> {
    let seed = canonicalize(start_url)?;

    info!(
        url = %seed,
        max_depth = options.max_depth,
        max_pages = options.max_pages,
        same_domain = options.same_domain,
        "Starting crawl"
    );

    let pages = Crawl::new(&seed, options, fetcher).run().await;

    info!(url = %seed, pages = pages.len(), "Crawl finished");

    Ok(CrawlReport {
        start_url: start_url.to_string(),
        pages_crawled: pages.len(),
        max_depth: options.max_depth,
        pages,
    })
}

// The traversal state of one crawl call, owned by that call alone
struct Crawl<'a> {
    fetcher: &'a dyn PageFetcher,
    options: CrawlOptions,
    scope: DomainScope,
    frontier: Frontier,
    pages: Vec<PageRecord>,
}

impl<'a> Crawl<'a> {
    fn new(seed: &Url, options: CrawlOptions, fetcher: &'a dyn PageFetcher) -> Self {
        Self {
            fetcher,
            options,
            scope: DomainScope::for_seed(seed, options.same_domain),
            frontier: Frontier::with_seed(seed.as_str()),
            pages: Vec::new(),
        }
    }

    async fn run(mut self) -> Vec<PageRecord> {
        while self.pages.len() < self.options.max_pages {
            let Some(item) = self.frontier.pop() else {
                break;
            };

            match self.visit(&item).await {
                Ok(record) => {
                    let links = record.links.clone();
                    self.pages.push(record);
                    if item.depth < self.options.max_depth {
                        self.enqueue(links, item.depth + 1);
                    }
                }
                Err(skip) => {
                    debug!(url = %item.url, depth = item.depth, reason = %skip, "Skipping");
                }
            }
        }

        if !self.frontier.is_empty() {
            debug!(queued = self.frontier.len(), "Page budget reached with links still queued");
        }
        self.pages
    }

    async fn visit(&mut self, item: &FrontierItem) -> Result<PageRecord, Skip> {
        let url = canonicalize(&item.url).map_err(Skip::InvalidUrl)?;

        // Visited at dequeue time: a failed fetch is never retried
        if !self.frontier.mark_visited(url.as_str()) {
            return Err(Skip::AlreadyVisited);
        }
        if !self.scope.contains(&url) {
            return Err(Skip::OutOfScope);
        }

        info!(url = %url, depth = item.depth, "Crawling");

        let fetched = self.fetcher.fetch(&url).await.map_err(Skip::Fetch)?;
        if !fetched.is_crawlable() {
            return Err(Skip::NotText(fetched.content_type));
        }

        let follow_links = item.depth < self.options.max_depth;
        Ok(self.read_page(url, item.depth, &fetched.body, follow_links))
    }

    fn read_page(&self, url: Url, depth: usize, body: &str, follow_links: bool) -> PageRecord {
        let document = parse_document(body);
        let page = extract_content(&document, CRAWL_CONTENT_LIMIT);

        let links = if follow_links {
            extract_page_links(&document, &url, |link| self.frontier.is_visited(link))
        } else {
            Vec::new()
        };

        PageRecord {
            url: url.into(),
            title: page.title,
            content: page.content,
            depth,
            links,
        }
    }

    // Soft admission cap: recorded + queued stays below twice the page budget
    fn enqueue(&mut self, links: Vec<String>, depth: usize) {
        let cap = self.options.max_pages.saturating_mul(2);
        for link in links {
            if self.pages.len() + self.frontier.len() >= cap {
                debug!(depth, "Frontier full, dropping remaining links");
                break;
            }
            self.frontier.push(link, depth);
        }
    }
}

impl fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Crawl results for: {}", self.start_url)?;
        writeln!(f, "Pages crawled: {}", self.pages_crawled)?;
        writeln!(f, "Max depth: {}", self.max_depth)?;

        for (i, page) in self.pages.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "=== Page {} [depth {}] ===", i + 1, page.depth)?;
            writeln!(f, "URL: {}", page.url)?;
            if let Some(title) = &page.title {
                writeln!(f, "Title: {}", title)?;
            }
            writeln!(f, "Content:")?;
            writeln!(f, "{}", page.content)?;
            if !page.links.is_empty() {
                writeln!(f, "Links found: {}", page.links.len())?;
            }
        }

        Ok(())
    }
}
