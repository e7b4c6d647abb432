// src/tools/mod.rs
// =============================================================================
// The three capabilities as named tools.
//
// - search:    forward a query to SearXNG and format the answer
// - web_fetch: fetch one page and return its title + readable text
// - web_crawl: breadth-first crawl from a URL and return a page report
//
// `Toolbox::call` dispatches by name with JSON arguments and never fails:
// every error becomes a ToolOutput with `is_error = true` and the message as
// text, which is what a request/response caller expects to display.
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::Config;
use crate::crawl::{self, canonical::canonicalize, CrawlOptions, CrawlReport};
use crate::error::ToolError;
use crate::extract::{extract_content, parse_document, FETCH_CONTENT_LIMIT};
use crate::fetch::{FetchPolicy, HttpFetcher, PageFetcher, USER_AGENT};
use crate::search::{SearchClient, SearchParams};

// Upper bounds applied to caller-supplied crawl arguments
pub const MAX_CRAWL_DEPTH: usize = 5;
pub const MAX_CRAWL_PAGES: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutput {
    pub text: String,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolOutput {
    fn from_result(result: Result<String, ToolError>) -> Self {
        match result {
            Ok(text) => Self {
                text,
                is_error: false,
            },
            Err(e) => Self {
                text: format!("Error: {}", e),
                is_error: true,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchArgs {
    pub url: String,
}

fn default_max_depth() -> usize {
    2
}

fn default_max_pages() -> usize {
    10
}

fn default_same_domain() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrawlArgs {
    pub url: String,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    #[serde(default = "default_same_domain")]
    pub same_domain: bool,
}

impl CrawlArgs {
    /// Crawl options with depth and page count clamped to the tool limits.
    pub fn options(&self) -> CrawlOptions {
        CrawlOptions {
            max_depth: self.max_depth.min(MAX_CRAWL_DEPTH),
            max_pages: self.max_pages.min(MAX_CRAWL_PAGES),
            same_domain: self.same_domain,
        }
    }
}

pub fn list_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "search",
            description: "Search the web using the SearXNG metasearch engine. Aggregates results \
                          from multiple search engines and supports search syntax such as \
                          \"site:github.com\", time range filters, categories and languages.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "The search query" },
                    "limit": { "type": "number", "description": "Maximum number of results to return (default: 10)", "default": 10 },
                    "category": { "type": "string", "description": "Search category: general, images, videos, news, science, files, music, social" },
                    "engines": { "type": "string", "description": "Comma-separated list of specific engines to use" },
                    "language": { "type": "string", "description": "Language code (e.g., en, fr, de, auto)" },
                    "time_range": { "type": "string", "enum": ["day", "month", "year"] },
                    "safesearch": { "type": "number", "description": "0 (none), 1 (moderate), 2 (strict)", "enum": [0, 1, 2] },
                    "pageno": { "type": "number", "description": "Page number (default: 1)", "default": 1 }
                },
                "required": ["query"]
            }),
        },
        ToolSpec {
            name: "web_fetch",
            description: "Fetch a URL and extract its title and main text content.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": { "type": "string", "description": "The URL to fetch and extract content from" }
                },
                "required": ["url"]
            }),
        },
        ToolSpec {
            name: "web_crawl",
            description: "Crawl a website breadth-first from a URL, following links to extract \
                          content from multiple pages.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": { "type": "string", "description": "The starting URL to crawl from" },
                    "max_depth": { "type": "number", "description": "Maximum link depth to follow (default: 2, max: 5)", "default": 2 },
                    "max_pages": { "type": "number", "description": "Maximum number of pages to crawl (default: 10, max: 50)", "default": 10 },
                    "same_domain": { "type": "boolean", "description": "Only crawl pages on the start URL's host (default: true)", "default": true }
                },
                "required": ["url"]
            }),
        },
    ]
}

pub struct Toolbox {
    search: SearchClient,
    page_fetcher: Box<dyn PageFetcher>,
    crawl_fetcher: Box<dyn PageFetcher>,
}

impl Toolbox {
    pub fn new(config: &Config) -> Result<Self> {
        let search_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create search HTTP client")?;

        Ok(Self::with_fetchers(
            SearchClient::new(search_client, config.searxng_url.clone()),
            Box::new(HttpFetcher::new(FetchPolicy::single_page())?),
            Box::new(HttpFetcher::new(FetchPolicy::crawl())?),
        ))
    }

    /// Builds a toolbox around explicit fetchers: one for `web_fetch`, one
    /// for the pages of `web_crawl`.
    pub fn with_fetchers(
        search: SearchClient,
        page_fetcher: Box<dyn PageFetcher>,
        crawl_fetcher: Box<dyn PageFetcher>,
    ) -> Self {
        Self {
            search,
            page_fetcher,
            crawl_fetcher,
        }
    }

    pub async fn search(&self, params: &SearchParams) -> Result<String, ToolError> {
        self.search.search(params).await
    }

    pub async fn fetch(&self, url: &str) -> Result<String, ToolError> {
        let url = canonicalize(url)?;
        info!(url = %url, "Fetching page");

        let page = self.page_fetcher.fetch(&url).await?;
        Ok(render_page(&page.body))
    }

    pub async fn crawl_report(&self, args: &CrawlArgs) -> Result<CrawlReport, ToolError> {
        let report = crawl::crawl(&args.url, args.options(), self.crawl_fetcher.as_ref()).await?;
        Ok(report)
    }

    pub async fn crawl(&self, args: &CrawlArgs) -> Result<String, ToolError> {
        Ok(self.crawl_report(args).await?.to_string())
    }

    /// Runs the tool called `name` with JSON `args`.
    pub async fn call(&self, name: &str, args: Value) -> ToolOutput {
        let result = match name {
            "search" => match parse_args::<SearchParams>(name, args) {
                Ok(params) => self.search(&params).await,
                Err(e) => Err(e),
            },
            "web_fetch" => match parse_args::<FetchArgs>(name, args) {
                Ok(params) => self.fetch(&params.url).await,
                Err(e) => Err(e),
            },
            "web_crawl" => match parse_args::<CrawlArgs>(name, args) {
                Ok(params) => self.crawl(&params).await,
                Err(e) => Err(e),
            },
            other => Err(ToolError::UnknownTool(other.to_string())),
        };

        if let Err(e) = &result {
            warn!(tool = name, error = %e, "Tool call failed");
        }
        ToolOutput::from_result(result)
    }
}

fn parse_args<T: for<'de> Deserialize<'de>>(tool: &str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

// Single-page output: optional title header, then the text excerpt
fn render_page(html: &str) -> String {
    let page = extract_content(&parse_document(html), FETCH_CONTENT_LIMIT);

    let mut text = String::new();
    if let Some(title) = &page.title {
        text.push_str(&format!("Title: {}\n\n", title));
    }
    text.push_str(&page.content);
    if page.truncated {
        text.push_str("...");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::mock::MockFetcher;

    fn toolbox() -> Toolbox {
        Toolbox::new(&Config::default()).unwrap()
    }

    fn mocked(fetcher: MockFetcher) -> Toolbox {
        Toolbox::with_fetchers(
            SearchClient::new(reqwest::Client::new(), "http://localhost:8080"),
            Box::new(fetcher),
            Box::new(MockFetcher::default()),
        )
    }

    #[test]
    fn test_catalog() {
        let names: Vec<_> = list_tools().iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["search", "web_fetch", "web_crawl"]);

        for tool in list_tools() {
            assert_eq!(tool.input_schema["type"], "object");
            assert!(tool.input_schema["required"].as_array().unwrap().len() == 1);
        }
    }

    #[test]
    fn test_crawl_args_defaults() {
        let args: CrawlArgs = serde_json::from_value(json!({ "url": "https://example.com" })).unwrap();
        assert_eq!(
            args.options(),
            CrawlOptions {
                max_depth: 2,
                max_pages: 10,
                same_domain: true
            }
        );
    }

    #[test]
    fn test_crawl_args_are_clamped() {
        let args: CrawlArgs = serde_json::from_value(json!({
            "url": "https://example.com",
            "max_depth": 9,
            "max_pages": 500,
            "same_domain": false
        }))
        .unwrap();
        let options = args.options();
        assert_eq!(options.max_depth, 5);
        assert_eq!(options.max_pages, 50);
        assert!(!options.same_domain);
    }

    #[test]
    fn test_render_page_with_title() {
        let html = "<html><head><title>Docs</title></head><body><p>Hello   world</p></body></html>";
        assert_eq!(render_page(html), "Title: Docs\n\nHello world");
    }

    #[test]
    fn test_render_page_without_title() {
        assert_eq!(render_page("<p>plain</p>"), "plain");
    }

    #[test]
    fn test_render_page_truncated() {
        let html = format!("<p>{}</p>", "a".repeat(FETCH_CONTENT_LIMIT + 1));
        let text = render_page(&html);
        assert_eq!(text.len(), FETCH_CONTENT_LIMIT + 3);
        assert!(text.ends_with("a..."));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let output = toolbox().call("web_teleport", json!({})).await;
        assert!(output.is_error);
        assert_eq!(output.text, "Error: Unknown tool: web_teleport");
    }

    #[tokio::test]
    async fn test_invalid_fetch_url() {
        let output = toolbox()
            .call("web_fetch", json!({ "url": "not a url" }))
            .await;
        assert!(output.is_error);
        assert!(output.text.starts_with("Error: Invalid URL 'not a url'"));
    }

    #[tokio::test]
    async fn test_invalid_crawl_seed() {
        let output = toolbox()
            .call("web_crawl", json!({ "url": "mailto:someone@example.com" }))
            .await;
        assert!(output.is_error);
        assert!(output.text.contains("Unsupported URL scheme 'mailto'"));
    }

    #[tokio::test]
    async fn test_missing_arguments() {
        let output = toolbox().call("search", json!({ "limit": 3 })).await;
        assert!(output.is_error);
        assert!(output.text.starts_with("Error: Invalid arguments for search"));
    }

    #[tokio::test]
    async fn test_fetch_tool_renders_page() {
        let toolbox = mocked(MockFetcher::default().html(
            "https://example.com/docs",
            "<title>Docs</title><nav>menu</nav><main><p>Read   me</p></main>",
        ));
        let output = toolbox
            .call("web_fetch", json!({ "url": "https://example.com/docs#intro" }))
            .await;
        assert!(!output.is_error);
        assert_eq!(output.text, "Title: Docs\n\nRead me");
    }

    #[tokio::test]
    async fn test_fetch_tool_reports_http_status() {
        let output = mocked(MockFetcher::default())
            .call("web_fetch", json!({ "url": "https://example.com/missing" }))
            .await;
        assert!(output.is_error);
        assert_eq!(output.text, "Error: Failed to fetch URL: HTTP 404");
    }

    #[tokio::test]
    async fn test_fetch_tool_reports_timeout() {
        let fetcher = MockFetcher::default().failing("https://example.com/slow", FetchError::Timeout);
        let output = mocked(fetcher)
            .call("web_fetch", json!({ "url": "https://example.com/slow" }))
            .await;
        assert!(output.is_error);
        assert_eq!(output.text, "Error: Failed to fetch URL: Request timed out");
    }

    #[tokio::test]
    async fn test_fetch_tool_ignores_content_type() {
        let fetcher = MockFetcher::default().typed("https://example.com/data", "application/json", "{}");
        let output = mocked(fetcher)
            .call("web_fetch", json!({ "url": "https://example.com/data" }))
            .await;
        assert!(!output.is_error);
        assert_eq!(output.text, "{}");
    }
}
