// src/fetch/http.rs
// =============================================================================
// Bounded HTTP GET for a single page.
//
// Key functionality:
// - One reqwest Client per policy (timeout, redirect cap, user agent)
// - Non-2xx responses become FetchError::Status
// - reqwest errors are sorted into FetchError tags (timeout, redirects, ...)
// - The content-type filter is a property of the fetched page, not an error:
//   the crawl skips non-text pages, the single-page fetch ignores the filter
// =============================================================================

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; MCP-SearXNG/0.2.0)";

// Content types the crawler is willing to read
const CRAWLABLE_TYPES: [&str; 2] = ["text/html", "text/plain"];

// How a fetch is bounded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    pub timeout: Duration,
    /// `None` keeps reqwest's default redirect policy
    pub max_redirects: Option<usize>,
    pub user_agent: &'static str,
}

impl FetchPolicy {
    /// Pages visited during a crawl: 15s, 3 redirects.
    pub fn crawl() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            max_redirects: Some(3),
            user_agent: USER_AGENT,
        }
    }

    /// The one-shot fetch tool: 30s, reqwest's default redirects.
    pub fn single_page() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_redirects: None,
            user_agent: USER_AGENT,
        }
    }

    pub fn build_client(&self) -> Result<Client, reqwest::Error> {
        let mut builder = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent);
        if let Some(limit) = self.max_redirects {
            builder = builder.redirect(redirect::Policy::limited(limit));
        }
        builder.build()
    }
}

// A successfully retrieved response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub content_type: Option<String>,
    pub body: String,
}

impl FetchedPage {
    /// True when the Content-Type header names html or plain text.
    /// A missing header is not crawlable.
    pub fn is_crawlable(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| {
                let ct = ct.to_ascii_lowercase();
                CRAWLABLE_TYPES.iter().any(|t| ct.contains(t))
            })
            .unwrap_or(false)
    }
}

/// Anything that can fetch a page for the crawler.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
    policy: FetchPolicy,
}

impl HttpFetcher {
    pub fn new(policy: FetchPolicy) -> Result<Self, FetchError> {
        let client = policy
            .build_client()
            .map_err(|e| FetchError::Other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, policy })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        debug!(url = %url, timeout = ?self.policy.timeout, "GET");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchedPage { content_type, body })
    }
}

// Sorts reqwest errors into the fetch failure tags
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else if let Some(status) = error.status() {
        FetchError::Status(status.as_u16())
    } else {
        FetchError::Other(error.to_string())
    }
}
