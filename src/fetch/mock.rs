// src/fetch/mock.rs
// =============================================================================
// In-memory PageFetcher for tests.
//
// Serves canned responses keyed by canonical URL and records every request,
// so tests can assert what was (and was not) fetched. Unknown URLs answer
// with HTTP 404.
// =============================================================================

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

use super::http::{FetchedPage, PageFetcher};
use crate::error::FetchError;

#[derive(Default)]
pub struct MockFetcher {
    responses: HashMap<String, Result<FetchedPage, FetchError>>,
    requested: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn html(self, url: &str, body: &str) -> Self {
        self.typed(url, "text/html; charset=utf-8", body)
    }

    pub fn typed(mut self, url: &str, content_type: &str, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            Ok(FetchedPage {
                content_type: Some(content_type.to_string()),
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn failing(mut self, url: &str, error: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.responses
            .get(url.as_str())
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }
}
