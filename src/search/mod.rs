// src/search/mod.rs
// =============================================================================
// Forwards a query to a SearXNG instance and renders the JSON answer as text.
//
// The request is a single GET to `<base>/search?q=...&format=json&...`.
// Optional parameters are only sent when the caller supplied them.
//
// Submodules:
// - format: turns a SearchResponse into the text block returned to callers
// =============================================================================

mod format;

pub use format::format_response;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ToolError;

fn default_limit() -> usize {
    10
}

fn default_pageno() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub engines: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub time_range: Option<String>,
    #[serde(default)]
    pub safesearch: Option<u8>,
    #[serde(default = "default_pageno")]
    pub pageno: u32,
}

impl SearchParams {
    /// Query string pairs in the shape SearXNG expects.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("q", self.query.clone()),
            ("format", "json".to_string()),
            ("pageno", self.pageno.to_string()),
        ];

        let optional = [
            ("categories", &self.category),
            ("engines", &self.engines),
            ("language", &self.language),
            ("time_range", &self.time_range),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }
        if let Some(level) = self.safesearch {
            pairs.push(("safesearch", level.to_string()));
        }

        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct SearchResult {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InfoboxUrl {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Infobox {
    #[serde(default)]
    pub infobox: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub urls: Vec<InfoboxUrl>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub number_of_results: f64,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub infoboxes: Vec<Infobox>,
    #[serde(default)]
    pub answers: Vec<serde_json::Value>,
    #[serde(default)]
    pub corrections: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

pub struct SearchClient {
    client: Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/search", self.base_url)
    }

    pub async fn search(&self, params: &SearchParams) -> Result<String, ToolError> {
        let response = self.query(params).await?;
        Ok(format_response(&response, params.limit))
    }

    pub async fn query(&self, params: &SearchParams) -> Result<SearchResponse, ToolError> {
        debug!(query = %params.query, endpoint = %self.endpoint(), "Searching");

        let response = self
            .client
            .get(self.endpoint())
            .query(&params.query_pairs())
            .send()
            .await
            .map_err(|e| self.request_error(e))?
            .error_for_status()
            .map_err(|e| self.request_error(e))?;

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| ToolError::Search(e.to_string()))
    }

    fn request_error(&self, error: reqwest::Error) -> ToolError {
        if error.is_connect() {
            warn!(base_url = %self.base_url, "SearXNG is not reachable");
            ToolError::SearchUnavailable {
                base_url: self.base_url.clone(),
            }
        } else {
            ToolError::Search(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_params(query: &str) -> SearchParams {
        SearchParams {
            query: query.to_string(),
            limit: 10,
            category: None,
            engines: None,
            language: None,
            time_range: None,
            safesearch: None,
            pageno: 1,
        }
    }

    #[test]
    fn test_minimal_query_pairs() {
        let params = query_params("rust crawler");
        assert_eq!(
            params.query_pairs(),
            vec![
                ("q", "rust crawler".to_string()),
                ("format", "json".to_string()),
                ("pageno", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_optional_query_pairs() {
        let params = SearchParams {
            category: Some("news".to_string()),
            engines: Some("duckduckgo,brave".to_string()),
            language: Some("en".to_string()),
            time_range: Some("month".to_string()),
            safesearch: Some(0),
            pageno: 3,
            ..query_params("q")
        };
        let pairs = params.query_pairs();
        assert!(pairs.contains(&("categories", "news".to_string())));
        assert!(pairs.contains(&("engines", "duckduckgo,brave".to_string())));
        assert!(pairs.contains(&("language", "en".to_string())));
        assert!(pairs.contains(&("time_range", "month".to_string())));
        assert!(pairs.contains(&("safesearch", "0".to_string())));
        assert!(pairs.contains(&("pageno", "3".to_string())));
    }

    #[test]
    fn test_params_defaults_from_json() {
        let params: SearchParams = serde_json::from_value(serde_json::json!({
            "query": "hello"
        }))
        .unwrap();
        assert_eq!(params, query_params("hello"));
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"query":"x","number_of_results":0,"results":[{"url":"https://a","title":"A"}]}"#,
        )
        .unwrap();
        assert_eq!(response.results[0].content, "");
        assert!(response.infoboxes.is_empty());
    }

    #[test]
    fn test_endpoint() {
        let client = SearchClient::new(Client::new(), "http://localhost:8080");
        assert_eq!(client.endpoint(), "http://localhost:8080/search");
    }

    #[tokio::test]
    async fn test_refused_connection_is_unavailable() {
        // Bind then drop a listener so the port is known to be closed
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);
        let client = SearchClient::new(Client::new(), base_url.clone());

        let err = client.search(&query_params("rust")).await.unwrap_err();
        assert!(matches!(&err, ToolError::SearchUnavailable { base_url: b } if *b == base_url));
        assert_eq!(
            err.to_string(),
            format!("Cannot connect to SearXNG at {}. Is the server running?", base_url)
        );
    }

    #[test]
    fn test_infobox_null_fields() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"query":"x","infoboxes":[{"infobox":"Rust","id":null,"content":null,"urls":[]}]}"#,
        )
        .unwrap();
        assert_eq!(response.infoboxes[0].content, None);
        assert_eq!(response.infoboxes[0].id, None);
    }
}
