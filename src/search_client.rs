use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::data_models::TavilySearchResponse;
use crate::error::LeadGenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(
        &self,
        query: &str,
        depth: SearchDepth,
    ) -> Result<TavilySearchResponse, LeadGenError>;
}

#[derive(Debug, Serialize)]
struct TavilySearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: SearchDepth,
    max_results: u32,
}

/// Tavily web search over its REST API.
pub struct TavilyClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    max_results: u32,
}

impl TavilyClient {
    pub fn new(
        api_key: String,
        base_url: &str,
        max_results: u32,
        timeout: Duration,
    ) -> Result<Self, LeadGenError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|e| {
                LeadGenError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_results,
        })
    }
}

#[async_trait]
impl WebSearch for TavilyClient {
    async fn search(
        &self,
        query: &str,
        depth: SearchDepth,
    ) -> Result<TavilySearchResponse, LeadGenError> {
        let url = format!("{}/search", self.base_url);
        let request = TavilySearchRequest {
            api_key: &self.api_key,
            query,
            search_depth: depth,
            max_results: self.max_results,
        };

        tracing::debug!("Sending Tavily request to: {}", url);

        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LeadGenError::Retrieval(format!("Tavily request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();

            return Err(LeadGenError::Retrieval(match status.as_u16() {
                401 | 403 => "Tavily rejected the API key".to_string(),
                429 => "Tavily rate limit exceeded".to_string(),
                _ => format!("Tavily API error ({}): {}", status, error_text),
            }));
        }

        resp.json::<TavilySearchResponse>().await.map_err(|e| {
            LeadGenError::Retrieval(format!("Invalid response from Tavily API: {}", e))
        })
    }
}
