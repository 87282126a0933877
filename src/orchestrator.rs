use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

use crate::config::{Config, GROQ_API_KEY, TAVILY_API_KEY};
use crate::data_models::{Lead, SearchResponse};
use crate::error::LeadGenError;
use crate::extractor::Extractor;
use crate::llm_client::{GroqClient, LlmClient};
use crate::retriever::Retriever;
use crate::search_client::{TavilyClient, WebSearch};

pub const EMPTY_QUERY: &str = "Search query cannot be empty";

/// Number leads "1", "2", ... by position, replacing anything the model produced.
pub fn assign_ids(leads: &mut [Lead]) {
    for (i, lead) in leads.iter_mut().enumerate() {
        lead.id = (i + 1).to_string();
    }
}

pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub struct LeadFinder {
    retriever: Retriever,
    extractor: Extractor,
}

impl LeadFinder {
    pub fn new(retriever: Retriever, extractor: Extractor) -> Self {
        Self {
            retriever,
            extractor,
        }
    }

    /// Build the real provider clients for every credential that is set.
    pub fn from_config(config: &Config) -> Result<Self, LeadGenError> {
        let searcher = match &config.tavily_api_key {
            Some(key) => Some(Arc::new(TavilyClient::new(
                key.clone(),
                &config.tavily_base_url,
                config.tavily_max_results,
                config.search_timeout,
            )?) as Arc<dyn WebSearch>),
            None => None,
        };

        let llm = match &config.groq_api_key {
            Some(key) => Some(Arc::new(GroqClient::new(
                key.clone(),
                &config.groq_base_url,
                config.groq_model.clone(),
                config.llm_timeout,
            )?) as Arc<dyn LlmClient>),
            None => None,
        };

        Ok(Self::new(
            Retriever::new(searcher),
            Extractor::new(llm, config.extraction_policy),
        ))
    }

    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.retriever.is_configured() {
            missing.push(TAVILY_API_KEY);
        }
        if !self.extractor.is_configured() {
            missing.push(GROQ_API_KEY);
        }
        missing
    }

    pub async fn find_leads(&self, query: &str) -> Result<SearchResponse, LeadGenError> {
        if query.trim().is_empty() {
            tracing::warn!(stage = "validate", "rejected empty search query");
            return Err(LeadGenError::Validation(EMPTY_QUERY.to_string()));
        }

        let missing = self.missing_credentials();
        if !missing.is_empty() {
            let err = LeadGenError::Configuration(format!(
                "API keys are missing: {} must be set",
                missing.join(", ")
            ));
            tracing::error!(query, stage = "configure", "{err}");
            return Err(err);
        }

        let content = self.retriever.retrieve(query).await.inspect_err(|e| {
            tracing::error!(query, stage = "retrieve", "{e}");
        })?;

        let mut leads = self
            .extractor
            .extract(&content, query)
            .await
            .inspect_err(|e| {
                tracing::error!(query, stage = "extract", "{e}");
            })?;

        assign_ids(&mut leads);
        tracing::info!(query, leads = leads.len(), "search completed");

        Ok(SearchResponse {
            success: true,
            query: query.to_string(),
            timestamp: utc_timestamp(),
            results: leads,
        })
    }
}
