use std::sync::Arc;

use crate::config::TAVILY_API_KEY;
use crate::data_models::{SearchResult, TavilyHit};
use crate::error::LeadGenError;
use crate::search_client::{SearchDepth, WebSearch};

const UNKNOWN: &str = "Unknown";

/// Keep hits that carry content, in API order.
pub fn collect_results(hits: Vec<TavilyHit>) -> Vec<SearchResult> {
    hits.into_iter()
        .filter_map(|hit| {
            let content = hit.content.filter(|c| !c.is_empty())?;
            Some(SearchResult {
                url: hit
                    .url
                    .filter(|u| !u.is_empty())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                title: hit
                    .title
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                content,
            })
        })
        .collect()
}

pub fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| {
            format!(
                "Source: {}\nTitle: {}\nContent: {}\n---",
                r.url, r.title, r.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_format_results() {
    let results = vec![
        SearchResult {
            url: "https://a.example".into(),
            title: "A".into(),
            content: "alpha".into(),
        },
        SearchResult {
            url: UNKNOWN.into(),
            title: UNKNOWN.into(),
            content: "beta".into(),
        },
    ];
    assert_eq!(
        format_results(&results),
        "Source: https://a.example\nTitle: A\nContent: alpha\n---\nSource: Unknown\nTitle: Unknown\nContent: beta\n---"
    );
    assert_eq!(format_results(&[]), "");
}

#[test]
fn test_collect_results_skips_missing_content() {
    let hits = vec![
        TavilyHit::new("https://a.example", "A", "alpha"),
        TavilyHit {
            url: Some("https://b.example".into()),
            title: Some("B".into()),
            content: None,
        },
        TavilyHit::new("https://c.example", "C", ""),
        TavilyHit::new("https://d.example", "D", "   "),
        TavilyHit {
            url: None,
            title: None,
            content: Some("delta".into()),
        },
    ];
    let results = collect_results(hits);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].url, "https://a.example");
    // whitespace is still content
    assert_eq!(results[1].url, "https://d.example");
    assert_eq!(results[1].content, "   ");
    assert_eq!(results[2].url, UNKNOWN);
    assert_eq!(results[2].title, UNKNOWN);
    assert_eq!(results[2].content, "delta");
}

pub struct Retriever {
    searcher: Option<Arc<dyn WebSearch>>,
}

impl Retriever {
    pub fn new(searcher: Option<Arc<dyn WebSearch>>) -> Self {
        Self { searcher }
    }

    pub fn is_configured(&self) -> bool {
        self.searcher.is_some()
    }

    /// Search for `topic` and flatten the hits into one text blob.
    /// An empty blob means nothing had content; that is not an error.
    pub async fn retrieve(&self, topic: &str) -> Result<String, LeadGenError> {
        let searcher = self
            .searcher
            .as_ref()
            .ok_or_else(|| LeadGenError::Configuration(format!("{TAVILY_API_KEY} is not set")))?;

        log::info!("fetching search results for: {topic}");
        let response = searcher.search(topic, SearchDepth::Advanced).await?;

        let hits = response.results.ok_or_else(|| {
            LeadGenError::Retrieval("Invalid response from search API: missing results".to_string())
        })?;

        let total = hits.len();
        let results = collect_results(hits);
        log::info!(
            "search returned {} results, {} with content",
            total,
            results.len()
        );

        let content = format_results(&results);
        log::debug!("raw content: {content}");
        Ok(content)
    }
}
