#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use leadgen::config::ExtractionPolicy;
use leadgen::data_models::{TavilyHit, TavilySearchResponse};
use leadgen::error::{ExtractionError, LeadGenError};
use leadgen::extractor::Extractor;
use leadgen::llm_client::LlmClient;
use leadgen::orchestrator::LeadFinder;
use leadgen::retriever::Retriever;
use leadgen::search_client::{SearchDepth, WebSearch};

pub const ONE_LEAD_REPLY: &str =
    "Here are the leads:\n[{\"name\":\"A\",\"title\":\"B\",\"company\":\"C\",\"email\":\"\",\"phone\":\"\",\"source\":\"X\",\"location\":\"\"}]\nDone.";

pub struct FakeSearch {
    response: TavilySearchResponse,
    fail: bool,
    pub calls: AtomicUsize,
}

impl FakeSearch {
    pub fn with_hits(hits: Vec<TavilyHit>) -> Arc<Self> {
        Arc::new(Self {
            response: TavilySearchResponse {
                results: Some(hits),
            },
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn without_results() -> Arc<Self> {
        Arc::new(Self {
            response: TavilySearchResponse { results: None },
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: TavilySearchResponse::default(),
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebSearch for FakeSearch {
    async fn search(
        &self,
        _query: &str,
        depth: SearchDepth,
    ) -> Result<TavilySearchResponse, LeadGenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(depth, SearchDepth::Advanced);
        if self.fail {
            return Err(LeadGenError::Retrieval(
                "Tavily request failed: connection refused".into(),
            ));
        }
        Ok(self.response.clone())
    }
}

pub struct FakeLlm {
    reply: Option<String>,
    pub calls: AtomicUsize,
    pub last_prompt: std::sync::Mutex<Option<String>>,
}

impl FakeLlm {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: std::sync::Mutex::new(None),
        })
    }

    /// Fails every call like an unreachable provider.
    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_prompt: std::sync::Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for FakeLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LeadGenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.reply.clone().ok_or_else(|| {
            ExtractionError::Provider("Groq request failed: timed out".into()).into()
        })
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

pub fn sample_hits() -> Vec<TavilyHit> {
    vec![
        TavilyHit::new(
            "https://news.example/acme-hires-cmo",
            "Acme hires new CMO",
            "Acme Corp named Dana Reyes as Chief Marketing Officer.",
        ),
        TavilyHit {
            url: Some("https://news.example/empty".into()),
            title: Some("No body".into()),
            content: None,
        },
    ]
}

pub fn lead_finder(
    search: Option<Arc<FakeSearch>>,
    llm: Option<Arc<FakeLlm>>,
    policy: ExtractionPolicy,
) -> LeadFinder {
    let search = search.map(|s| s as Arc<dyn WebSearch>);
    let llm = llm.map(|l| l as Arc<dyn LlmClient>);
    LeadFinder::new(Retriever::new(search), Extractor::new(llm, policy))
}
