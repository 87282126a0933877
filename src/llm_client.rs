use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ExtractionError, LeadGenError};

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single user message and return the model's text reply.
    async fn complete(&self, prompt: &str) -> Result<String, LeadGenError>;

    fn model_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Groq chat completions (OpenAI-compatible endpoint).
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GroqClient {
    pub fn new(
        api_key: String,
        base_url: &str,
        model: String,
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
            model,
        })
    }
}

fn provider_error(msg: String) -> LeadGenError {
    LeadGenError::Extraction(ExtractionError::Provider(msg))
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, LeadGenError> {
        let url = format!("{}/openai/v1/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!("Sending Groq request to: {}", url);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| provider_error(format!("Groq request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();

            return Err(provider_error(match status.as_u16() {
                429 => "Rate limit exceeded".to_string(),
                401 => "Invalid API key".to_string(),
                403 => "API access forbidden".to_string(),
                _ => format!("Groq API error ({}): {}", status, error_text),
            }));
        }

        let completion: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse Groq response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| provider_error("No choices returned from Groq".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
