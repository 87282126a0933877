use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

use crate::config::{ExtractionPolicy, GROQ_API_KEY};
use crate::data_models::Lead;
use crate::error::{ExtractionError, LeadGenError};
use crate::llm_client::LlmClient;

/// First `[` through last `]`, across newlines.
static JSON_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

/// Reasoning models wrap their chain of thought in these tags.
static THINK_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

pub fn build_prompt(query: &str, content: &str) -> String {
    format!(
        r#"You are an expert lead generation assistant that extracts business contact information from web content. Extract relevant leads from the content below for the search query: "{query}".

**Input Content:**
{content}

**Instructions:**

1. **Extract Leads**: Identify individuals in marketing, sales, or leadership roles at companies. Only include people relevant to the search query.

2. **Fields**: Each lead must contain exactly these fields:
   - `name`: full name of the individual.
   - `title`: job title (e.g., CEO, Marketing Manager).
   - `company`: company or organization the individual is associated with.
   - `email`: email address if it appears in the content, otherwise "".
   - `phone`: phone number if it appears in the content, otherwise "".
   - `source`: where the lead was found (the Source URL of the content block).
   - `location`: location if available, otherwise "".

3. **Inclusion Rule**: Only include a lead if at least two of `name`, `title` and `company` are present.

4. **No Fabrication**: Never invent or guess emails, phone numbers, or any other field. Every value must be found in the content. Leave a field as "" when it is missing.

5. **Quality**: Prefer accurate leads over many leads. Aim for at least 5 leads when the content supports it.

6. **Output Format**: Return a JSON array of lead objects. Explanatory text before or after the array is allowed, but the array itself must be valid JSON:

[
  {{
    "name": "Jane Doe",
    "title": "Chief Marketing Officer",
    "company": "Example Corp",
    "email": "",
    "phone": "",
    "source": "https://example.com/team",
    "location": "Austin, USA"
  }}
]
"#
    )
}

/// Recover the lead array from a free-form model reply.
/// Ids are left empty; the caller numbers the leads.
pub fn parse_leads(reply: &str) -> Result<Vec<Lead>, ExtractionError> {
    let reply = THINK_BLOCK.replace_all(reply, "");
    let json_str = match JSON_ARRAY.find(&reply) {
        Some(m) => m.as_str(),
        None => reply.trim(),
    };

    let value: Value = serde_json::from_str(json_str)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(ExtractionError::NotAnArray),
    };

    let total = items.len();
    let leads: Vec<Lead> = items
        .iter()
        .filter_map(Value::as_object)
        .map(Lead::from_json_object)
        .filter(Lead::is_qualified)
        .collect();

    if leads.len() < total {
        log::debug!("dropped {} of {} extracted entries", total - leads.len(), total);
    }

    if leads.is_empty() {
        return Err(ExtractionError::NoLeads);
    }
    Ok(leads)
}

pub struct Extractor {
    llm: Option<Arc<dyn LlmClient>>,
    policy: ExtractionPolicy,
}

impl Extractor {
    pub fn new(llm: Option<Arc<dyn LlmClient>>, policy: ExtractionPolicy) -> Self {
        Self { llm, policy }
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    pub fn policy(&self) -> ExtractionPolicy {
        self.policy
    }

    pub async fn extract(&self, content: &str, query: &str) -> Result<Vec<Lead>, LeadGenError> {
        let llm = self
            .llm
            .as_ref()
            .ok_or_else(|| LeadGenError::Configuration(format!("{GROQ_API_KEY} is not set")))?;

        if content.trim().is_empty() {
            log::info!("no content retrieved for '{query}', skipping extraction");
            return Ok(Vec::new());
        }

        log::info!("extracting leads with model {}", llm.model_name());
        let prompt = build_prompt(query, content);
        let reply = llm.complete(&prompt).await?;
        log::debug!("raw LLM reply: {reply}");

        match parse_leads(&reply) {
            Ok(leads) => Ok(leads),
            Err(e) if self.policy == ExtractionPolicy::Tolerant => {
                log::warn!("error extracting leads for '{query}': {e}; raw response: {reply}");
                Ok(Vec::new())
            }
            Err(e) => {
                log::error!("error extracting leads for '{query}': {e}; raw response: {reply}");
                Err(e.into())
            }
        }
    }
}
