use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One search hit, normalized for the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub content: String,
}

/// Raw Tavily `/search` response. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TavilySearchResponse {
    #[serde(default)]
    pub results: Option<Vec<TavilyHit>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TavilyHit {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl TavilyHit {
    pub fn new(url: &str, title: &str, content: &str) -> Self {
        TavilyHit {
            url: Some(url.to_string()),
            title: Some(title.to_string()),
            content: Some(content.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub title: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub location: String,
}

impl Lead {
    /// Build a lead from one object of the model's JSON array.
    /// Missing or null fields become empty strings; the id is left empty.
    pub fn from_json_object(obj: &Map<String, Value>) -> Lead {
        let field = |key: &str| match obj.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string(),
        };

        Lead {
            id: String::new(),
            name: field("name"),
            title: field("title"),
            company: field("company"),
            email: field("email"),
            phone: field("phone"),
            source: field("source"),
            location: field("location"),
        }
    }

    /// At least two of name, title and company must be present.
    pub fn is_qualified(&self) -> bool {
        [&self.name, &self.title, &self.company]
            .iter()
            .filter(|v| !v.is_empty())
            .count()
            >= 2
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub timestamp: String,
    pub results: Vec<Lead>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lead_from_partial_object() {
        let value = json!({
            "name": "Ada Lovelace",
            "company": "Analytical Engines",
            "phone": null,
            "id": "99"
        });
        let lead = Lead::from_json_object(value.as_object().unwrap());
        assert_eq!(lead.name, "Ada Lovelace");
        assert_eq!(lead.company, "Analytical Engines");
        assert_eq!(lead.phone, "");
        assert_eq!(lead.email, "");
        assert_eq!(lead.id, "");
        assert!(lead.is_qualified());
    }

    #[test]
    fn test_non_string_fields_are_stringified() {
        let value = json!({"name": "Bob", "title": "CTO", "phone": 5551234});
        let lead = Lead::from_json_object(value.as_object().unwrap());
        assert_eq!(lead.phone, "5551234");
    }

    #[test]
    fn test_single_identity_field_is_not_qualified() {
        let lead = Lead {
            name: "Only Name".into(),
            email: "x@y.com".into(),
            ..Default::default()
        };
        assert!(!lead.is_qualified());
    }

    #[test]
    fn test_tavily_response_without_results() {
        let resp: TavilySearchResponse = serde_json::from_str(r#"{"query": "x"}"#).unwrap();
        assert!(resp.results.is_none());

        let resp: TavilySearchResponse =
            serde_json::from_str(r#"{"results": [{"url": "https://a.example"}]}"#).unwrap();
        let hits = resp.results.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].content.is_none());
    }
}
