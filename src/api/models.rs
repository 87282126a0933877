use serde::Serialize;

#[derive(Debug, Default)]
pub struct SearchParams {
    pub query: Option<String>,
}

impl SearchParams {
    /// A repeated `query` parameter keeps its last value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let query = pairs
            .into_iter()
            .filter(|(key, _)| key == "query")
            .map(|(_, value)| value)
            .last();
        SearchParams { query }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}
