use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::LeadGenError;

pub const TAVILY_API_KEY: &str = "TAVILY_API_KEY";
pub const GROQ_API_KEY: &str = "GROQ_API_KEY";

pub const DEFAULT_GROQ_MODEL: &str = "deepseek-r1-distill-llama-70b";
pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://lead-genius-suite.vercel.app";

/// What to do when the LLM reply cannot be parsed into leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionPolicy {
    /// Log the raw reply and answer with zero leads.
    #[default]
    Tolerant,
    /// Fail the request with the parse error.
    Strict,
}

impl FromStr for ExtractionPolicy {
    type Err = LeadGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tolerant" => Ok(ExtractionPolicy::Tolerant),
            "strict" => Ok(ExtractionPolicy::Strict),
            other => Err(LeadGenError::Configuration(format!(
                "EXTRACTION_POLICY must be 'tolerant' or 'strict', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tavily_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub tavily_base_url: String,
    pub groq_base_url: String,
    pub tavily_max_results: u32,
    pub search_timeout: Duration,
    pub llm_timeout: Duration,
    pub allowed_origins: Vec<String>,
    pub extraction_policy: ExtractionPolicy,
    pub host: String,
    pub port: u16,
}

/// Load variables from `env_file`, or from `./.env` when none is given.
/// Variables already set in the process environment are kept.
/// A missing `./.env` is fine; a missing explicit file is an error.
pub fn load_env_file(env_file: Option<&Path>) -> Result<(), LeadGenError> {
    match env_file {
        Some(path) => dotenvy::from_path(path).map_err(|e| {
            LeadGenError::Configuration(format!("failed to load {}: {}", path.display(), e))
        }),
        None => {
            dotenvy::dotenv().ok();
            Ok(())
        }
    }
}

impl Config {
    /// Read the process environment. Call [`load_env_file`] first.
    pub fn from_env() -> Result<Self, LeadGenError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, LeadGenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // blank values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or_default =
            |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            tavily_api_key: get(TAVILY_API_KEY),
            groq_api_key: get(GROQ_API_KEY),
            groq_model: get_or_default("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            tavily_base_url: get_or_default("TAVILY_BASE_URL", DEFAULT_TAVILY_BASE_URL),
            groq_base_url: get_or_default("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
            tavily_max_results: parse_or_default(
                get("TAVILY_MAX_RESULTS"),
                "TAVILY_MAX_RESULTS",
                10,
            )?,
            search_timeout: Duration::from_secs(parse_or_default(
                get("SEARCH_TIMEOUT_SECS"),
                "SEARCH_TIMEOUT_SECS",
                30,
            )?),
            llm_timeout: Duration::from_secs(parse_or_default(
                get("LLM_TIMEOUT_SECS"),
                "LLM_TIMEOUT_SECS",
                120,
            )?),
            allowed_origins: parse_origins(&get_or_default(
                "CORS_ALLOWED_ORIGINS",
                DEFAULT_ALLOWED_ORIGIN,
            )),
            extraction_policy: match get("EXTRACTION_POLICY") {
                Some(raw) => raw.parse()?,
                None => ExtractionPolicy::default(),
            },
            host: get_or_default("HOST", "127.0.0.1"),
            port: parse_or_default(get("PORT"), "PORT", 8000)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_summary(&self) {
        fn preview(val: &Option<String>) -> String {
            match val {
                Some(v) => {
                    let n = v.char_indices().nth(5).map(|(i, _)| i).unwrap_or(v.len());
                    format!("{}...({} chars)", &v[..n], v.len())
                }
                None => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  {}: {}", TAVILY_API_KEY, preview(&self.tavily_api_key));
        tracing::info!("  {}: {}", GROQ_API_KEY, preview(&self.groq_api_key));
        tracing::info!("  GROQ_MODEL: {}", self.groq_model);
        tracing::info!("  CORS_ALLOWED_ORIGINS: {:?}", self.allowed_origins);
        tracing::info!("  EXTRACTION_POLICY: {:?}", self.extraction_policy);
    }
}

fn parse_or_default<T: FromStr>(
    raw: Option<String>,
    key: &str,
    default: T,
) -> Result<T, LeadGenError> {
    match raw {
        Some(v) => v.trim().parse().map_err(|_| {
            LeadGenError::Configuration(format!("{key} has an invalid value: '{v}'"))
        }),
        None => Ok(default),
    }
}

/// Browsers send `Origin` without a trailing slash, so strip it here.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, LeadGenError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.groq_model, DEFAULT_GROQ_MODEL);
        assert_eq!(config.tavily_max_results, 10);
        assert_eq!(config.search_timeout, Duration::from_secs(30));
        assert_eq!(config.llm_timeout, Duration::from_secs(120));
        assert_eq!(config.allowed_origins, vec![DEFAULT_ALLOWED_ORIGIN.to_string()]);
        assert_eq!(config.extraction_policy, ExtractionPolicy::Tolerant);
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_credentials_are_optional() {
        let config = config_from(&[]).unwrap();
        assert!(config.tavily_api_key.is_none());
        assert!(config.groq_api_key.is_none());

        let config =
            config_from(&[(TAVILY_API_KEY, "tvly-123"), (GROQ_API_KEY, "gsk-456")]).unwrap();
        assert_eq!(config.tavily_api_key.as_deref(), Some("tvly-123"));
        assert_eq!(config.groq_api_key.as_deref(), Some("gsk-456"));
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let config = config_from(&[(TAVILY_API_KEY, "   "), (GROQ_API_KEY, "gsk")]).unwrap();
        assert!(config.tavily_api_key.is_none());
        assert!(config.groq_api_key.is_some());
    }

    #[test]
    fn test_parse_origins_trims_trailing_slash() {
        let origins = parse_origins("https://a.example/, http://localhost:3000 ,,");
        assert_eq!(origins, vec!["https://a.example", "http://localhost:3000"]);
    }

    #[test]
    fn test_invalid_number_is_configuration_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, LeadGenError::Configuration(_)));
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_missing_explicit_env_file_is_error() {
        let err = load_env_file(Some(Path::new("/nonexistent/leadgen.env"))).unwrap_err();
        assert!(matches!(err, LeadGenError::Configuration(_)));
        assert!(err.to_string().contains("/nonexistent/leadgen.env"));
    }

    #[test]
    fn test_extraction_policy() {
        let config = config_from(&[("EXTRACTION_POLICY", "Strict")]).unwrap();
        assert_eq!(config.extraction_policy, ExtractionPolicy::Strict);
        assert!(config_from(&[("EXTRACTION_POLICY", "lenient")]).is_err());
    }
}
