//! Configuration resolution for deepsearch.
//!
//! Settings come from exactly one file, located by [`ConfigResolver`]:
//! - `myconfig.py`: script-style constants, read through a [`Profile`]
//! - `config.env` / `.env`: flat `KEY=VALUE` lines
//!
//! Both readers feed the same field schema, so defaults and parse rules do
//! not depend on the file format. Nothing is read from the environment.

mod flat;
mod resolver;
mod schema;
mod script;

use serde::Serialize;
use std::fmt;

use crate::error::{AppError, AppResult};

pub use flat::parse_flat;
pub use resolver::{load_settings, ConfigResolver, SourceFormat, CONVENTIONAL_FILES};
pub use schema::{KeyMap, Profile, SEARCH_API_KEY};

pub const DEFAULT_MAX_SEARCH_RESULTS: i64 = 3;
pub const DEFAULT_SEARCH_TIMEOUT_SECONDS: i64 = 240;
pub const DEFAULT_MAX_CONTENT_LENGTH: i64 = 20000;
pub const DEFAULT_MAX_REFLECTIONS: i64 = 2;
pub const DEFAULT_MAX_PARAGRAPHS: i64 = 5;
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

/// Resolved runtime settings.
///
/// Built once from a single source and not mutated afterwards. `Debug`
/// output redacts both credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Endpoint root for the completion API
    pub base_url: Option<String>,

    /// Completion API credential
    pub api_key: Option<String>,

    /// Search service credential
    pub search_api_key: Option<String>,

    /// Model identifier; empty means unset
    pub model: String,

    pub max_search_results: i64,
    pub search_timeout_seconds: i64,
    pub max_content_length: i64,
    pub max_reflections: i64,
    pub max_paragraphs: i64,

    /// Directory for generated reports
    pub output_dir: String,

    /// Persist intermediate agent state alongside reports
    pub save_intermediate_states: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            search_api_key: None,
            model: String::new(),
            max_search_results: DEFAULT_MAX_SEARCH_RESULTS,
            search_timeout_seconds: DEFAULT_SEARCH_TIMEOUT_SECONDS,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            max_reflections: DEFAULT_MAX_REFLECTIONS,
            max_paragraphs: DEFAULT_MAX_PARAGRAPHS,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            save_intermediate_states: true,
        }
    }
}

/// A required credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    ApiKey,
    SearchApiKey,
}

impl Credential {
    pub fn field_name(&self) -> &'static str {
        match self {
            Credential::ApiKey => "api_key",
            Credential::SearchApiKey => "search_api_key",
        }
    }

    /// Source key carrying this credential under the given mapping.
    pub fn source_key(&self, keys: &KeyMap) -> &'static str {
        match self {
            Credential::ApiKey => keys.api_key,
            Credential::SearchApiKey => SEARCH_API_KEY,
        }
    }
}

impl Settings {
    /// Build settings from flat-format key/value pairs and validate them.
    ///
    /// Useful when a script config has been flattened ahead of time.
    ///
    /// # Example
    /// ```
    /// use deepsearch_core::config::Settings;
    ///
    /// let settings = Settings::from_flat_pairs([
    ///     ("API_KEY", "sk-test"),
    ///     ("TAVILY_API_KEY", "tvly-test"),
    /// ])
    /// .unwrap();
    /// assert_eq!(settings.model, "deepseek-chat");
    /// ```
    pub fn from_flat_pairs<I, K, V>(pairs: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let raw: schema::RawValues = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), schema::RawValue::Str(v.into())))
            .collect();
        let settings = schema::apply(&raw, &KeyMap::FLAT)?;
        settings.validate_with(&KeyMap::FLAT)?;
        Ok(settings)
    }

    /// Credentials that are absent or empty.
    pub fn missing_credentials(&self) -> Vec<Credential> {
        let mut missing = Vec::new();
        if is_blank(&self.api_key) {
            missing.push(Credential::ApiKey);
        }
        if is_blank(&self.search_api_key) {
            missing.push(Credential::SearchApiKey);
        }
        missing
    }

    /// Check that both credentials are present, naming fields on failure.
    pub fn validate(&self) -> AppResult<()> {
        self.check_credentials(|c| c.field_name().to_string())
    }

    /// Check that both credentials are present, naming source keys on failure.
    pub fn validate_with(&self, keys: &KeyMap) -> AppResult<()> {
        self.check_credentials(|c| c.source_key(keys).to_string())
    }

    fn check_credentials(&self, name: impl Fn(&Credential) -> String) -> AppResult<()> {
        let missing: Vec<String> = self.missing_credentials().iter().map(name).collect();
        if missing.is_empty() {
            return Ok(());
        }
        for key in &missing {
            tracing::error!(key = %key, "Required credential is not set");
        }
        Err(AppError::InvalidConfig { missing })
    }

    /// Summary safe for display: secrets are reduced to set/unset.
    pub fn summary(&self) -> SettingsSummary {
        SettingsSummary {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_search_results: self.max_search_results,
            search_timeout_seconds: self.search_timeout_seconds,
            max_content_length: self.max_content_length,
            max_reflections: self.max_reflections,
            max_paragraphs: self.max_paragraphs,
            output_dir: self.output_dir.clone(),
            save_intermediate_states: self.save_intermediate_states,
            api_key_set: !is_blank(&self.api_key),
            search_api_key_set: !is_blank(&self.search_api_key),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn redact(value: &Option<String>) -> &'static str {
    if is_blank(value) {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("search_api_key", &redact(&self.search_api_key))
            .field("model", &self.model)
            .field("max_search_results", &self.max_search_results)
            .field("search_timeout_seconds", &self.search_timeout_seconds)
            .field("max_content_length", &self.max_content_length)
            .field("max_reflections", &self.max_reflections)
            .field("max_paragraphs", &self.max_paragraphs)
            .field("output_dir", &self.output_dir)
            .field("save_intermediate_states", &self.save_intermediate_states)
            .finish()
    }
}

/// Operator-facing view of [`Settings`] with credentials masked.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsSummary {
    pub base_url: Option<String>,
    pub model: String,
    pub max_search_results: i64,
    pub search_timeout_seconds: i64,
    pub max_content_length: i64,
    pub max_reflections: i64,
    pub max_paragraphs: i64,
    pub output_dir: String,
    pub save_intermediate_states: bool,
    pub api_key_set: bool,
    pub search_api_key_set: bool,
}

impl fmt::Display for SettingsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = |flag: bool| if flag { "set" } else { "unset" };

        writeln!(f, "=== Current configuration ===")?;
        writeln!(f, "Base URL: {}", self.base_url.as_deref().unwrap_or("<unset>"))?;
        writeln!(f, "Model: {}", self.model)?;
        writeln!(f, "Max search results: {}", self.max_search_results)?;
        writeln!(f, "Search timeout: {}s", self.search_timeout_seconds)?;
        writeln!(f, "Max content length: {}", self.max_content_length)?;
        writeln!(f, "Max reflections: {}", self.max_reflections)?;
        writeln!(f, "Max paragraphs: {}", self.max_paragraphs)?;
        writeln!(f, "Output directory: {}", self.output_dir)?;
        writeln!(f, "Save intermediate states: {}", self.save_intermediate_states)?;
        writeln!(f, "API key: {}", set(self.api_key_set))?;
        writeln!(f, "Search API key: {}", set(self.search_api_key_set))?;
        write!(f, "=============================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Settings {
        Settings {
            base_url: Some("https://api.deepseek.com".to_string()),
            api_key: Some("sk-secret-value".to_string()),
            search_api_key: Some("tvly-secret-value".to_string()),
            model: "deepseek-chat".to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output_dir, "reports");
        assert!(settings.save_intermediate_states);
        assert!(settings.model.is_empty());
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_both_fields() {
        let settings = Settings {
            api_key: Some(String::new()),
            search_api_key: None,
            ..valid()
        };
        match settings.validate() {
            Err(AppError::InvalidConfig { missing }) => {
                assert_eq!(missing, vec!["api_key", "search_api_key"]);
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_with_uses_source_keys() {
        let settings = Settings {
            api_key: None,
            ..valid()
        };
        match settings.validate_with(&Profile::Advanced.key_map()) {
            Err(AppError::InvalidConfig { missing }) => {
                assert_eq!(missing, vec!["OPENAI_API_KEY"]);
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_base_url_and_model_still_valid() {
        let settings = Settings {
            base_url: None,
            model: String::new(),
            ..valid()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", valid());
        assert!(!rendered.contains("sk-secret-value"));
        assert!(!rendered.contains("tvly-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_summary_masks_secrets() {
        let summary = valid().summary();
        assert!(summary.api_key_set);
        assert!(summary.search_api_key_set);

        let text = summary.to_string();
        assert!(text.contains("API key: set"));
        assert!(!text.contains("sk-secret-value"));

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"api_key_set\":true"));
    }

    #[test]
    fn test_from_flat_pairs() {
        let settings = Settings::from_flat_pairs([
            ("BASE_URL", "https://x"),
            ("API_KEY", "k"),
            ("TAVILY_API_KEY", "t"),
            ("MODEL_NAME", "m"),
        ])
        .unwrap();
        assert_eq!(settings.base_url.as_deref(), Some("https://x"));
        assert_eq!(settings.model, "m");
    }

    #[test]
    fn test_from_flat_pairs_requires_credentials() {
        let err = Settings::from_flat_pairs([("API_KEY", "k")]).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig { ref missing } if missing == &vec!["TAVILY_API_KEY".to_string()]));
    }
}
