//! Field schema shared by both configuration readers.
//!
//! Each reader turns its file into a map of raw values keyed by source name.
//! The schema below then maps source keys onto `Settings` fields in one
//! place, so default-on-absence and parse-on-presence rules are identical
//! for every format and profile.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::Settings;
use crate::error::{AppError, AppResult};

/// Source key holding the search service credential, for every mapping.
pub const SEARCH_API_KEY: &str = "TAVILY_API_KEY";

/// A value as read from a configuration source, before typing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawValue {
    Str(String),
    Int(i64),
    Bool(bool),
    /// Explicit null (`None` in a script source); treated as absent.
    Null,
    /// Script right-hand side that is not a plain literal.
    Expr(String),
}

impl RawValue {
    fn source_text(&self) -> String {
        match self {
            RawValue::Str(s) => s.clone(),
            RawValue::Int(i) => i.to_string(),
            RawValue::Bool(true) => "True".to_string(),
            RawValue::Bool(false) => "False".to_string(),
            RawValue::Null => "None".to_string(),
            RawValue::Expr(e) => e.clone(),
        }
    }
}

pub(crate) type RawValues = HashMap<String, RawValue>;

/// Named mapping that selects which script constants feed the connection fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Profile {
    #[default]
    Basic,
    Advanced,
}

impl Profile {
    /// Source keys used for this profile when reading a script source.
    pub fn key_map(self) -> KeyMap {
        match self {
            Profile::Basic => KeyMap {
                base_url: "DEEPSEEK_BASE_URL",
                api_key: "DEEPSEEK_API_KEY",
                model: "DEEPSEEK_MODEL",
                default_model: "deepseek-chat",
            },
            Profile::Advanced => KeyMap {
                base_url: "OPENAI_BASE_URL",
                api_key: "OPENAI_API_KEY",
                model: "OPENAI_MODEL",
                default_model: "gpt-4o-mini",
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Basic => "basic",
            Profile::Advanced => "advanced",
        }
    }
}

impl FromStr for Profile {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Profile::Basic),
            "advanced" => Ok(Profile::Advanced),
            other => Err(AppError::Config(format!(
                "Unknown profile: {}. Supported: basic, advanced",
                other
            ))),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source key names for the connection fields, plus the model fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    pub base_url: &'static str,
    pub api_key: &'static str,
    pub model: &'static str,
    pub default_model: &'static str,
}

impl KeyMap {
    /// Mapping used by flat `KEY=VALUE` sources regardless of profile.
    pub const FLAT: KeyMap = KeyMap {
        base_url: "BASE_URL",
        api_key: "API_KEY",
        model: "MODEL_NAME",
        default_model: "deepseek-chat",
    };
}

#[derive(Debug, Clone, Copy)]
enum Field {
    BaseUrl,
    ApiKey,
    SearchApiKey,
    Model,
    MaxSearchResults,
    SearchTimeout,
    MaxContentLength,
    MaxReflections,
    MaxParagraphs,
    OutputDir,
    SaveIntermediateStates,
}

/// Keys shared by every mapping. Defaults come from `Settings::default()`.
const COMMON_FIELDS: [(&str, Field); 8] = [
    (SEARCH_API_KEY, Field::SearchApiKey),
    ("SEARCH_RESULTS_PER_QUERY", Field::MaxSearchResults),
    ("SEARCH_TIMEOUT", Field::SearchTimeout),
    ("SEARCH_CONTENT_MAX_LENGTH", Field::MaxContentLength),
    ("MAX_REFLECTIONS", Field::MaxReflections),
    ("MAX_PARAGRAPHS", Field::MaxParagraphs),
    ("OUTPUT_DIR", Field::OutputDir),
    ("SAVE_INTERMEDIATE_STATES", Field::SaveIntermediateStates),
];

/// Build `Settings` from raw source values using the given key mapping.
///
/// Keys that are absent (or bound to an explicit null) keep their default.
/// Keys that are present but cannot be converted fail with `ConfigParse`.
pub(crate) fn apply(raw: &RawValues, keys: &KeyMap) -> AppResult<Settings> {
    let mut settings = Settings {
        model: keys.default_model.to_string(),
        ..Settings::default()
    };

    let connection = [
        (keys.base_url, Field::BaseUrl),
        (keys.api_key, Field::ApiKey),
        (keys.model, Field::Model),
    ];

    for (key, field) in connection.iter().chain(COMMON_FIELDS.iter()) {
        match raw.get(*key) {
            None | Some(RawValue::Null) => {}
            Some(value) => assign(&mut settings, *field, key, value)?,
        }
    }

    Ok(settings)
}

fn assign(settings: &mut Settings, field: Field, key: &str, value: &RawValue) -> AppResult<()> {
    match field {
        Field::BaseUrl => settings.base_url = optional_string(key, value)?,
        Field::ApiKey => settings.api_key = optional_string(key, value)?,
        Field::SearchApiKey => settings.search_api_key = optional_string(key, value)?,
        Field::Model => settings.model = string(key, value)?,
        Field::MaxSearchResults => settings.max_search_results = integer(key, value)?,
        Field::SearchTimeout => settings.search_timeout_seconds = integer(key, value)?,
        Field::MaxContentLength => settings.max_content_length = integer(key, value)?,
        Field::MaxReflections => settings.max_reflections = integer(key, value)?,
        Field::MaxParagraphs => settings.max_paragraphs = integer(key, value)?,
        Field::OutputDir => settings.output_dir = string(key, value)?,
        Field::SaveIntermediateStates => {
            settings.save_intermediate_states = boolean(key, value)?
        }
    }
    Ok(())
}

fn parse_error(key: &str, value: &RawValue) -> AppError {
    AppError::ConfigParse {
        field: key.to_string(),
        value: value.source_text(),
    }
}

fn string(key: &str, value: &RawValue) -> AppResult<String> {
    match value {
        RawValue::Str(s) => Ok(s.clone()),
        other => Err(parse_error(key, other)),
    }
}

fn optional_string(key: &str, value: &RawValue) -> AppResult<Option<String>> {
    let s = string(key, value)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}

fn integer(key: &str, value: &RawValue) -> AppResult<i64> {
    let parsed = match value {
        RawValue::Str(s) => parse_int(s.trim()),
        RawValue::Int(i) => Some(*i),
        _ => None,
    };
    parsed.ok_or_else(|| parse_error(key, value))
}

/// Parse an integer literal: optional sign, digits, single underscores
/// between digits (`-1`, `+5`, `1_000`).
pub(crate) fn parse_int(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    let well_formed = digits.starts_with(|c: char| c.is_ascii_digit())
        && !digits.ends_with('_')
        && !digits.contains("__")
        && digits.chars().all(|c| c.is_ascii_digit() || c == '_');
    if !well_formed {
        return None;
    }

    text.replace('_', "").parse::<i64>().ok()
}

fn boolean(key: &str, value: &RawValue) -> AppResult<bool> {
    match value {
        RawValue::Bool(b) => Ok(*b),
        RawValue::Str(s) => Ok(s.trim().to_lowercase() == "true"),
        other => Err(parse_error(key, other)),
    }
}
