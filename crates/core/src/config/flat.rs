//! Reader for flat `KEY=VALUE` configuration files (`config.env`, `.env`).
//!
//! One assignment per line, full-line `#` comments only. No quoting, no
//! escaping, no multi-line values.

use std::collections::HashMap;

use super::schema::{RawValue, RawValues};

/// Parse flat `KEY=VALUE` text into a key/value map.
///
/// Blank lines and lines whose first non-whitespace character is `#` are
/// skipped. Lines without `=` are ignored. Each remaining line is split on
/// its first `=` and both sides are trimmed. A repeated key keeps the last
/// value.
pub fn parse_flat(contents: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    values
}

pub(crate) fn read_flat(contents: &str) -> RawValues {
    parse_flat(contents)
        .into_iter()
        .map(|(key, value)| (key, RawValue::Str(value)))
        .collect()
}
