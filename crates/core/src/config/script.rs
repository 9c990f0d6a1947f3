//! Reader for script-style configuration files (`myconfig.py`).
//!
//! The file is never executed. Only top-level `NAME = <literal>` assignments
//! are read, where a literal is a quoted string, an integer, `True`, `False`
//! or `None`. Any other right-hand side is kept as an expression so that a
//! known key bound to one fails loudly instead of silently defaulting.

use super::schema::{parse_int, RawValue, RawValues};

/// Parse script-style configuration text into raw values.
pub(crate) fn read_script(contents: &str) -> RawValues {
    let mut values = RawValues::new();

    for (index, line) in contents.lines().enumerate() {
        // Indented lines belong to blocks we do not evaluate.
        if line.starts_with(|c: char| c.is_whitespace()) {
            continue;
        }

        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with("import ") || line.starts_with("from ") {
            continue;
        }

        match split_assignment(line) {
            Some((name, rhs)) => {
                values.insert(name.to_string(), parse_literal(rhs));
            }
            None => {
                tracing::debug!(line = index + 1, "Skipping non-assignment statement");
            }
        }
    }

    values
}

/// Split `NAME = rhs` (optionally `NAME: type = rhs`) into its parts.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let name_len = line
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(line.len());

    let name = &line[..name_len];
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let mut rest = line[name_len..].trim_start();
    if let Some(annotated) = rest.strip_prefix(':') {
        rest = &annotated[annotated.find('=')?..];
    }

    let rhs = rest.strip_prefix('=')?;
    if rhs.starts_with('=') {
        return None;
    }
    Some((name, rhs.trim()))
}

fn parse_literal(rhs: &str) -> RawValue {
    if rhs.starts_with('"') || rhs.starts_with('\'') {
        return parse_string(rhs).unwrap_or_else(|| RawValue::Expr(rhs.to_string()));
    }

    let text = strip_comment(rhs);
    match text {
        "True" => RawValue::Bool(true),
        "False" => RawValue::Bool(false),
        "None" => RawValue::Null,
        _ => parse_int(text)
            .map(RawValue::Int)
            .unwrap_or_else(|| RawValue::Expr(text.to_string())),
    }
}

fn strip_comment(text: &str) -> &str {
    match text.find('#') {
        Some(i) => text[..i].trim_end(),
        None => text,
    }
}

/// Parse a single-line quoted string; the remainder may only be a comment.
fn parse_string(rhs: &str) -> Option<RawValue> {
    let mut chars = rhs.chars();
    let quote = chars.next()?;

    // Triple-quoted strings span lines; not supported.
    if rhs.starts_with(&quote.to_string().repeat(3)) {
        return None;
    }

    let mut value = String::new();
    let mut consumed = quote.len_utf8();
    let mut closed = false;

    while let Some(c) = chars.next() {
        consumed += c.len_utf8();
        if c == quote {
            closed = true;
            break;
        }
        if c == '\\' {
            let escaped = chars.next()?;
            consumed += escaped.len_utf8();
            match escaped {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                '\\' | '\'' | '"' => value.push(escaped),
                other => {
                    value.push('\\');
                    value.push(other);
                }
            }
        } else {
            value.push(c);
        }
    }

    if !closed {
        return None;
    }

    let rest = rhs[consumed..].trim();
    if rest.is_empty() || rest.starts_with('#') {
        Some(RawValue::Str(value))
    } else {
        None
    }
}
