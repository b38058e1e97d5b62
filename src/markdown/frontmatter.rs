//! Frontmatter parse / stringify pair.
//!
//! The compiler treats this module as an opaque, round-trippable codec:
//! [`parse_frontmatter`] splits raw text into metadata and body, and
//! [`format_with_frontmatter`] puts them back together. Only YAML frontmatter
//! delimited by `---` lines is recognized.
//!
//! ```text
//! ---
//! extends: base.md
//! title: Guide
//! ---
//! Body text starts here.
//! ```
//!
//! Round-trip guarantees:
//! - Text without a frontmatter block parses to empty metadata and a body equal
//!   to the input, byte for byte.
//! - Formatting empty metadata emits the body unchanged.
//! - Formatting non-empty metadata always emits a `---` delimited header.

use serde_yaml::{Mapping, Value};

use crate::constants::FRONTMATTER_DELIMITER;
use crate::core::{PremarkError, Result};

/// Split raw text into its frontmatter YAML and body.
///
/// Returns `None` when the text does not open with a `---` line or the block is
/// never closed. The line terminator after the closing delimiter belongs to the
/// frontmatter, everything after it is body.
pub fn split_frontmatter(input: &str) -> Option<(&str, &str)> {
    let rest = input.strip_prefix("---\n").or_else(|| input.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == FRONTMATTER_DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    None
}

/// Parse raw text into metadata and body.
///
/// Empty frontmatter (`---\n---`) yields an empty mapping. Frontmatter that is
/// not valid YAML, or is valid YAML but not a mapping, fails with
/// [`PremarkError::FrontmatterParse`].
pub fn parse_frontmatter(input: &str) -> Result<(Mapping, String)> {
    let Some((yaml, body)) = split_frontmatter(input) else {
        return Ok((Mapping::new(), input.to_string()));
    };

    if yaml.trim().is_empty() {
        return Ok((Mapping::new(), body.to_string()));
    }

    let metadata = match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(mapping) => normalize_keys(mapping),
        Value::Null => Mapping::new(),
        other => {
            return Err(PremarkError::FrontmatterParse {
                reason: format!("expected a mapping of keys to values, found {}", kind_of(&other)),
            });
        }
    };

    Ok((metadata, body.to_string()))
}

/// Turn scalar mapping keys into strings, at every nesting depth.
///
/// `2024:` and `'2024':` both become the key `"2024"`. When two keys collapse
/// into one, the later value wins at the earlier position.
#[must_use]
pub fn normalize_keys(mapping: Mapping) -> Mapping {
    let mut normalized = Mapping::with_capacity(mapping.len());
    for (key, value) in mapping {
        normalized.insert(normalize_key(key), normalize_value(value));
    }
    normalized
}

/// String form of a scalar key; sequences, mappings and tagged keys are kept.
#[must_use]
pub fn normalize_key(key: Value) -> Value {
    match key {
        Value::Number(number) => Value::String(number.to_string()),
        Value::Bool(flag) => Value::String(flag.to_string()),
        Value::Null => Value::String("null".to_string()),
        other => other,
    }
}

fn normalize_value(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(normalize_keys(mapping)),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(normalize_value).collect()),
        Value::Tagged(mut tagged) => {
            tagged.value = normalize_value(std::mem::take(&mut tagged.value));
            Value::Tagged(tagged)
        }
        other => other,
    }
}

/// Serialize metadata and body back into document text.
///
/// Empty metadata returns the body as-is. Otherwise the YAML header is followed
/// by the body, and a trailing newline is added when the body lacks one.
pub fn format_with_frontmatter(metadata: &Mapping, body: &str) -> Result<String> {
    if metadata.is_empty() {
        return Ok(body.to_string());
    }

    let yaml = serde_yaml::to_string(metadata).map_err(|e| PremarkError::Serialization {
        reason: e.to_string(),
    })?;

    let mut output = format!("{FRONTMATTER_DELIMITER}\n{yaml}{FRONTMATTER_DELIMITER}\n{body}");
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
