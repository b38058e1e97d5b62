//! `{{ name }}` placeholder substitution.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Serialize, Serializer};
use strsim::levenshtein;

use crate::constants::{MAX_SUGGESTIONS, OUTPUT_KEY, REFERENCE_PREFIX, SIMILARITY_THRESHOLD_PERCENT};
use crate::core::{PremarkError, Result};
use crate::markdown::{Document, Metadata, Value};
use crate::resolver::DocumentResolver;

/// A placeholder: a name of ASCII letters, digits, `_` or `-`, optionally padded.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z0-9_-]+)\s*\}\}").expect("placeholder pattern is valid")
});

/// Substitute every placeholder in the body with its metadata value.
///
/// All referenced names are validated before anything is substituted or
/// fetched. Values are rendered by [`render_value`]. Substitution is a single
/// pass: placeholders that appear inside substituted text are left alone.
///
/// The returned document's metadata is the source's `output` mapping, or empty
/// when there is none. A non-mapping `output` is ignored with a warning.
///
/// # Errors
///
/// - [`PremarkError::UndefinedVariable`] for the first name with no metadata key
/// - Resolver and parse errors from `@`-prefixed values
pub async fn substitute_vars<R: DocumentResolver>(document: Document, resolver: &R) -> Result<Document> {
    let names = referenced_variables(&document.body);

    if let Some(missing) = names.iter().find(|name| !document.metadata.contains_key(name.as_str())) {
        return Err(undefined_variable(missing, &document.metadata));
    }

    let mut values = HashMap::with_capacity(names.len());
    for name in names {
        if let Some(value) = document.metadata.get(name.as_str()) {
            let rendered = render_value(value, resolver).await?;
            values.insert(name, rendered);
        }
    }

    let body = PLACEHOLDER
        .replace_all(&document.body, |caps: &Captures| {
            values.get(&caps[1]).cloned().unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned();

    tracing::debug!("Substituted {} variable(s)", values.len());
    Ok(Document::with_metadata(output_metadata(&document.metadata), body))
}

/// Distinct placeholder names in order of first occurrence.
///
/// ```rust
/// use premark::compiler::referenced_variables;
///
/// let names = referenced_variables("{{ b }} {{a}} {{ b }} {{ not valid }}");
/// assert_eq!(names, ["b", "a"]);
/// ```
#[must_use]
pub fn referenced_variables(body: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(body) {
        let name = &caps[1];
        if !names.iter().any(|seen| seen == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Render a metadata value as substitution text.
///
/// - A string starting with `@` is a document reference: the rest is fetched
///   through the resolver and its body (without frontmatter) is used.
/// - Any other string is used as-is.
/// - Everything else is rendered as compact JSON. Integral floats drop their
///   fractional part (`1.0` renders as `1`) and non-finite floats render as `null`.
pub async fn render_value<R: DocumentResolver>(value: &Value, resolver: &R) -> Result<String> {
    match value {
        Value::String(text) => match text.strip_prefix(REFERENCE_PREFIX) {
            Some(path) => {
                tracing::debug!("Loading variable value from '{}'", path);
                let source = resolver.resolve(path).await?;
                Ok(Document::parse(&source)?.body)
            }
            None => Ok(text.clone()),
        },
        other => Ok(serde_json::to_string(&JsonText(other))?),
    }
}

/// JSON view of a metadata value with number-only float formatting.
struct JsonText<'a>(&'a Value);

impl Serialize for JsonText<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(flag) => serializer.serialize_bool(*flag),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    serializer.serialize_i64(int)
                } else if let Some(uint) = number.as_u64() {
                    serializer.serialize_u64(uint)
                } else {
                    serialize_float(number.as_f64().unwrap_or(f64::NAN), serializer)
                }
            }
            Value::String(text) => serializer.serialize_str(text),
            Value::Sequence(items) => serializer.collect_seq(items.iter().map(JsonText)),
            Value::Mapping(mapping) => {
                serializer.collect_map(mapping.iter().map(|(key, value)| (key_text(key), JsonText(value))))
            }
            Value::Tagged(tagged) => JsonText(&tagged.value).serialize(serializer),
        }
    }
}

/// Largest magnitude below which every integral `f64` is an exact integer.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

#[allow(clippy::cast_possible_truncation)]
fn serialize_float<S: Serializer>(value: f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if !value.is_finite() {
        serializer.serialize_unit()
    } else if value.fract() == 0.0 && value.abs() < MAX_EXACT_FLOAT {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => "null".to_string(),
        other => serde_json::to_string(&JsonText(other)).unwrap_or_default(),
    }
}

fn output_metadata(metadata: &Metadata) -> Metadata {
    match metadata.get(OUTPUT_KEY) {
        Some(Value::Mapping(output)) => output.clone(),
        None | Some(Value::Null) => Metadata::new(),
        Some(_) => {
            tracing::warn!("Ignoring '{}' metadata: expected a mapping", OUTPUT_KEY);
            Metadata::new()
        }
    }
}

fn undefined_variable(name: &str, metadata: &Metadata) -> PremarkError {
    let available: Vec<&str> = metadata.keys().filter_map(Value::as_str).collect();
    PremarkError::UndefinedVariable {
        name: name.to_string(),
        suggestions: find_similar_variables(name, &available),
    }
}

fn find_similar_variables(target: &str, available: &[&str]) -> Vec<String> {
    let mut scored: Vec<_> = available.iter().map(|name| (*name, levenshtein(target, name))).collect();
    scored.sort_by_key(|(_, distance)| *distance);

    scored
        .into_iter()
        .filter(|(_, distance)| *distance <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name.to_string())
        .collect()
}
