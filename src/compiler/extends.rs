//! Layout inheritance through the `extends` metadata key.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use super::VisitedPaths;
use crate::constants::EXTENDS_KEY;
use crate::core::{PremarkError, Result};
use crate::markdown::{Document, Metadata, Value, normalize_key, normalize_keys};
use crate::resolver::DocumentResolver;

/// The `{{ content }}` slot a parent body may reserve for its child.
static CONTENT_SLOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*content\s*\}\}").expect("content slot pattern is valid"));

/// Collapse a document's `extends` chain into a single document.
///
/// The parent is resolved first (recursively, so grandparents are applied
/// before the child sees them), then merged:
///
/// - **Body**: a single `{{ content }}` slot in the parent is replaced by the
///   child's body. Without a slot, the bodies are joined with a blank line, or
///   concatenated directly when either side is empty.
/// - **Metadata**: the parent's keys, overlaid with the child's keys except
///   `extends`. The child wins on conflicts.
///
/// A document without `extends` (or with a null, `false`, or empty value) is
/// returned unchanged.
///
/// # Errors
///
/// - [`PremarkError::InvalidExtends`] if `extends` is not a string
/// - [`PremarkError::CircularReference`] if a parent is already on the chain
/// - [`PremarkError::MultipleContentSlots`] if a parent has more than one slot
/// - Resolver and parse errors for the parent document
pub async fn resolve_extends<R: DocumentResolver>(
    document: Document,
    resolver: &R,
    visited: &VisitedPaths,
) -> Result<Document> {
    let Some(parent_path) = extends_target(&document)? else {
        return Ok(document);
    };

    visited.check(&parent_path)?;
    tracing::debug!("Extending '{}' (depth {})", parent_path, visited.depth());

    let parent_source = resolver.resolve(&parent_path).await?;
    let parent = Document::parse(&parent_source)?;
    let parent = Box::pin(resolve_extends(parent, resolver, &visited.with(&parent_path))).await?;

    let body = merge_bodies(&parent.body, &document.body)?;
    let metadata = merge_metadata(parent.metadata, document.metadata);
    Ok(Document::with_metadata(metadata, body))
}

/// Read the parent path from `extends`, treating falsy values as absent.
fn extends_target(document: &Document) -> Result<Option<String>> {
    match document.get(EXTENDS_KEY) {
        None | Some(Value::Null | Value::Bool(false)) => Ok(None),
        Some(Value::String(path)) if path.is_empty() => Ok(None),
        Some(Value::String(path)) => Ok(Some(path.clone())),
        Some(other) => Err(PremarkError::InvalidExtends {
            value: serde_json::to_string(other).unwrap_or_else(|_| format!("{other:?}")),
        }),
    }
}

/// Combine a resolved parent body with its child's body.
///
/// ```rust
/// use premark::compiler::merge_bodies;
///
/// assert_eq!(merge_bodies("<main>{{ content }}</main>", "Hi").unwrap(), "<main>Hi</main>");
/// assert_eq!(merge_bodies("Header", "Body").unwrap(), "Header\n\nBody");
/// assert_eq!(merge_bodies("", "Body").unwrap(), "Body");
/// ```
pub fn merge_bodies(parent: &str, child: &str) -> Result<String> {
    match CONTENT_SLOT.find_iter(parent).count() {
        0 if !parent.is_empty() && !child.is_empty() => Ok(format!("{parent}\n\n{child}")),
        0 => Ok(format!("{parent}{child}")),
        1 => Ok(CONTENT_SLOT.replace(parent, NoExpand(child)).into_owned()),
        count => Err(PremarkError::MultipleContentSlots {
            count,
        }),
    }
}

/// Overlay the child's metadata (minus `extends`) on the parent's. Scalar keys
/// are compared by their string form.
#[must_use]
pub fn merge_metadata(parent: Metadata, child: Metadata) -> Metadata {
    let mut merged = normalize_keys(parent);
    for (key, value) in child {
        if key.as_str() == Some(EXTENDS_KEY) {
            continue;
        }
        merged.insert(normalize_key(key), value);
    }
    merged
}
