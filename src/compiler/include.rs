//! Line-level transclusion of `@path` references.

use std::sync::LazyLock;

use regex::Regex;

use super::VisitedPaths;
use crate::core::{PremarkError, Result};
use crate::markdown::Document;
use crate::resolver::DocumentResolver;

/// A whole line holding only optional indentation, `@`, a path, and trailing whitespace.
static REFERENCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)@([a-zA-Z0-9\-_/.]+)\s*$").expect("reference line pattern is valid")
});

/// Result of fetching one transclusion target.
#[derive(Debug, Clone, PartialEq)]
pub enum IncludeOutcome {
    /// The target's fully include-resolved body.
    Resolved(String),
    /// The resolver could not supply the target; the line is kept verbatim.
    Unresolved(PremarkError),
}

/// Split a reference line into `(indent, path)`.
///
/// Inline references such as `ping @username` are not reference lines.
///
/// ```rust
/// use premark::compiler::parse_reference_line;
///
/// assert_eq!(parse_reference_line("  @docs/intro.md "), Some(("  ", "docs/intro.md")));
/// assert_eq!(parse_reference_line("ping @username"), None);
/// ```
#[must_use]
pub fn parse_reference_line(line: &str) -> Option<(&str, &str)> {
    let caps = REFERENCE_LINE.captures(line)?;
    let indent = caps.get(1).map_or("", |m| m.as_str());
    let path = caps.get(2)?.as_str();
    Some((indent, path))
}

/// Replace every reference line with the referenced document's body.
///
/// Included documents are parsed and include-resolved recursively; their
/// metadata is discarded and their own `extends` or placeholders are left
/// untouched. Each non-empty included line gets the reference line's
/// indentation. An empty included body leaves an empty line. In a CRLF body
/// every spliced line keeps the `\r` of the reference line.
///
/// A target the resolver cannot supply is logged and the original line is
/// kept. The document's own metadata passes through unchanged.
///
/// # Errors
///
/// - [`PremarkError::CircularReference`] if a target is already on the chain
/// - Parse errors for an included document
pub async fn resolve_includes<R: DocumentResolver>(
    document: Document,
    resolver: &R,
    visited: &VisitedPaths,
) -> Result<Document> {
    let mut lines: Vec<String> = Vec::new();

    for line in document.body.split('\n') {
        let Some((indent, path)) = parse_reference_line(line) else {
            lines.push(line.to_string());
            continue;
        };

        visited.check(path)?;

        match fetch_included(path, resolver, visited).await? {
            IncludeOutcome::Resolved(body) => splice(&mut lines, indent, &body, line.ends_with('\r')),
            IncludeOutcome::Unresolved(error) => {
                tracing::warn!("Leaving '@{}' unresolved: {}", path, error);
                lines.push(line.to_string());
            }
        }
    }

    Ok(Document::with_metadata(document.metadata, lines.join("\n")))
}

async fn fetch_included<R: DocumentResolver>(
    path: &str,
    resolver: &R,
    visited: &VisitedPaths,
) -> Result<IncludeOutcome> {
    let source = match resolver.resolve(path).await {
        Ok(source) => source,
        Err(error) => return Ok(IncludeOutcome::Unresolved(error)),
    };

    tracing::debug!("Including '{}' (depth {})", path, visited.depth());
    let included = Document::parse(&source)?;
    let included = Box::pin(resolve_includes(included, resolver, &visited.with(path))).await?;
    Ok(IncludeOutcome::Resolved(included.body))
}

fn splice(lines: &mut Vec<String>, indent: &str, body: &str, crlf: bool) {
    if body.is_empty() {
        lines.push(if crlf { "\r" } else { "" }.to_string());
        return;
    }

    lines.extend(body.split('\n').map(|line| {
        let text = line.strip_suffix('\r').unwrap_or(line);
        let ending = if crlf || text.len() < line.len() { "\r" } else { "" };
        if text.is_empty() {
            ending.to_string()
        } else {
            format!("{indent}{text}{ending}")
        }
    }));
}
