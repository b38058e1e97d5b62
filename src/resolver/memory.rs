//! In-memory resolver.

use std::collections::HashMap;

use super::DocumentResolver;
use crate::core::{PremarkError, Result};

/// Resolves paths by exact-match lookup in a map of path to text.
///
/// No normalization is applied: `"a.md"` and `"./a.md"` are different keys.
///
/// ```rust
/// use premark::resolver::MemoryResolver;
///
/// let resolver = MemoryResolver::new()
///     .with_document("base.md", "# Base\n\n{{ content }}")
///     .with_document("footer.md", "---\nnote: hidden\n---\nFooter");
/// assert_eq!(resolver.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    documents: HashMap<String, String>,
}

impl MemoryResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a document.
    #[must_use]
    pub fn with_document(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Add (or replace) a document in place.
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(path.into(), text.into());
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the resolver holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl From<HashMap<String, String>> for MemoryResolver {
    fn from(documents: HashMap<String, String>) -> Self {
        Self {
            documents,
        }
    }
}

impl<P: Into<String>, T: Into<String>> FromIterator<(P, T)> for MemoryResolver {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().map(|(path, text)| (path.into(), text.into())).collect(),
        }
    }
}

impl DocumentResolver for MemoryResolver {
    async fn resolve(&self, path: &str) -> Result<String> {
        self.documents.get(path).cloned().ok_or_else(|| PremarkError::DocumentNotFound {
            path: path.to_string(),
        })
    }
}
