//! Document model for premark sources.
//!
//! A premark document is structured metadata ("frontmatter") followed by body
//! text. Parsing happens once per resolution step: the root source and every
//! dependency fetched through a resolver are parsed into a fresh [`Document`].
//! Stages never mutate a document in place, they build a new one.
//!
//! # Metadata Values
//!
//! Metadata is an insertion-ordered mapping ([`Metadata`]) of keys to tagged
//! values ([`Value`]): null, boolean, number, string, sequence, or nested
//! mapping. Top-level keys double as variable names during substitution.
//!
//! # Example
//!
//! ```rust,no_run
//! use premark::markdown::Document;
//!
//! # fn example() -> premark::core::Result<()> {
//! let doc = Document::parse("---\ntitle: Guide\n---\n# {{ title }}")?;
//! assert_eq!(doc.get("title").and_then(|v| v.as_str()), Some("Guide"));
//! assert_eq!(doc.body, "# {{ title }}");
//!
//! let text = doc.to_markdown()?;
//! assert!(text.starts_with("---\n"));
//! # Ok(())
//! # }
//! ```

pub mod frontmatter;

pub use frontmatter::{
    format_with_frontmatter, normalize_key, normalize_keys, parse_frontmatter, split_frontmatter,
};
pub use serde_yaml::Value;

use crate::core::Result;

/// Ordered mapping from metadata key to value.
pub type Metadata = serde_yaml::Mapping;

/// A parsed document: metadata plus body text.
///
/// Equality compares the body byte for byte and the metadata by key set and
/// per-key value. Key order does not matter, at any nesting depth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Frontmatter metadata (empty when the source had none).
    pub metadata: Metadata,

    /// Text following the frontmatter block, without delimiters.
    pub body: String,
}

impl Document {
    /// Create a document with no metadata.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            metadata: Metadata::new(),
            body: body.into(),
        }
    }

    /// Create a document from metadata and body.
    #[must_use]
    pub fn with_metadata(metadata: Metadata, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }

    /// Parse raw document text.
    ///
    /// # Errors
    ///
    /// Returns [`PremarkError::FrontmatterParse`](crate::core::PremarkError::FrontmatterParse)
    /// if a frontmatter block is present but is not a YAML mapping.
    pub fn parse(input: &str) -> Result<Self> {
        let (metadata, body) = parse_frontmatter(input)?;
        Ok(Self {
            metadata,
            body,
        })
    }

    /// Serialize the document: header plus body, or the body alone when there
    /// is no metadata.
    pub fn to_markdown(&self) -> Result<String> {
        format_with_frontmatter(&self.metadata, &self.body)
    }

    /// Look up a top-level metadata value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Whether the document carries any metadata.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        !self.metadata.is_empty()
    }
}
