//! The premark compilation pipeline.
//!
//! A source document passes through three resolver stages in a fixed order:
//!
//! 1. **Parse** the source text into a [`Document`]
//! 2. **Extends** ([`resolve_extends`]) - collapse the parent chain into one document
//! 3. **Overrides** - caller-supplied variables replace same-named metadata keys
//! 4. **Variables** ([`substitute_vars`]) - replace `{{ name }}` placeholders
//! 5. **Includes** ([`resolve_includes`]) - splice standalone `@path` lines
//! 6. **Serialize** - metadata header (if any) followed by the body
//!
//! The order is part of the contract. Inherited metadata must exist before
//! substitution, overrides must win over inherited values, and an included path
//! may itself come from a variable. Included documents are only include-resolved:
//! their own `extends` and placeholders are left as written.
//!
//! # Example
//!
//! ```rust
//! use premark::compiler::{CompileOptions, compile};
//! use premark::resolver::MemoryResolver;
//!
//! # async fn example() -> premark::core::Result<()> {
//! let resolver = MemoryResolver::new()
//!     .with_document("base.md", "# {{ title }}\n\n{{ content }}");
//!
//! let source = "---\nextends: base.md\ntitle: Guide\n---\nHello!";
//! let output = compile(source, &CompileOptions::new(resolver)).await?;
//! assert_eq!(output, "# Guide\n\nHello!");
//! # Ok(())
//! # }
//! ```

mod extends;
mod include;
mod vars;

pub use extends::{merge_bodies, merge_metadata, resolve_extends};
pub use include::{IncludeOutcome, parse_reference_line, resolve_includes};
pub use vars::{referenced_variables, render_value, substitute_vars};

use crate::core::{PremarkError, Result};
use crate::markdown::{Document, Metadata, Value, normalize_key};
use crate::resolver::DocumentResolver;

/// Options for a single compilation.
#[derive(Debug, Clone)]
pub struct CompileOptions<R> {
    /// Resolver used for every external document.
    pub resolver: R,

    /// Override variables, applied after `extends` resolution.
    pub vars: Metadata,
}

impl<R: DocumentResolver> CompileOptions<R> {
    /// Options with no override variables.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            vars: Metadata::new(),
        }
    }

    /// Add one override variable.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(Value::String(name.into()), value.into());
        self
    }

    /// Add several override variables; later entries win.
    #[must_use]
    pub fn with_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in vars {
            self.vars.insert(Value::String(name.into()), value.into());
        }
        self
    }
}

/// Cycle guard for one directive's resolution chain.
///
/// The guard is immutable: [`with`](Self::with) returns an extended copy, so
/// each recursive call owns its own guard and sibling branches never see each
/// other's paths. Diamond-shaped graphs (two siblings referencing the same
/// document) therefore resolve without a false cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedPaths {
    chain: Vec<String>,
}

impl VisitedPaths {
    /// An empty guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `path` is already on this chain.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.chain.iter().any(|visited| visited == path)
    }

    /// A new guard with `path` appended.
    #[must_use]
    pub fn with(&self, path: &str) -> Self {
        let mut chain = self.chain.clone();
        chain.push(path.to_string());
        Self {
            chain,
        }
    }

    /// Fail with [`PremarkError::CircularReference`] if `path` was already visited.
    pub fn check(&self, path: &str) -> Result<()> {
        if self.contains(path) {
            return Err(PremarkError::CircularReference {
                path: path.to_string(),
                chain: self.chain.clone(),
            });
        }
        Ok(())
    }

    /// Paths visited so far, outermost first.
    #[must_use]
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// Current recursion depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.chain.len()
    }
}

/// Merge override variables into a document's metadata; overrides win.
#[must_use]
pub fn apply_overrides(document: Document, vars: &Metadata) -> Document {
    if vars.is_empty() {
        return document;
    }

    let Document {
        mut metadata,
        body,
    } = document;
    for (name, value) in vars {
        metadata.insert(normalize_key(name.clone()), value.clone());
    }
    Document::with_metadata(metadata, body)
}

/// Run the pipeline and return the final document (stages 1-5).
///
/// # Errors
///
/// Any fatal stage error: missing `extends` parent or `@` variable document,
/// circular references, multiple content slots, undefined variables, or
/// malformed frontmatter. Unresolvable transclusion lines are not errors.
pub async fn compile_document<R: DocumentResolver>(
    source: &str,
    options: &CompileOptions<R>,
) -> Result<Document> {
    let document = Document::parse(source)?;

    tracing::debug!("Resolving extends chain");
    let document = resolve_extends(document, &options.resolver, &VisitedPaths::new()).await?;

    if !options.vars.is_empty() {
        tracing::debug!("Applying {} override variable(s)", options.vars.len());
    }
    let document = apply_overrides(document, &options.vars);

    tracing::debug!("Substituting variables");
    let document = substitute_vars(document, &options.resolver).await?;

    tracing::debug!("Resolving includes");
    resolve_includes(document, &options.resolver, &VisitedPaths::new()).await
}

/// Compile premark source text to markdown.
///
/// The output is the body alone when no metadata survives substitution, or a
/// YAML frontmatter header followed by the body otherwise.
pub async fn compile<R: DocumentResolver>(source: &str, options: &CompileOptions<R>) -> Result<String> {
    compile_document(source, options).await?.to_markdown()
}
