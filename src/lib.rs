//! premark - a minimal markdown preprocessor for composable instructions
//!
//! premark compiles markdown documents carrying YAML frontmatter and three
//! directives into plain markdown:
//!
//! - **Layout inheritance**: `extends: base.md` wraps the document in a parent
//!   body, filling its `{{ content }}` slot and inheriting its metadata
//! - **Variable substitution**: `{{ name }}` placeholders are replaced with
//!   metadata values; a value of `@path` pulls in another document's body
//! - **Transclusion**: a line holding only `@path` is replaced with that
//!   document's body, indented like the reference line
//!
//! # Core Modules
//!
//! - [`compiler`] - The compilation pipeline and its three stages
//! - [`markdown`] - Document model, frontmatter parsing and serialization
//! - [`resolver`] - The path-to-text capability ([`resolver::DocumentResolver`])
//! - [`core`] - Error types and user-facing error reporting
//!
//! ## Supporting Modules
//!
//! - [`cli`] - The `premark` command-line interface
//! - [`config`] - Global configuration (`~/.premark/config.toml`)
//! - [`constants`] - Directive keys and limits
//!
//! # Document Format
//!
//! ```markdown
//! ---
//! extends: layouts/base.md
//! title: Release Notes
//! intro: "@partials/intro.md"
//! output:
//!   title: Release Notes
//! ---
//! # {{ title }}
//!
//! {{ intro }}
//!
//!   @partials/changes.md
//! ```
//!
//! Only the `output` mapping survives into the compiled document's frontmatter;
//! all other metadata is consumed by compilation.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use premark::compiler::{CompileOptions, compile};
//! use premark::resolver::FileResolver;
//!
//! # async fn example() -> premark::core::Result<()> {
//! let options = CompileOptions::new(FileResolver::new("docs")).with_var("version", "1.2.0");
//! let markdown = compile("# v{{ version }}\n\n@changes.md\n", &options).await?;
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod constants;
pub mod core;
pub mod markdown;
pub mod resolver;

pub mod cli;
pub mod config;

// test_utils is available for unit tests and integration tests (via the test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
