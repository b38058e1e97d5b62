//! Error handling for premark
//!
//! This module provides the error type shared by every compilation stage and the
//! user-friendly reporting layer used by the CLI. The error system follows two rules:
//! 1. **Strongly-typed errors** so callers can match on the exact failure
//! 2. **User-friendly messages** with an actionable suggestion for CLI users
//!
//! # Error Categories
//!
//! - **Resolution**: [`PremarkError::DocumentNotFound`], [`PremarkError::DocumentTooLarge`],
//!   [`PremarkError::Io`]
//! - **Directives**: [`PremarkError::CircularReference`], [`PremarkError::MultipleContentSlots`],
//!   [`PremarkError::UndefinedVariable`], [`PremarkError::InvalidExtends`]
//! - **Formats**: [`PremarkError::FrontmatterParse`], [`PremarkError::Serialization`]
//! - **Input**: [`PremarkError::InvalidVariable`], [`PremarkError::ConfigError`]
//!
//! Every variant is fatal to the compilation that raised it. The only failure that is
//! absorbed is an unresolvable transclusion line, which never surfaces as an error here
//! (see [`crate::compiler::resolve_includes`]).
//!
//! # Examples
//!
//! ```rust,no_run
//! use premark::core::{PremarkError, user_friendly_error};
//!
//! let error = PremarkError::UndefinedVariable {
//!     name: "titel".to_string(),
//!     suggestions: vec!["title".to_string()],
//! };
//!
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display(); // colored output on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T, E = PremarkError> = std::result::Result<T, E>;

/// The main error type for premark operations.
///
/// Payloads are plain strings so the error stays `Clone` and can be reported
/// more than once (for instance logged and then returned to the CLI).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PremarkError {
    /// The resolver could not locate a document.
    ///
    /// Propagated unchanged through `extends` and variable resolution. Transclusion
    /// catches it locally and keeps the original `@path` line.
    #[error("Document not found: {path}")]
    DocumentNotFound {
        /// The path that was requested from the resolver
        path: String,
    },

    /// A path was revisited within one directive's resolution chain.
    #[error("Circular reference detected: {path}")]
    CircularReference {
        /// The path that closed the cycle
        path: String,
        /// Paths walked before the cycle was detected, outermost first
        chain: Vec<String>,
    },

    /// A parent document declares more than one `{{ content }}` slot.
    #[error(
        "Multiple {{{{ content }}}} markers found in parent ({count}). Only one content slot is allowed."
    )]
    MultipleContentSlots {
        /// Number of markers found in the resolved parent body
        count: usize,
    },

    /// A `{{ name }}` placeholder has no matching metadata key.
    #[error("Undefined variable: {name}")]
    UndefinedVariable {
        /// The placeholder name
        name: String,
        /// Defined names that look similar to `name`
        suggestions: Vec<String>,
    },

    /// The `extends` key holds something other than a path string.
    #[error("Invalid extends value: {value} (expected a document path)")]
    InvalidExtends {
        /// Rendered form of the offending value
        value: String,
    },

    /// The frontmatter block is not valid YAML or not a mapping.
    #[error("Invalid frontmatter: {reason}")]
    FrontmatterParse {
        /// Parser message
        reason: String,
    },

    /// A document exceeds the configured size limit.
    #[error("Document too large: {path} ({size} bytes, limit {max} bytes)")]
    DocumentTooLarge {
        /// The requested path
        path: String,
        /// Actual size on disk
        size: u64,
        /// Configured maximum
        max: u64,
    },

    /// A filesystem operation failed for a reason other than a missing file.
    #[error("Could not read {path}: {reason}")]
    Io {
        /// Path that was being accessed
        path: String,
        /// Underlying I/O message
        reason: String,
    },

    /// Metadata could not be serialized (frontmatter output or JSON substitution).
    #[error("Serialization failed: {reason}")]
    Serialization {
        /// Serializer message
        reason: String,
    },

    /// A `key=value` override could not be parsed.
    #[error("Invalid variable format: \"{input}\". {reason}")]
    InvalidVariable {
        /// The raw argument
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// The configuration file is unusable.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// Any other failure, carried as its message.
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

impl From<serde_yaml::Error> for PremarkError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::FrontmatterParse {
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for PremarkError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            reason: error.to_string(),
        }
    }
}

/// Error wrapper that adds user-facing details and a suggestion.
///
/// The CLI converts every failure into one of these before printing it.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PremarkError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: PremarkError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with an actionable suggestion.
///
/// [`PremarkError`] values get a suggestion tailored to their variant. I/O errors
/// and anything else are wrapped generically, keeping the full `anyhow` chain in
/// the details so nothing is lost.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(premark_error) = error.downcast_ref::<PremarkError>() {
        return create_error_context(premark_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return ErrorContext::new(PremarkError::Other {
            message: error.to_string(),
        })
        .with_suggestion("Check that the file exists and that you have the required permissions")
        .with_details(io_error.to_string());
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let context = ErrorContext::new(PremarkError::Other {
        message: error.to_string(),
    });
    if chain.is_empty() {
        context
    } else {
        context.with_details(chain.join("\n"))
    }
}

fn create_error_context(error: PremarkError) -> ErrorContext {
    match &error {
        PremarkError::DocumentNotFound {
            path,
        } => {
            let suggestion = format!(
                "Check that '{path}' exists relative to the input document's directory"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Paths in `extends` and `@` variable values must resolve")
        }
        PremarkError::CircularReference {
            path,
            chain,
        } => {
            let mut walked = chain.clone();
            walked.push(path.clone());
            let details = format!("Resolution chain: {}", walked.join(" -> "));
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Remove one of the references so the chain terminates")
        }
        PremarkError::MultipleContentSlots {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Keep a single {{ content }} marker in the parent template"),
        PremarkError::UndefinedVariable {
            name,
            suggestions,
        } => {
            let context = ErrorContext::new(error.clone());
            if suggestions.is_empty() {
                let suggestion = format!(
                    "Define '{name}' in the frontmatter or pass it with --var {name}=value"
                );
                context.with_suggestion(suggestion)
            } else {
                context.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            }
        }
        PremarkError::InvalidExtends {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Set `extends` to the path of the parent document, e.g. extends: base.md"),
        PremarkError::FrontmatterParse {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the YAML between the --- delimiters")
            .with_details("Frontmatter must be a YAML mapping of keys to values"),
        PremarkError::DocumentTooLarge {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Raise max_document_size in ~/.premark/config.toml"),
        PremarkError::InvalidVariable {
            ..
        } => ErrorContext::new(error).with_suggestion("Use --var key=value"),
        PremarkError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check ~/.premark/config.toml or the path given with --config"),
        PremarkError::Io {
            ..
        }
        | PremarkError::Serialization {
            ..
        }
        | PremarkError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
