//! Global constants used throughout the premark codebase.
//!
//! Directive keys, frontmatter delimiters, and limits live here so the
//! stages and the CLI agree on them.

/// Frontmatter delimiter line.
pub const FRONTMATTER_DELIMITER: &str = "---";

/// Metadata key naming the parent document.
pub const EXTENDS_KEY: &str = "extends";

/// Metadata key holding the metadata retained in the compiled output.
pub const OUTPUT_KEY: &str = "output";

/// Prefix marking a document reference, both in variable values and on transclusion lines.
pub const REFERENCE_PREFIX: char = '@';

/// Default maximum size of a document read by the file resolver (1 MiB).
///
/// Overridable with `max_document_size` in the global configuration.
pub const DEFAULT_MAX_DOCUMENT_SIZE: u64 = 1024 * 1024;

/// Environment variable overriding the global configuration file location.
pub const CONFIG_PATH_ENV: &str = "PREMARK_CONFIG_PATH";

/// Maximum Levenshtein distance, as a percentage of the name length, for
/// undefined-variable suggestions.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Maximum number of suggestions attached to an undefined-variable error.
pub const MAX_SUGGESTIONS: usize = 3;
