//! Filesystem-backed resolver.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::DocumentResolver;
use crate::core::{PremarkError, Result};

/// Resolves document paths relative to a base directory.
///
/// The CLI uses the input file's directory as the base, or the current
/// directory when the source comes from stdin.
///
/// # Examples
///
/// ```rust,no_run
/// use premark::resolver::{DocumentResolver, FileResolver};
///
/// # async fn example() -> premark::core::Result<()> {
/// let resolver = FileResolver::new("docs").with_max_document_size(Some(64 * 1024));
/// let text = resolver.resolve("partials/header.md").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileResolver {
    base_dir: PathBuf,
    max_document_size: Option<u64>,
}

impl FileResolver {
    /// Create a resolver rooted at `base_dir` with no size limit.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            max_document_size: None,
        }
    }

    /// Reject documents larger than `max` bytes (`None` disables the check).
    #[must_use]
    pub fn with_max_document_size(mut self, max: Option<u64>) -> Self {
        self.max_document_size = max;
        self
    }

    /// The directory paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl DocumentResolver for FileResolver {
    async fn resolve(&self, path: &str) -> Result<String> {
        let full_path = self.base_dir.join(path);
        tracing::trace!("Resolving '{}' from {}", path, full_path.display());

        let io_error = |e: std::io::Error| {
            if e.kind() == ErrorKind::NotFound {
                PremarkError::DocumentNotFound {
                    path: path.to_string(),
                }
            } else {
                PremarkError::Io {
                    path: full_path.display().to_string(),
                    reason: e.to_string(),
                }
            }
        };

        let metadata = tokio::fs::metadata(&full_path).await.map_err(io_error)?;
        if !metadata.is_file() {
            return Err(PremarkError::DocumentNotFound {
                path: path.to_string(),
            });
        }

        if let Some(max) = self.max_document_size
            && metadata.len() > max
        {
            return Err(PremarkError::DocumentTooLarge {
                path: path.to_string(),
                size: metadata.len(),
                max,
            });
        }

        tokio::fs::read_to_string(&full_path).await.map_err(io_error)
    }
}
