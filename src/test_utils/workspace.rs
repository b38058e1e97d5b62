//! Temporary document trees for tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::compiler::{CompileOptions, compile};
use crate::resolver::FileResolver;

/// A temporary directory of documents, removed on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Create an empty workspace.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp directory")?;
        Ok(Self {
            temp_dir,
        })
    }

    /// Root directory of the workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a workspace-relative file.
    pub fn file(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    /// Write a document, creating parent directories as needed.
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.file(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Read a workspace file back.
    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.file(relative);
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// A resolver rooted at the workspace.
    pub fn resolver(&self) -> FileResolver {
        FileResolver::new(self.path())
    }

    /// Compile `source` against the workspace with no overrides.
    pub async fn compile(&self, source: &str) -> Result<String> {
        Ok(compile(source, &CompileOptions::new(self.resolver())).await?)
    }
}
