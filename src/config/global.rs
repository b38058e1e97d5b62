//! User-wide configuration stored in `~/.premark/config.toml`.
//!
//! # Location
//!
//! - Unix/macOS: `~/.premark/config.toml`
//! - Windows: `%LOCALAPPDATA%\premark\config.toml`
//! - Override: the `PREMARK_CONFIG_PATH` environment variable, or `--config`
//!
//! A missing file is not an error; defaults are used instead.
//!
//! # Format
//!
//! ```toml
//! # Reject documents larger than 2 MiB
//! max_document_size = 2097152
//!
//! # Default variables, applied like --var (which still wins)
//! [vars]
//! company = "Acme"
//! tone = "friendly"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::{CONFIG_PATH_ENV, DEFAULT_MAX_DOCUMENT_SIZE};

/// Global premark settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Maximum size in bytes of a document read from disk.
    ///
    /// Default: 1 MiB. Applies to every file the resolver reads: `extends`
    /// parents, `@` variable values, and transclusions.
    #[serde(default = "default_max_document_size")]
    pub max_document_size: u64,

    /// Default override variables.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: BTreeMap<String, String>,
}

const fn default_max_document_size() -> u64 {
    DEFAULT_MAX_DOCUMENT_SIZE
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            max_document_size: default_max_document_size(),
            vars: BTreeMap::new(),
        }
    }
}

impl GlobalConfig {
    /// Load from `path` if given, otherwise from the default location.
    ///
    /// An explicitly given path must exist. A missing default file yields
    /// [`GlobalConfig::default`].
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let path = expand_path(&path);
            return Self::load_from(&path).await;
        }

        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this schema.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse global config from {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Platform-specific config path, honoring `PREMARK_CONFIG_PATH`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or, on Windows, local data) directory
    /// cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return Ok(expand_path(Path::new(&path)));
        }

        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("premark")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".premark")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// The size limit for the file resolver; `0` disables it.
    #[must_use]
    pub fn document_size_limit(&self) -> Option<u64> {
        (self.max_document_size > 0).then_some(self.max_document_size)
    }
}

/// Expand a leading `~` in a user-supplied path.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}
