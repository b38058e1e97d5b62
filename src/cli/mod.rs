//! Command-line interface for premark.
//!
//! ```bash
//! premark doc.md                      # compile to stdout
//! premark doc.md -o out.md            # compile to a file
//! cat doc.md | premark                # read from stdin, resolve from the current dir
//! premark doc.md --var name=World     # override a variable
//! premark -v doc.md                   # debug logging on stderr
//! ```
//!
//! Paths referenced by the document resolve relative to the input file's
//! directory, or the current directory when reading from stdin.
//!
//! # Configuration Layers
//!
//! 1. [`GlobalConfig`] file (`--config` or the default location)
//! 2. `[vars]` from that file, as default overrides
//! 3. `--var` flags, which win over `[vars]`
//!
//! [`CliConfig`] captures the process-level settings (logging, config path)
//! separately from the compile inputs so tests can inject them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing_subscriber::EnvFilter;

use crate::compiler::{CompileOptions, compile};
use crate::config::GlobalConfig;
use crate::core::PremarkError;
use crate::resolver::FileResolver;

/// Process-level settings derived from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Custom global configuration file.
    pub config_path: Option<String>,

    /// Suppress informational messages.
    pub quiet: bool,
}

impl CliConfig {
    /// Install the stderr tracing subscriber.
    ///
    /// `RUST_LOG` wins over [`log_level`](Self::log_level) when set. Calling
    /// this more than once is harmless.
    pub fn init_logging(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Compile a premark document to plain markdown.
#[derive(Parser, Debug)]
#[command(
    name = "premark",
    about = "A minimal markdown preprocessor for composable instructions",
    version,
    long_about = "premark compiles markdown documents that use layout inheritance (`extends`), \
                  `{{ variable }}` substitution, and `@path` transclusion into plain markdown."
)]
pub struct Cli {
    /// Input document. Reads from stdin when omitted.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Override a variable (repeatable).
    ///
    /// Split at the first `=`; the key is trimmed, the value is kept as-is.
    #[arg(long = "var", value_name = "KEY=VALUE")]
    vars: Vec<String>,

    /// Write the result to a file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Path to a custom global configuration file.
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Enable debug logging on stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Build the process configuration, set up logging, and run.
    ///
    /// # Errors
    ///
    /// Any configuration, input, compilation, or output failure.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Translate flags into a [`CliConfig`].
    ///
    /// - `--verbose` → `debug`
    /// - `--quiet` → `error`
    /// - otherwise → `warn`
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
            quiet: self.quiet,
        }
    }

    /// Run with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let global = GlobalConfig::load_with_optional(config.config_path.as_ref().map(PathBuf::from))
            .await
            .map_err(|e| PremarkError::ConfigError {
                message: format!("{e:#}"),
            })?;

        let overrides = self.collect_vars(&global)?;
        let (source, base_dir) = self.read_source().await?;
        let resolver = FileResolver::new(base_dir).with_max_document_size(global.document_size_limit());
        tracing::debug!("Resolving documents from {}", resolver.base_dir().display());
        let options = CompileOptions::new(resolver).with_vars(overrides);
        let output = compile(&source, &options).await?;

        self.write_output(&output, config.quiet).await
    }

    /// Override variables: config `[vars]` first, then `--var` in order.
    fn collect_vars(&self, global: &GlobalConfig) -> Result<Vec<(String, String)>, PremarkError> {
        let mut vars: Vec<(String, String)> =
            global.vars.iter().map(|(key, value)| (key.clone(), value.clone())).collect();
        for input in &self.vars {
            vars.push(parse_var(input)?);
        }
        Ok(vars)
    }

    /// Read the source text and pick the resolver base directory.
    async fn read_source(&self) -> Result<(String, PathBuf)> {
        match &self.input {
            Some(path) => {
                let source = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read input file {}", path.display()))?;
                Ok((source, base_dir_of(path)))
            }
            None => {
                let mut source = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut source)
                    .await
                    .context("Failed to read source from stdin")?;
                let cwd = std::env::current_dir().context("Failed to determine current directory")?;
                Ok((source, cwd))
            }
        }
    }

    async fn write_output(&self, output: &str, quiet: bool) -> Result<()> {
        match &self.output {
            Some(path) => {
                tokio::fs::write(path, output)
                    .await
                    .with_context(|| format!("Failed to write output to {}", path.display()))?;
                if !quiet {
                    eprintln!("{} Compiled to {}", "✓".green(), path.display());
                }
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(output.as_bytes()).await.context("Failed to write to stdout")?;
                stdout.flush().await.context("Failed to write to stdout")?;
            }
        }
        Ok(())
    }
}

/// Parse a `--var key=value` argument.
///
/// ```rust
/// use premark::cli::parse_var;
///
/// assert_eq!(parse_var(" name = a=b ").unwrap(), ("name".to_string(), " a=b ".to_string()));
/// assert!(parse_var("novalue").is_err());
/// assert!(parse_var("=value").is_err());
/// ```
pub fn parse_var(input: &str) -> Result<(String, String), PremarkError> {
    let Some((key, value)) = input.split_once('=') else {
        return Err(PremarkError::InvalidVariable {
            input: input.to_string(),
            reason: "Expected format: key=value".to_string(),
        });
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(PremarkError::InvalidVariable {
            input: input.to_string(),
            reason: "Variable name cannot be empty".to_string(),
        });
    }

    Ok((key.to_string(), value.to_string()))
}

fn base_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
