//! Test utilities for premark
//!
//! Helpers shared by unit tests and the integration suite (through the
//! `test-utils` feature):
//! - One-time tracing setup for tests
//! - [`TestWorkspace`], a temporary directory of documents with a matching
//!   [`FileResolver`](crate::resolver::FileResolver)
//!
//! # Example
//!
//! ```rust,no_run
//! use premark::test_utils::{TestWorkspace, init_test_logging};
//!
//! # async fn example() -> anyhow::Result<()> {
//! init_test_logging(None);
//! let workspace = TestWorkspace::new()?;
//! workspace.write("base.md", "# Base\n\n{{ content }}")?;
//! let output = workspace.compile("---\nextends: base.md\n---\nHi").await?;
//! assert_eq!(output, "# Base\n\nHi");
//! # Ok(())
//! # }
//! ```

mod workspace;

pub use workspace::TestWorkspace;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=premark=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
