//! Common test utilities for premark integration tests

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use premark::test_utils::TestWorkspace;

/// A document workspace plus an isolated config location for CLI runs.
pub struct TestProject {
    pub workspace: TestWorkspace,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            workspace: TestWorkspace::new()?,
        })
    }

    /// Write a document relative to the project root.
    pub fn write(&self, relative: &str, content: &str) -> Result<()> {
        self.workspace.write(relative, content)?;
        Ok(())
    }

    /// Write `.premark/config.toml` inside the project.
    pub fn write_config(&self, content: &str) -> Result<()> {
        self.write(".premark/config.toml", content)
    }

    /// A `premark` command run from the project root, using the project's
    /// config file instead of the user's.
    pub fn premark(&self) -> Command {
        let mut cmd = Command::cargo_bin("premark").unwrap();
        cmd.current_dir(self.workspace.path())
            .env("PREMARK_CONFIG_PATH", self.workspace.file(".premark/config.toml"))
            .env_remove("RUST_LOG");
        cmd
    }
}
