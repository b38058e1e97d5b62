//! Global config file handling through the binary.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_config_vars_are_defaults_and_cli_wins() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("[vars]\ncompany = \"Acme\"\ntone = \"friendly\"\n")?;
    let source = "---\ncompany: Placeholder\ntone: neutral\n---\n{{ company }} is {{ tone }}";

    project.premark().write_stdin(source).assert().success().stdout("Acme is friendly");

    project
        .premark()
        .args(["--var", "tone=terse"])
        .write_stdin(source)
        .assert()
        .success()
        .stdout("Acme is terse");
    Ok(())
}

#[test]
fn test_max_document_size_applies_to_resolved_files() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("max_document_size = 16\n")?;
    project.write("big.md", &"x".repeat(64))?;

    project
        .premark()
        .write_stdin("---\nbody: \"@big.md\"\n---\n{{ body }}")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Document too large: big.md"));
    Ok(())
}

#[test]
fn test_explicit_config_path() -> Result<()> {
    let project = TestProject::new()?;
    project.write("custom.toml", "[vars]\nwho = \"custom\"\n")?;

    project
        .premark()
        .args(["--config", "custom.toml"])
        .write_stdin("Hi {{ who }}")
        .assert()
        .success()
        .stdout("Hi custom");
    Ok(())
}

#[test]
fn test_invalid_config_is_reported() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("max_document_size = \"huge\"\n")?;

    project
        .premark()
        .write_stdin("text")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
    Ok(())
}
