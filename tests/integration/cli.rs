//! `premark` binary behavior.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_compiles_file_relative_to_its_directory() -> Result<()> {
    let project = TestProject::new()?;
    project.write("docs/layout.md", "# {{ title }}\n\n{{ content }}")?;
    project.write("docs/part.md", "Part")?;
    project.write("docs/guide.md", "---\nextends: layout.md\ntitle: Guide\n---\nBody\n@part.md")?;

    project.premark().arg("docs/guide.md").assert().success().stdout("# Guide\n\nBody\nPart");
    Ok(())
}

#[test]
fn test_stdin_resolves_from_current_directory() -> Result<()> {
    let project = TestProject::new()?;
    project.write("part.md", "From file")?;

    project.premark().write_stdin("Intro\n@part.md").assert().success().stdout("Intro\nFrom file");
    Ok(())
}

#[test]
fn test_var_overrides_metadata() -> Result<()> {
    let project = TestProject::new()?;

    project
        .premark()
        .args(["--var", "name=Big World"])
        .write_stdin("---\nname: Default\n---\nHello {{ name }}")
        .assert()
        .success()
        .stdout("Hello Big World");
    Ok(())
}

#[test]
fn test_invalid_var_exits_with_error() -> Result<()> {
    let project = TestProject::new()?;

    project
        .premark()
        .args(["--var", "novalue"])
        .write_stdin("text")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid variable format: \"novalue\""));
    Ok(())
}

#[test]
fn test_undefined_variable_reports_suggestion() -> Result<()> {
    let project = TestProject::new()?;

    project
        .premark()
        .write_stdin("---\nname: x\n---\n{{ nmae }}")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Undefined variable: nmae"))
        .stderr(predicate::str::contains("Did you mean: name?"));
    Ok(())
}

#[test]
fn test_output_flag_writes_file() -> Result<()> {
    let project = TestProject::new()?;
    project.write("doc.md", "---\noutput:\n  title: Out\n---\nContent")?;

    project
        .premark()
        .args(["doc.md", "-o", "out.md"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Compiled to out.md"));

    assert_eq!(project.workspace.read("out.md")?, "---\ntitle: Out\n---\nContent\n");
    Ok(())
}

#[test]
fn test_missing_input_file_fails() -> Result<()> {
    let project = TestProject::new()?;

    project
        .premark()
        .arg("missing.md")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read input file missing.md"));
    Ok(())
}

#[test]
fn test_unresolved_include_warns_and_keeps_line() -> Result<()> {
    let project = TestProject::new()?;

    project
        .premark()
        .write_stdin("Start\n@nope.md")
        .assert()
        .success()
        .stdout("Start\n@nope.md")
        .stderr(predicate::str::contains("Leaving '@nope.md' unresolved"));

    project
        .premark()
        .arg("--quiet")
        .write_stdin("Start\n@nope.md")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    Ok(())
}

#[test]
fn test_circular_extends_fails() -> Result<()> {
    let project = TestProject::new()?;
    project.write("a.md", "---\nextends: b.md\n---\nA")?;
    project.write("b.md", "---\nextends: a.md\n---\nB")?;

    project
        .premark()
        .write_stdin("---\nextends: a.md\n---\nRoot")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Circular reference detected"))
        .stderr(predicate::str::contains("a.md -> b.md -> a.md"));
    Ok(())
}
