//! End-to-end compilation through the library API.

use std::sync::Arc;

use anyhow::Result;
use premark::compiler::{CompileOptions, compile, compile_document};
use premark::core::PremarkError;
use premark::markdown::Value;
use premark::resolver::MemoryResolver;
use premark::test_utils::{TestWorkspace, init_test_logging};

#[tokio::test]
async fn test_full_document_against_files() -> Result<()> {
    init_test_logging(None);
    let workspace = TestWorkspace::new()?;
    workspace.write(
        "layouts/base.md",
        "---\nproduct: Widget\noutput:\n  title: Guide\n---\n# {{ product }} Guide\n\n{{ content }}\n\n@partials/footer.md",
    )?;
    workspace.write("partials/intro.md", "---\nauthor: docs\n---\nWelcome to the guide.")?;
    workspace.write("partials/steps.md", "1. Install\n2. Run")?;
    workspace.write("partials/footer.md", "-- {{ product }} team")?;

    let source = "---\nextends: layouts/base.md\nintro: \"@partials/intro.md\"\n---\n{{ intro }}\n\nSteps:\n  @partials/steps.md";
    let output = workspace.compile(source).await?;

    assert_eq!(
        output,
        "---\ntitle: Guide\n---\n# Widget Guide\n\nWelcome to the guide.\n\nSteps:\n  1. Install\n  2. Run\n\n-- {{ product }} team\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_content_slot_example() -> Result<()> {
    let resolver = MemoryResolver::new().with_document("parent.md", "Before\n{{ content }}\nAfter");
    let output = compile("---\nextends: parent.md\n---\nMiddle", &CompileOptions::new(resolver)).await?;
    assert_eq!(output, "Before\nMiddle\nAfter");
    Ok(())
}

#[tokio::test]
async fn test_blank_line_join_example() -> Result<()> {
    let resolver = MemoryResolver::new().with_document("parent.md", "Parent content");
    let output = compile("---\nextends: parent.md\n---\nChild content", &CompileOptions::new(resolver)).await?;
    assert_eq!(output, "Parent content\n\nChild content");
    Ok(())
}

#[tokio::test]
async fn test_reference_variable_example() -> Result<()> {
    let resolver = MemoryResolver::new().with_document("template", "---\nignored: true\n---\n# Template");
    let output = compile("---\nheader: \"@template\"\n---\n{{ header }}", &CompileOptions::new(resolver)).await?;
    assert_eq!(output, "# Template");
    Ok(())
}

#[tokio::test]
async fn test_numeric_keys_through_extends_and_overrides() -> Result<()> {
    let resolver = MemoryResolver::new().with_document("base.md", "---\n2024: parent\n1: one\n---\n{{ content }}");
    let source = "---\nextends: base.md\n'1': child\n---\n{{ 2024 }} {{ 1 }}";

    let output = compile(source, &CompileOptions::new(resolver.clone())).await?;
    assert_eq!(output, "parent child");

    let options = CompileOptions::new(resolver).with_var("2024", "override");
    assert_eq!(compile(source, &options).await?, "override child");
    Ok(())
}

#[tokio::test]
async fn test_round_trip_without_directives() -> Result<()> {
    let options = CompileOptions::new(MemoryResolver::new());
    for source in [
        "",
        "plain text",
        "# Heading\n\nContact me @username for details\n",
        "Windows\r\nline endings\r\n",
    ] {
        assert_eq!(compile(source, &options).await?, source);
    }
    Ok(())
}

#[tokio::test]
async fn test_extends_cycles_of_any_length_fail() {
    for length in 1..=4 {
        let mut resolver = MemoryResolver::new();
        for i in 0..length {
            let next = (i + 1) % length;
            resolver.insert(format!("{i}.md"), format!("---\nextends: {next}.md\n---\nLevel {i}"));
        }

        let error = compile("---\nextends: 0.md\n---\nRoot", &CompileOptions::new(resolver)).await.unwrap_err();
        assert!(
            matches!(error, PremarkError::CircularReference { .. }),
            "cycle of length {length} returned {error:?}"
        );
    }
}

#[tokio::test]
async fn test_undefined_variable_fails_whole_compilation() {
    let resolver = MemoryResolver::new().with_document("base.md", "---\nname: Base\n---\n{{ content }}");
    let error = compile("---\nextends: base.md\n---\n{{ name }} {{ nmae }}", &CompileOptions::new(resolver))
        .await
        .unwrap_err();

    assert_eq!(
        error,
        PremarkError::UndefinedVariable {
            name: "nmae".to_string(),
            suggestions: vec!["name".to_string()],
        }
    );
}

#[tokio::test]
async fn test_missing_include_is_absorbed_but_missing_parent_is_not() {
    let options = CompileOptions::new(MemoryResolver::new());

    let output = compile("Intro\n@missing.md\nOutro", &options).await.unwrap();
    assert_eq!(output, "Intro\n@missing.md\nOutro");

    let error = compile("---\nextends: missing.md\n---\nBody", &options).await.unwrap_err();
    assert!(matches!(error, PremarkError::DocumentNotFound { .. }));
}

#[tokio::test]
async fn test_diamond_includes_resolve() -> Result<()> {
    let resolver = MemoryResolver::new()
        .with_document("a.md", "A:\n  @shared.md")
        .with_document("b.md", "B:\n  @shared.md")
        .with_document("shared.md", "shared");

    let output = compile("@a.md\n@b.md", &CompileOptions::new(resolver)).await?;
    assert_eq!(output, "A:\n  shared\nB:\n  shared");
    Ok(())
}

#[tokio::test]
async fn test_included_paths_resolve_from_the_root() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace.write("docs/chapter.md", "Chapter\n@docs/section.md")?;
    workspace.write("docs/section.md", "Section")?;

    assert_eq!(workspace.compile("@docs/chapter.md").await?, "Chapter\nSection");
    Ok(())
}

#[tokio::test]
async fn test_compile_document_exposes_final_metadata() -> Result<()> {
    let options = CompileOptions::new(MemoryResolver::new()).with_vars([("version", "2.0")]);
    let document = compile_document("---\noutput:\n  release: true\n---\nv{{ version }}", &options).await?;

    assert_eq!(document.body, "v2.0");
    assert_eq!(document.get("release"), Some(&Value::Bool(true)));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_compilations_share_a_resolver() -> Result<()> {
    let resolver = Arc::new(
        MemoryResolver::new()
            .with_document("base.md", "<\n{{ content }}\n>")
            .with_document("part.md", "part"),
    );
    let first = CompileOptions::new(resolver.clone()).with_var("who", "one");
    let second = CompileOptions::new(resolver).with_var("who", "two");

    let (a, b) = tokio::join!(
        compile("---\nextends: base.md\n---\n{{ who }}\n@part.md", &first),
        compile("---\nextends: base.md\n---\n{{ who }}\n@part.md", &second),
    );
    assert_eq!(a?, "<\none\npart\n>");
    assert_eq!(b?, "<\ntwo\npart\n>");
    Ok(())
}
