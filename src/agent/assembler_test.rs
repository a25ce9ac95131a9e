// ABOUTME: Tests for the Assembler - prompt rendering, tool building with
// ABOUTME: rendered kwargs, ordering, and every fatal assembly error.

use serde_json::json;

use super::*;
use crate::component::{ComponentRegistry, ConstructedComponent};
use crate::error::{AssemblyError, CadreError, RenderError};
use crate::template::RenderParams;

fn params() -> RenderParams {
    RenderParams::new()
        .with("topic", "oceans")
        .with("audience", "policy makers")
        .with("sources", "/data/sources.json")
}

fn assembler() -> Assembler {
    Assembler::new(ComponentRegistry::with_builtins())
}

#[test]
fn test_writer_prompt_rendered() {
    let doc = SpecDocument::new(vec![SubagentSpec::new("writer", "Write about {{topic}}")]);
    let agents = assembler().assemble(&doc, &params()).unwrap();

    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].name, "writer");
    assert_eq!(agents[0].rendered_prompt, "Write about oceans");
    assert!(agents[0].tools.is_empty());
}

#[test]
fn test_order_and_fields_preserved() {
    let doc = SpecDocument::from_yaml_str(
        r#"
- name: zeta
  description: last alphabetically
  system_prompt: "For {{audience}}"
  model: gpt-4o
- name: alpha
  description: first alphabetically
"#,
    )
    .unwrap();

    let agents = assembler().assemble(&doc, &params()).unwrap();
    let names: Vec<_> = agents.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
    assert_eq!(agents[0].rendered_prompt, "For policy makers");
    assert_eq!(agents[0].model.as_deref(), Some("gpt-4o"));
    assert_eq!(agents[1].description, "first alphabetically");
    assert!(agents[1].model.is_none());
}

#[tokio::test]
async fn test_tools_built_with_rendered_kwargs() {
    let doc = SpecDocument::from_yaml_str(
        r#"
- name: researcher
  tools:
    - tools.venue_lookup:normalize_url
    - name: tools.venue_lookup:VenueLookupTool
      kwargs:
        sources_path: "{{ sources }}"
      setattrs:
        description: "Venues for {{ topic }}"
        sources:
          - root_url: "https://www.oceans.org"
            country: "NZ"
"#,
    )
    .unwrap();

    let agents = assembler().assemble(&doc, &params()).unwrap();
    let tools = &agents[0].tools;
    assert_eq!(agents[0].tool_names(), vec!["normalize_url", "venue_lookup"]);

    assert!(matches!(tools[0], ConstructedComponent::BoundCallable(_)));
    assert!(matches!(tools[1], ConstructedComponent::Instance(_)));
    assert_eq!(tools[1].description(), "Venues for oceans");

    let lookup = tools[1].clone().into_tool();
    let result = lookup
        .execute(json!({"url": "https://oceans.org/about"}))
        .await
        .unwrap();
    assert!(result.content.contains("NZ"));
}

#[test]
fn test_duplicate_names_rejected() {
    let doc = SpecDocument::new(vec![
        SubagentSpec::new("x", "first"),
        SubagentSpec::new("y", "other"),
        SubagentSpec::new("x", "second"),
    ]);
    let err = assembler().assemble(&doc, &params()).unwrap_err();
    assert!(matches!(err, AssemblyError::DuplicateSubagent { ref name } if name == "x"));
}

#[test]
fn test_empty_name_rejected() {
    let doc = SpecDocument::new(vec![
        SubagentSpec::new("ok", ""),
        SubagentSpec::new("  ", ""),
    ]);
    let err = assembler().assemble(&doc, &params()).unwrap_err();
    assert!(matches!(err, AssemblyError::EmptyName { index: 1 }));
}

#[test]
fn test_missing_prompt_parameter_names_subagent() {
    let doc = SpecDocument::new(vec![SubagentSpec::new("writer", "About {{ venue }}")]);
    let err = assembler().assemble(&doc, &params()).unwrap_err();
    match err {
        AssemblyError::Render { subagent, source } => {
            assert_eq!(subagent, "writer");
            assert_eq!(
                source,
                RenderError::Undefined {
                    variable: "venue".into()
                }
            );
        }
        other => panic!("Expected Render, got {other:?}"),
    }
}

#[test]
fn test_missing_kwarg_parameter_names_subagent() {
    let doc = SpecDocument::from_yaml_str(
        r#"
- name: researcher
  tools:
    - name: tools.venue_lookup:VenueLookupTool
      kwargs:
        sources_path: "{{ nowhere }}"
"#,
    )
    .unwrap();
    let err = assembler().assemble(&doc, &params()).unwrap_err();
    assert!(matches!(err, AssemblyError::Render { ref subagent, .. } if subagent == "researcher"));
}

#[test]
fn test_reference_errors_abort_assembly() {
    let cases = [
        ("no_separator", AssemblyErrorKind::Invalid),
        ("tools.venue_lookup:Missing", AssemblyErrorKind::Unresolved),
        ("tools.venue_lookup:DEFAULT_SOURCES_PATH", AssemblyErrorKind::NotConstructible),
    ];
    for (reference, expected) in cases {
        let doc = SpecDocument::new(vec![SubagentSpec::new("a", "").tool(reference.into())]);
        let err = assembler().assemble(&doc, &params()).unwrap_err();
        assert_eq!(err.subagent(), Some("a"), "reference {reference}");
        assert!(err.to_string().starts_with("Subagent 'a': "));
        let kind = match err.root() {
            AssemblyError::InvalidReference(_) => AssemblyErrorKind::Invalid,
            AssemblyError::UnresolvedReference { .. } => AssemblyErrorKind::Unresolved,
            AssemblyError::NotConstructible(_) => AssemblyErrorKind::NotConstructible,
            other => panic!("unexpected error for {reference}: {other:?}"),
        };
        assert_eq!(kind, expected, "reference {reference}");
    }
}

#[derive(Debug, PartialEq)]
enum AssemblyErrorKind {
    Invalid,
    Unresolved,
    NotConstructible,
}

#[test]
fn test_unknown_constructor_kwarg() {
    let doc = SpecDocument::from_yaml_str(
        r#"
- name: researcher
  tools:
    - name: tools.venue_lookup:VenueLookupTool
      kwargs:
        sources_path: x.json
        cache_size: 10
"#,
    )
    .unwrap();
    let err = assembler().assemble(&doc, &params()).unwrap_err();
    assert_eq!(err.subagent(), Some("researcher"));
    match err.root() {
        AssemblyError::ArgumentMismatch { unknown, valid, .. } => {
            assert_eq!(unknown, &["cache_size"]);
            assert_eq!(valid, &["sources_path"]);
        }
        other => panic!("Expected ArgumentMismatch, got {other:?}"),
    }
}

#[test]
fn test_assembly_is_repeatable() {
    let doc = SpecDocument::new(vec![SubagentSpec::new("writer", "Write about {{topic}}")]);
    let assembler = assembler();
    let first = assembler.assemble(&doc, &params()).unwrap();
    let second = assembler.assemble(&doc, &params()).unwrap();
    assert_eq!(first[0].rendered_prompt, second[0].rendered_prompt);
}

#[test]
fn test_assemble_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subagents.yml");
    std::fs::write(&path, "- name: writer\n  system_prompt: Write about {{topic}}\n").unwrap();

    let agents = Assembler::default().assemble_file(&path, &params()).unwrap();
    assert_eq!(agents[0].rendered_prompt, "Write about oceans");

    let err = Assembler::default()
        .assemble_file(dir.path().join("absent.yml"), &params())
        .unwrap_err();
    assert!(matches!(err, CadreError::Spec(_)));
}

#[test]
fn test_describe_subagents() {
    let doc = SpecDocument::new(vec![
        SubagentSpec::new("researcher", "").description("Finds sources"),
        SubagentSpec::new("critic", "").description("Reviews drafts"),
    ]);
    let agents = assembler().assemble(&doc, &params()).unwrap();
    assert_eq!(
        describe_subagents(&agents),
        "researcher: Finds sources\n    critic: Reviews drafts"
    );
}
