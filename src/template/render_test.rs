// ABOUTME: Tests for template rendering - substitution, nesting, errors.
// ABOUTME: Covers order preservation and idempotence on rendered output.

use serde_json::json;

use super::*;
use crate::error::RenderError;

fn params() -> RenderParams {
    RenderParams::new()
        .with("topic", "oceans")
        .with("word_limit", 120)
        .with("venue", json!({"name": "The Gazette", "country": "UK"}))
        .with("fields", json!(["Full name", "Age"]))
}

#[test]
fn test_render_simple_placeholder() {
    let out = render_str("Write about {{topic}}", &params()).unwrap();
    assert_eq!(out, "Write about oceans");
}

#[test]
fn test_render_whitespace_and_numbers() {
    let out = render_str("Limit: {{ word_limit }} words on {{  topic }}", &params()).unwrap();
    assert_eq!(out, "Limit: 120 words on oceans");
}

#[test]
fn test_render_dotted_paths() {
    let out = render_str("{{venue.name}} ({{ venue.country }}): {{fields.1}}", &params()).unwrap();
    assert_eq!(out, "The Gazette (UK): Age");
}

#[test]
fn test_render_structured_value_as_json() {
    let out = render_str("Find: {{fields}}", &params()).unwrap();
    assert_eq!(out, r#"Find: ["Full name","Age"]"#);
}

#[test]
fn test_missing_variable_is_named() {
    let err = render_str("Hello {{ audience }}", &params()).unwrap_err();
    assert_eq!(
        err,
        RenderError::Undefined {
            variable: "audience".into()
        }
    );
    assert!(err.to_string().contains("audience"));
}

#[test]
fn test_missing_nested_segment() {
    let err = render_str("{{ venue.city }}", &params()).unwrap_err();
    assert_eq!(
        err,
        RenderError::Undefined {
            variable: "venue.city".into()
        }
    );
}

#[test]
fn test_invalid_expression() {
    let err = render_str("{{ 1 + 2 }}", &params()).unwrap_err();
    assert!(matches!(err, RenderError::Syntax { .. }));
}

#[test]
fn test_plain_text_unchanged() {
    let text = "No placeholders here { just braces }";
    assert_eq!(render_str(text, &params()).unwrap(), text);
    assert_eq!(render_str(text, &RenderParams::new()).unwrap(), text);
}

#[test]
fn test_render_is_idempotent() {
    let p = params();
    let once = render_str("{{topic}} for {{ word_limit }} and {{venue.name}}", &p).unwrap();
    assert!(!once.contains("{{"));
    let twice = render_str(&once, &p).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_render_nested_preserves_order() {
    let value = json!({
        "zeta": "{{topic}}",
        "alpha": ["{{ word_limit }}", 7, {"inner": "x {{topic}}"}],
        "mid": null,
        "flag": true
    });
    let out = render(&value, &params()).unwrap();

    let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid", "flag"]);
    assert_eq!(out["zeta"], "oceans");
    assert_eq!(out["alpha"][0], "120");
    assert_eq!(out["alpha"][1], 7);
    assert_eq!(out["alpha"][2]["inner"], "x oceans");
    assert!(out["mid"].is_null());
    assert_eq!(out["flag"], true);
}

#[test]
fn test_render_keys_are_not_rendered() {
    let value = json!({"{{topic}}": "v"});
    let out = render(&value, &params()).unwrap();
    assert_eq!(out["{{topic}}"], "v");
}

#[test]
fn test_render_error_inside_nested_value() {
    let value = json!({"a": ["ok", "{{missing}}"]});
    assert!(render(&value, &params()).is_err());
}

#[test]
fn test_render_does_not_mutate_params() {
    let p = params();
    let before = p.clone();
    let _ = render(&json!({"a": "{{topic}}"}), &p).unwrap();
    assert_eq!(p, before);
}

#[test]
fn test_params_from_serialize() {
    #[derive(serde::Serialize)]
    struct Inputs {
        author: String,
        current_year: u32,
    }

    let p = RenderParams::from_serialize(Inputs {
        author: "Jane Doe".into(),
        current_year: 2026,
    })
    .unwrap();
    assert_eq!(
        render_str("{{author}} in {{current_year}}", &p).unwrap(),
        "Jane Doe in 2026"
    );
    assert!(RenderParams::from_serialize(42).is_none());
}
