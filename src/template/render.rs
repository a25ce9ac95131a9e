// ABOUTME: Placeholder substitution for `{{ name }}` templates, applied to
// ABOUTME: strings directly and element-wise to objects and arrays.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use super::RenderParams;
use crate::error::RenderError;

/// Any `{{ ... }}` block, non-greedy.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("placeholder regex is valid"));

/// A valid placeholder body: identifier with optional dotted segments.
static PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*$").expect("path regex is valid")
});

/// Render a value against `params`.
///
/// Strings are rendered via [`render_str`]; objects and arrays are rendered
/// element-wise with key and element order preserved. Object keys are left
/// untouched. Everything else is returned as-is.
pub fn render(value: &Value, params: &RenderParams) -> Result<Value, RenderError> {
    match value {
        Value::String(s) => render_str(s, params).map(Value::String),
        Value::Object(map) => {
            let mut rendered = serde_json::Map::with_capacity(map.len());
            for (key, item) in map {
                rendered.insert(key.clone(), render(item, params)?);
            }
            Ok(Value::Object(rendered))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| render(item, params))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}

/// Substitute every `{{ path }}` placeholder in `template`.
pub fn render_str(template: &str, params: &RenderParams) -> Result<String, RenderError> {
    if !template.contains("{{") {
        return Ok(template.to_string());
    }

    let mut failure = None;
    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        if failure.is_some() {
            return String::new();
        }
        let expression = caps[1].trim();
        if !PATH.is_match(expression) {
            failure = Some(RenderError::Syntax {
                expression: expression.to_string(),
            });
            return String::new();
        }
        match params.lookup(expression) {
            Some(value) => display_value(value),
            None => {
                failure = Some(RenderError::Undefined {
                    variable: expression.to_string(),
                });
                String::new()
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(rendered.into_owned()),
    }
}

/// Text substituted for a parameter value.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
