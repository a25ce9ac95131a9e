// ABOUTME: RenderParams - the flat, ordered parameter scope that templates
// ABOUTME: are rendered against. Supplied by the caller, never mutated.

use serde::Serialize;
use serde_json::{Map, Value};

/// Named values substituted into templates during one assembly call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderParams {
    values: Map<String, Value>,
}

impl RenderParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parameters from any serializable struct or map.
    ///
    /// Returns `None` if the value does not serialize to a JSON object.
    pub fn from_serialize(value: impl Serialize) -> Option<Self> {
        match serde_json::to_value(value).ok()? {
            Value::Object(values) => Some(Self { values }),
            _ => None,
        }
    }

    /// Add a parameter (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a top-level parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Look up a dotted path such as `venue.country` or `fields.0`.
    ///
    /// Numeric segments index into arrays; every other segment is an
    /// object key.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for RenderParams {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RenderParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
