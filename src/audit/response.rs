// ABOUTME: Response - the closed set of shapes a subagent response can take,
// ABOUTME: with conversions from JSON values, messages, and strings.

use std::fmt;

use serde_json::Value;

use crate::message::Message;

/// A response value handed to the audit recorder.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// No value.
    Null,

    /// Plain text.
    Text(String),

    /// A conversation message.
    Message(Message),

    /// A keyed record, in iteration order.
    Record(Vec<(String, Response)>),

    /// An ordered collection, oldest first.
    Sequence(Vec<Response>),

    /// A framework object exposing named attributes.
    Object(ResponseObject),

    /// Any other scalar, already in display form.
    Other(String),
}

/// A framework object such as an agent run result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseObject {
    pub type_name: String,
    pub attrs: Vec<(String, Response)>,
}

impl ResponseObject {
    /// Value of the attribute `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&Response> {
        lookup(&self.attrs, name)
    }
}

impl Response {
    /// Build a keyed record.
    pub fn record<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Response>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Record(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a framework object with attributes.
    pub fn object<K, V, I>(type_name: impl Into<String>, attrs: I) -> Self
    where
        K: Into<String>,
        V: Into<Response>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Object(ResponseObject {
            type_name: type_name.into(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        })
    }

    /// Build a sequence.
    pub fn sequence<V: Into<Response>>(items: impl IntoIterator<Item = V>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Value under `key` when this is a record.
    pub fn get(&self, key: &str) -> Option<&Response> {
        match self {
            Self::Record(entries) => lookup(entries, key),
            _ => None,
        }
    }
}

pub(crate) fn lookup<'a>(entries: &'a [(String, Response)], key: &str) -> Option<&'a Response> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

impl From<Value> for Response {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) => Self::Text(s),
            Value::Bool(_) | Value::Number(_) => Self::Other(value.to_string()),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => Self::Record(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<Message> for Response {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

impl From<String> for Response {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Response {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl<T: Into<Response>> From<Vec<T>> for Response {
    fn from(items: Vec<T>) -> Self {
        Self::sequence(items)
    }
}

impl<T: Into<Response>> From<Option<T>> for Response {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) | Self::Other(s) => f.write_str(s),
            Self::Message(message) => f.write_str(&message.text()),
            Self::Record(entries) => {
                f.write_str("{")?;
                write_pairs(f, entries, ": ")?;
                f.write_str("}")
            }
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(object) => {
                write!(f, "{}(", object.type_name)?;
                write_pairs(f, &object.attrs, "=")?;
                f.write_str(")")
            }
        }
    }
}

fn write_pairs(f: &mut fmt::Formatter<'_>, pairs: &[(String, Response)], sep: &str) -> fmt::Result {
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}{sep}{value}")?;
    }
    Ok(())
}
