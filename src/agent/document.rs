// ABOUTME: Specification document types - the declarative list of subagents
// ABOUTME: loaded from YAML or JSON, with tool references in two shapes.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::component::Kwargs;
use crate::error::SpecError;

/// An ordered list of subagent specifications.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SpecDocument {
    pub subagents: Vec<SubagentSpec>,
}

/// One declared subagent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubagentSpec {
    /// Unique, non-empty name.
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Template rendered against the assembly parameters.
    #[serde(default)]
    pub system_prompt: String,

    #[serde(default)]
    pub tools: Vec<ComponentRef>,

    #[serde(default)]
    pub model: Option<String>,
}

/// A tool entry: a bare reference, or a reference with arguments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ComponentRef {
    Bare(String),
    Detailed {
        name: String,
        #[serde(default)]
        kwargs: Option<Map<String, Value>>,
        #[serde(default)]
        setattrs: Option<Map<String, Value>>,
    },
}

impl ComponentRef {
    /// The `namespace:identifier` reference string.
    pub fn reference(&self) -> &str {
        match self {
            Self::Bare(name) | Self::Detailed { name, .. } => name,
        }
    }

    /// Constructor keywords, empty when absent or null.
    pub fn kwargs(&self) -> Kwargs {
        match self {
            Self::Detailed {
                kwargs: Some(kwargs),
                ..
            } => kwargs.clone(),
            _ => Kwargs::new(),
        }
    }

    /// Post-construction settings, empty when absent or null.
    pub fn setattrs(&self) -> Kwargs {
        match self {
            Self::Detailed {
                setattrs: Some(setattrs),
                ..
            } => setattrs.clone(),
            _ => Kwargs::new(),
        }
    }
}

impl SpecDocument {
    /// Create a document from specs.
    pub fn new(subagents: Vec<SubagentSpec>) -> Self {
        Self { subagents }
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, SpecError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a document, choosing the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let read = || {
            std::fs::read_to_string(path).map_err(|source| SpecError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&read()?),
            Some("json") => Self::from_json_str(&read()?),
            _ => Err(SpecError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn len(&self) -> usize {
        self.subagents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subagents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubagentSpec> {
        self.subagents.iter()
    }
}

impl SubagentSpec {
    /// Create a spec with a name and prompt template.
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            system_prompt: system_prompt.into(),
            tools: Vec::new(),
            model: None,
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a tool reference.
    pub fn tool(mut self, tool: ComponentRef) -> Self {
        self.tools.push(tool);
        self
    }

    /// Set the model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl From<&str> for ComponentRef {
    fn from(reference: &str) -> Self {
        Self::Bare(reference.to_string())
    }
}
