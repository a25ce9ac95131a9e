// ABOUTME: Defines all error types for the cadre library using thiserror.
// ABOUTME: Each concern has its own error enum, unified under CadreError.

use std::path::PathBuf;

/// Top-level error type for the cadre library.
#[derive(Debug, thiserror::Error)]
pub enum CadreError {
    #[error("Spec error: {0}")]
    Spec(#[from] SpecError),

    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("Audit error: {0}")]
    Audit(#[from] AuditError),
}

/// Errors from rendering templates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("'{variable}' is undefined")]
    Undefined { variable: String },

    #[error("Invalid placeholder expression: {{{{{expression}}}}}")]
    Syntax { expression: String },
}

/// Errors from loading a specification document.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported spec format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Errors from resolving, building, and assembling subagents.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("Reference must be 'namespace:identifier', got: {0}")]
    InvalidReference(String),

    #[error("Unresolved reference '{reference}': {reason}")]
    UnresolvedReference { reference: String, reason: String },

    #[error("{unit} got unexpected keyword(s): {unknown:?}. Valid params: {valid:?}")]
    ArgumentMismatch {
        unit: String,
        unknown: Vec<String>,
        valid: Vec<String>,
    },

    #[error("'{0}' is not callable and not a tool")]
    NotConstructible(String),

    #[error("Failed to construct '{reference}': {source}")]
    Construction {
        reference: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to configure '{reference}': {source}")]
    Configuration {
        reference: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Render failed for subagent '{subagent}': {source}")]
    Render {
        subagent: String,
        #[source]
        source: RenderError,
    },

    #[error("Subagent '{subagent}': {source}")]
    Subagent {
        subagent: String,
        #[source]
        source: Box<AssemblyError>,
    },

    #[error("Subagent at index {index} has an empty name")]
    EmptyName { index: usize },

    #[error("Duplicate subagent name: {name}")]
    DuplicateSubagent { name: String },
}

impl AssemblyError {
    /// Attach the name of the subagent being assembled.
    pub fn in_subagent(self, subagent: impl Into<String>) -> Self {
        match self {
            Self::Subagent { .. } | Self::Render { .. } => self,
            other => Self::Subagent {
                subagent: subagent.into(),
                source: Box::new(other),
            },
        }
    }

    /// Name of the subagent the error occurred in, if known.
    pub fn subagent(&self) -> Option<&str> {
        match self {
            Self::Subagent { subagent, .. } | Self::Render { subagent, .. } => Some(subagent),
            Self::DuplicateSubagent { name } => Some(name),
            _ => None,
        }
    }

    /// The underlying error with any subagent context removed.
    pub fn root(&self) -> &AssemblyError {
        match self {
            Self::Subagent { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Errors from the audit recorder.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("max_log must be a positive integer, got {0}")]
    InvalidMaxLen(usize),

    #[error("Failed to append to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Audit task failed: {0}")]
    Task(String),
}
