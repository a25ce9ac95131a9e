// ABOUTME: VenueLookupTool - looks up publication venue details by URL from a
// ABOUTME: local sources table that is loaded once and cached per instance.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::Value;

use crate::component::{Kwargs, Signature};
use crate::tool::{Tool, ToolBuilder, ToolResult};

/// Path of the sources table when none is configured.
pub const DEFAULT_SOURCES_PATH: &str = "./config/sources.json";

const DEFAULT_DESCRIPTION: &str = "Useful for information on a publication venue given its URL.";

/// Sources table keyed by normalized root URL.
type SourceTable = HashMap<String, Value>;

/// Tool for looking up a publication venue.
pub struct VenueLookupTool {
    sources_path: PathBuf,
    description: String,
    sources: RwLock<Option<SourceTable>>,
}

/// Constructor arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VenueLookupArgs {
    #[serde(default = "default_sources_path")]
    pub sources_path: PathBuf,
}

/// Post-construction settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VenueLookupSettings {
    /// Inline sources; replaces loading from `sources_path`.
    pub sources: Option<Vec<Value>>,

    /// Override the description shown to the model.
    pub description: Option<String>,
}

fn default_sources_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCES_PATH)
}

impl VenueLookupTool {
    /// Create a tool reading sources from `sources_path` on first use.
    pub fn new(sources_path: impl Into<PathBuf>) -> Self {
        Self {
            sources_path: sources_path.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
            sources: RwLock::new(None),
        }
    }

    /// Look up the source record for `url`.
    pub fn lookup(&self, url: &str) -> Result<Option<Value>, anyhow::Error> {
        if self.sources.read().is_none() {
            let table = self.load_sources()?;
            let mut guard = self.sources.write();
            if guard.is_none() {
                *guard = Some(table);
            }
        }

        let domain = normalize_url(url);
        Ok(self
            .sources
            .read()
            .as_ref()
            .and_then(|table| table.get(&domain).cloned()))
    }

    fn load_sources(&self) -> Result<SourceTable, anyhow::Error> {
        let raw = std::fs::read_to_string(&self.sources_path)
            .with_context(|| format!("Error reading {}", self.sources_path.display()))?;
        let entries: Vec<Value> = serde_json::from_str(&raw)
            .with_context(|| format!("Error parsing {}", self.sources_path.display()))?;
        index_sources(entries)
    }
}

/// Key source records by their normalized `root_url`.
fn index_sources(entries: Vec<Value>) -> Result<SourceTable, anyhow::Error> {
    let mut table = HashMap::with_capacity(entries.len());
    for entry in entries {
        let root = entry
            .get("root_url")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("source entry missing 'root_url': {entry}"))?;
        table.insert(normalize_url(root), entry);
    }
    Ok(table)
}

/// Normalize a URL for comparison: lowercase host, no `www.`, no trailing `/`.
pub fn normalize_url(url: &str) -> String {
    let mut u = url.trim().to_lowercase();
    for scheme in ["http://", "https://"] {
        if let Some(rest) = u.strip_prefix(scheme) {
            let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
            u = rest[..end].to_string();
            break;
        }
    }
    if let Some(rest) = u.strip_prefix("www.") {
        u = rest.to_string();
    }
    u.trim_end_matches('/').to_string()
}

#[async_trait]
impl Tool for VenueLookupTool {
    fn name(&self) -> &str {
        "venue_lookup"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The base url of the publisher to look up."
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            url: String,
        }
        let params: Params = serde_json::from_value(params)?;

        match self.lookup(&params.url) {
            Ok(Some(source)) => Ok(ToolResult::from_value(source).with_metadata("matched", true)),
            Ok(None) => Ok(ToolResult::text("Unknown").with_metadata("matched", false)),
            Err(e) => Ok(ToolResult::error(format!("Failed to load sources: {e}"))),
        }
    }
}

impl ToolBuilder for VenueLookupTool {
    type Args = VenueLookupArgs;
    type Settings = VenueLookupSettings;

    fn signature() -> Signature {
        Signature::fixed(["sources_path"])
    }

    fn construct(args: VenueLookupArgs) -> Result<Self, anyhow::Error> {
        Ok(Self::new(args.sources_path))
    }

    fn configure(&mut self, settings: VenueLookupSettings) -> Result<(), anyhow::Error> {
        if let Some(entries) = settings.sources {
            *self.sources.get_mut() = Some(index_sources(entries)?);
        }
        if let Some(description) = settings.description {
            self.description = description;
        }
        Ok(())
    }
}

/// Function form of [`normalize_url`] for binding by reference.
pub(crate) async fn normalize_url_fn(args: Kwargs) -> Result<Value, anyhow::Error> {
    let url = args
        .get("url")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("Missing url parameter"))?;
    Ok(Value::String(normalize_url(url)))
}
