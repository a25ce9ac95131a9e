// ABOUTME: Defines the Tool trait (name, description, schema, async execute)
// ABOUTME: and ToolBuilder, the construct-then-configure capability.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::ToolResult;
use crate::component::Signature;

/// A tool that can be executed by an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a human-readable description for the LLM.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's input parameters.
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given parameters.
    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error>;
}

/// A tool type that can be constructed from a specification entry.
///
/// Construction happens in two phases: `construct` receives the rendered
/// `kwargs` as [`ToolBuilder::Args`], then `configure` receives the rendered
/// `setattrs` as [`ToolBuilder::Settings`]. The second phase only runs when
/// `setattrs` is non-empty.
pub trait ToolBuilder: Tool + Sized + 'static {
    /// Constructor arguments (required state).
    type Args: DeserializeOwned;

    /// Post-construction settings (optional instance state).
    type Settings: DeserializeOwned;

    /// Accepted constructor parameters.
    fn signature() -> Signature;

    /// Build a new instance.
    fn construct(args: Self::Args) -> Result<Self, anyhow::Error>;

    /// Apply settings to a constructed instance.
    fn configure(&mut self, settings: Self::Settings) -> Result<(), anyhow::Error>;
}
