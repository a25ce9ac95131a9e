// ABOUTME: SubagentDescriptor - a fully assembled subagent (rendered prompt,
// ABOUTME: constructed tools) handed to the orchestration engine.

use crate::component::ConstructedComponent;

/// An assembled subagent.
#[derive(Debug, Clone)]
pub struct SubagentDescriptor {
    pub name: String,
    pub description: String,

    /// System prompt with all parameters substituted.
    pub rendered_prompt: String,

    /// Tools in declaration order.
    pub tools: Vec<ConstructedComponent>,

    /// Model to use. If None, the engine picks its default.
    pub model: Option<String>,
}

impl SubagentDescriptor {
    /// Names the tools are invoked by.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(ConstructedComponent::name).collect()
    }

    /// `"name: description"`, as listed to a coordinating agent.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.name, self.description)
    }
}

/// One summary per line, indented for embedding in a coordinator prompt.
pub fn describe_subagents(descriptors: &[SubagentDescriptor]) -> String {
    descriptors
        .iter()
        .map(SubagentDescriptor::summary)
        .collect::<Vec<_>>()
        .join("\n    ")
}
