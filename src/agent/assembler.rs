// ABOUTME: Assembler - turns a specification document plus render parameters
// ABOUTME: into subagent descriptors, resolving and building every tool.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::{ComponentRef, SpecDocument, SubagentDescriptor, SubagentSpec};
use crate::component::{ComponentRegistry, ConstructedComponent, Kwargs, build};
use crate::error::{AssemblyError, CadreError, RenderError};
use crate::template::{RenderParams, render, render_str};

/// Builds subagents against a component registry.
#[derive(Debug, Clone)]
pub struct Assembler {
    registry: Arc<ComponentRegistry>,
}

impl Assembler {
    /// Create an assembler over `registry`.
    pub fn new(registry: impl Into<Arc<ComponentRegistry>>) -> Self {
        Self {
            registry: registry.into(),
        }
    }

    /// The registry references are resolved against.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Assemble every subagent in `document`, in document order.
    ///
    /// Names are checked up front; the first failure aborts the whole call.
    pub fn assemble(
        &self,
        document: &SpecDocument,
        params: &RenderParams,
    ) -> Result<Vec<SubagentDescriptor>, AssemblyError> {
        check_names(document)?;

        let descriptors = document
            .iter()
            .map(|spec| self.assemble_one(spec, params))
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = descriptors.len(), "assembled subagents");
        Ok(descriptors)
    }

    /// Load a document from `path` and assemble it.
    pub fn assemble_file(
        &self,
        path: impl AsRef<Path>,
        params: &RenderParams,
    ) -> Result<Vec<SubagentDescriptor>, CadreError> {
        let document = SpecDocument::load(path)?;
        Ok(self.assemble(&document, params)?)
    }

    fn assemble_one(
        &self,
        spec: &SubagentSpec,
        params: &RenderParams,
    ) -> Result<SubagentDescriptor, AssemblyError> {
        let rendered_prompt =
            render_str(&spec.system_prompt, params).map_err(|source| AssemblyError::Render {
                subagent: spec.name.clone(),
                source,
            })?;

        let tools = spec
            .tools
            .iter()
            .map(|tool| self.build_tool(spec, tool, params))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            subagent = %spec.name,
            tools = tools.len(),
            "assembled subagent"
        );

        Ok(SubagentDescriptor {
            name: spec.name.clone(),
            description: spec.description.clone(),
            rendered_prompt,
            tools,
            model: spec.model.clone(),
        })
    }

    fn build_tool(
        &self,
        spec: &SubagentSpec,
        tool: &ComponentRef,
        params: &RenderParams,
    ) -> Result<ConstructedComponent, AssemblyError> {
        let render_err = |source| AssemblyError::Render {
            subagent: spec.name.clone(),
            source,
        };

        let reference = tool.reference();
        let unit = self
            .registry
            .resolve(reference)
            .map_err(|err| err.in_subagent(&spec.name))?;
        let kwargs = render_map(tool.kwargs(), params).map_err(render_err)?;
        let setattrs = render_map(tool.setattrs(), params).map_err(render_err)?;
        build(reference, unit, kwargs, setattrs).map_err(|err| err.in_subagent(&spec.name))
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(ComponentRegistry::with_builtins())
    }
}

/// Reject empty and duplicate names.
fn check_names(document: &SpecDocument) -> Result<(), AssemblyError> {
    let mut seen = HashSet::new();
    for (index, spec) in document.iter().enumerate() {
        if spec.name.trim().is_empty() {
            return Err(AssemblyError::EmptyName { index });
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(AssemblyError::DuplicateSubagent {
                name: spec.name.clone(),
            });
        }
    }
    Ok(())
}

/// Render every value of a keyword map, keeping key order.
fn render_map(map: Kwargs, params: &RenderParams) -> Result<Kwargs, RenderError> {
    map.into_iter()
        .map(|(key, value)| render(&value, params).map(|value| (key, value)))
        .collect()
}
