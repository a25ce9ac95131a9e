// ABOUTME: Component factory - turns a resolved unit plus rendered kwargs and
// ABOUTME: setattrs into a live tool instance or a bound callable.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use super::{CallableFn, ComponentRegistry, FunctionUnit, Kwargs, Unit};
use crate::error::AssemblyError;
use crate::tool::{Tool, ToolResult};

/// A component ready to hand to the orchestration engine.
#[derive(Clone)]
pub enum ConstructedComponent {
    /// A stateful tool instance.
    Instance(Arc<dyn Tool>),

    /// A function with fixed keyword arguments.
    BoundCallable(BoundCallable),
}

impl ConstructedComponent {
    /// Name the component is invoked by.
    pub fn name(&self) -> &str {
        match self {
            Self::Instance(tool) => tool.name(),
            Self::BoundCallable(callable) => callable.name(),
        }
    }

    /// Description shown to the model.
    pub fn description(&self) -> &str {
        match self {
            Self::Instance(tool) => tool.description(),
            Self::BoundCallable(callable) => callable.description(),
        }
    }

    /// View the component through the common [`Tool`] contract.
    pub fn into_tool(self) -> Arc<dyn Tool> {
        match self {
            Self::Instance(tool) => tool,
            Self::BoundCallable(callable) => Arc::new(callable),
        }
    }
}

impl fmt::Debug for ConstructedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(tool) => f.debug_tuple("Instance").field(&tool.name()).finish(),
            Self::BoundCallable(callable) => f
                .debug_struct("BoundCallable")
                .field("name", &callable.name)
                .field("bound", &callable.bound)
                .finish(),
        }
    }
}

/// A function paired with fixed keyword arguments.
#[derive(Clone)]
pub struct BoundCallable {
    name: String,
    description: String,
    params: Vec<String>,
    func: CallableFn,
    bound: Kwargs,
}

impl BoundCallable {
    fn new(unit: &FunctionUnit, bound: Kwargs) -> Self {
        Self {
            name: unit.name().to_string(),
            description: unit.description().to_string(),
            params: unit.signature().params().to_vec(),
            func: unit.func(),
            bound,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The fixed keyword arguments.
    pub fn bound_args(&self) -> &Kwargs {
        &self.bound
    }

    /// Whether any arguments are bound (a partial application).
    pub fn is_partial(&self) -> bool {
        !self.bound.is_empty()
    }

    /// Invoke with call-time arguments; these override bound ones.
    pub async fn call(&self, args: Kwargs) -> Result<Value, anyhow::Error> {
        let mut merged = self.bound.clone();
        merged.extend(args);
        (self.func)(merged).await
    }
}

#[async_trait]
impl Tool for BoundCallable {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> Value {
        let properties: serde_json::Map<String, Value> = self
            .params
            .iter()
            .filter(|param| !self.bound.contains_key(*param))
            .map(|param| (param.clone(), json!({})))
            .collect();
        json!({
            "type": "object",
            "properties": properties,
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args = match params {
            Value::Object(map) => map,
            Value::Null => Kwargs::new(),
            other => {
                return Ok(ToolResult::error(format!(
                    "expected an object of arguments, got {other}"
                )));
            }
        };
        Ok(ToolResult::from_value(self.call(args).await?))
    }
}

/// Build a resolved unit.
///
/// Tool units are validated, constructed from `kwargs`, then configured with
/// `setattrs` when it is non-empty. Function units become bound callables.
/// Constants cannot be built.
pub fn build(
    reference: &str,
    unit: &Unit,
    kwargs: Kwargs,
    setattrs: Kwargs,
) -> Result<ConstructedComponent, AssemblyError> {
    match unit {
        Unit::Tool(tool_unit) => {
            ComponentRegistry::validate_arguments(unit, &kwargs)?;

            let mut pending =
                tool_unit
                    .construct(kwargs)
                    .map_err(|source| AssemblyError::Construction {
                        reference: reference.to_string(),
                        source,
                    })?;

            if !setattrs.is_empty() {
                pending
                    .configure(setattrs)
                    .map_err(|source| AssemblyError::Configuration {
                        reference: reference.to_string(),
                        source,
                    })?;
            }

            let tool = pending.finish();
            debug!(reference, tool = tool.name(), "constructed tool instance");
            Ok(ConstructedComponent::Instance(tool))
        }
        Unit::Function(function_unit) => {
            if !setattrs.is_empty() {
                return Err(AssemblyError::Configuration {
                    reference: reference.to_string(),
                    source: anyhow::anyhow!("setattrs only apply to tool units"),
                });
            }
            debug!(reference, bound = kwargs.len(), "bound function");
            Ok(ConstructedComponent::BoundCallable(BoundCallable::new(
                function_unit,
                kwargs,
            )))
        }
        Unit::Constant(_) => Err(AssemblyError::NotConstructible(reference.to_string())),
    }
}
