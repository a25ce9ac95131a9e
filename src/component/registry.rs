// ABOUTME: Implements the ComponentRegistry - an explicit mapping from
// ABOUTME: "namespace:identifier" references to units, filled at startup.

use std::collections::HashMap;
use std::future::Future;

use serde_json::Value;
use tracing::debug;

use super::{FunctionUnit, Kwargs, Signature, ToolUnit, Unit};
use crate::error::AssemblyError;
use crate::tool::ToolBuilder;

/// Registry of units addressable by reference string.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    namespaces: HashMap<String, HashMap<String, Unit>>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in namespaces registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::tools::register_builtins(&mut registry);
        registry
    }

    /// Register a unit under `namespace:identifier`, replacing any previous one.
    pub fn register(
        &mut self,
        namespace: impl Into<String>,
        identifier: impl Into<String>,
        unit: Unit,
    ) -> &mut Self {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .insert(identifier.into(), unit);
        self
    }

    /// Register tool type `T`.
    pub fn register_tool<T: ToolBuilder>(
        &mut self,
        namespace: impl Into<String>,
        identifier: impl Into<String>,
    ) -> &mut Self {
        self.register(namespace, identifier, Unit::Tool(ToolUnit::of::<T>()))
    }

    /// Register an async function. The identifier doubles as its tool name.
    pub fn register_function<F, Fut>(
        &mut self,
        namespace: impl Into<String>,
        identifier: impl Into<String>,
        description: impl Into<String>,
        signature: Signature,
        func: F,
    ) -> &mut Self
    where
        F: Fn(Kwargs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, anyhow::Error>> + Send + 'static,
    {
        let identifier = identifier.into();
        let unit = FunctionUnit::new(identifier.clone(), description, signature, func);
        self.register(namespace, identifier, Unit::Function(unit))
    }

    /// Register a plain value.
    pub fn register_constant(
        &mut self,
        namespace: impl Into<String>,
        identifier: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.register(namespace, identifier, Unit::Constant(value.into()))
    }

    /// Resolve a `namespace:identifier` reference.
    pub fn resolve(&self, reference: &str) -> Result<&Unit, AssemblyError> {
        let (namespace, identifier) = split_reference(reference)?;

        let units = self.namespaces.get(namespace).ok_or_else(|| {
            AssemblyError::UnresolvedReference {
                reference: reference.to_string(),
                reason: format!("no namespace named '{namespace}'"),
            }
        })?;

        let unit = units
            .get(identifier)
            .ok_or_else(|| AssemblyError::UnresolvedReference {
                reference: reference.to_string(),
                reason: format!("'{namespace}' has no member '{identifier}'"),
            })?;

        debug!(reference, kind = unit.kind(), "resolved component reference");
        Ok(unit)
    }

    /// Validate construction keywords against a unit's signature.
    ///
    /// Variadic signatures and constants are not checked.
    pub fn validate_arguments(unit: &Unit, kwargs: &Kwargs) -> Result<(), AssemblyError> {
        let name = match unit {
            Unit::Tool(tool) => tool.type_name(),
            Unit::Function(func) => func.name(),
            Unit::Constant(_) => return Ok(()),
        };
        match unit.signature() {
            Some(signature) => signature.validate(name, kwargs),
            None => Ok(()),
        }
    }

    /// All registered references, sorted alphabetically.
    pub fn list(&self) -> Vec<String> {
        let mut references: Vec<String> = self
            .namespaces
            .iter()
            .flat_map(|(namespace, units)| {
                units.keys().map(move |identifier| format!("{namespace}:{identifier}"))
            })
            .collect();
        references.sort();
        references
    }

    /// Number of registered units.
    pub fn count(&self) -> usize {
        self.namespaces.values().map(HashMap::len).sum()
    }
}

/// Split a reference into namespace and identifier.
///
/// Exactly one `:` is required and neither side may be empty.
pub fn split_reference(reference: &str) -> Result<(&str, &str), AssemblyError> {
    let mut parts = reference.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(namespace), Some(identifier), None)
            if !namespace.trim().is_empty() && !identifier.trim().is_empty() =>
        {
            Ok((namespace, identifier))
        }
        _ => Err(AssemblyError::InvalidReference(reference.to_string())),
    }
}
