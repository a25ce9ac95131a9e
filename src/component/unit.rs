// ABOUTME: Unit - what a reference resolves to: a tool type, an async
// ABOUTME: function over keyword arguments, or a non-invocable constant.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Map, Value};

use super::Signature;
use crate::tool::{Tool, ToolBuilder};

/// Keyword arguments passed to constructors and functions.
pub type Kwargs = Map<String, Value>;

/// Type-erased async function over keyword arguments.
pub type CallableFn =
    Arc<dyn Fn(Kwargs) -> BoxFuture<'static, Result<Value, anyhow::Error>> + Send + Sync>;

/// A registered unit.
#[derive(Clone)]
pub enum Unit {
    /// A tool type built in two phases.
    Tool(ToolUnit),

    /// An invocable function.
    Function(FunctionUnit),

    /// A value that is neither a tool nor invocable.
    Constant(Value),
}

impl Unit {
    /// Construction signature, if the unit has one.
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Self::Tool(unit) => Some(&unit.signature),
            Self::Function(unit) => Some(&unit.signature),
            Self::Constant(_) => None,
        }
    }

    /// Short kind label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tool(_) => "tool",
            Self::Function(_) => "function",
            Self::Constant(_) => "constant",
        }
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tool(unit) => f.debug_tuple("Tool").field(&unit.type_name).finish(),
            Self::Function(unit) => f.debug_tuple("Function").field(&unit.name).finish(),
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
        }
    }
}

/// A tool instance that has been constructed but not yet finished.
pub(crate) trait PendingTool: Send {
    fn configure(&mut self, settings: Kwargs) -> Result<(), anyhow::Error>;
    fn finish(self: Box<Self>) -> Arc<dyn Tool>;
}

impl<T: ToolBuilder> PendingTool for T {
    fn configure(&mut self, settings: Kwargs) -> Result<(), anyhow::Error> {
        let settings: T::Settings = serde_json::from_value(Value::Object(settings))?;
        ToolBuilder::configure(self, settings)
    }

    fn finish(self: Box<Self>) -> Arc<dyn Tool> {
        Arc::new(*self)
    }
}

type ConstructFn = Arc<dyn Fn(Kwargs) -> Result<Box<dyn PendingTool>, anyhow::Error> + Send + Sync>;

/// A tool type registered for construction by reference.
#[derive(Clone)]
pub struct ToolUnit {
    type_name: &'static str,
    signature: Signature,
    construct: ConstructFn,
}

impl ToolUnit {
    /// Create a unit for tool type `T`.
    pub fn of<T: ToolBuilder>() -> Self {
        Self {
            type_name: short_type_name::<T>(),
            signature: T::signature(),
            construct: Arc::new(construct_pending::<T>),
        }
    }

    /// Name of the tool type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn construct(&self, kwargs: Kwargs) -> Result<Box<dyn PendingTool>, anyhow::Error> {
        (self.construct)(kwargs)
    }
}

/// A function registered for binding by reference.
#[derive(Clone)]
pub struct FunctionUnit {
    name: String,
    description: String,
    signature: Signature,
    func: CallableFn,
}

impl FunctionUnit {
    /// Wrap an async function over keyword arguments.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        signature: Signature,
        func: F,
    ) -> Self
    where
        F: Fn(Kwargs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, anyhow::Error>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            signature,
            func: Arc::new(
                move |kwargs: Kwargs| -> BoxFuture<'static, Result<Value, anyhow::Error>> {
                    Box::pin(func(kwargs))
                },
            ),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn func(&self) -> CallableFn {
        Arc::clone(&self.func)
    }
}

fn construct_pending<T: ToolBuilder>(kwargs: Kwargs) -> Result<Box<dyn PendingTool>, anyhow::Error> {
    let args: T::Args = serde_json::from_value(Value::Object(kwargs))?;
    Ok(Box::new(T::construct(args)?))
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
