// ABOUTME: Hook system for subagent lifecycle events fired by the engine.
// ABOUTME: Provides events, actions, the model-response input, and a registry.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use crate::audit::Response;

/// What a model-response hook receives: the response alone, or the
/// request that produced it together with the response.
#[derive(Debug, Clone, PartialEq)]
pub enum HookInput {
    Response(Response),
    Exchange { request: Response, response: Response },
}

impl HookInput {
    /// The response, whichever form was passed.
    pub fn response(&self) -> &Response {
        match self {
            Self::Response(response) | Self::Exchange { response, .. } => response,
        }
    }

    /// The request, if one was passed.
    pub fn request(&self) -> Option<&Response> {
        match self {
            Self::Response(_) => None,
            Self::Exchange { request, .. } => Some(request),
        }
    }

    pub fn into_response(self) -> Response {
        match self {
            Self::Response(response) | Self::Exchange { response, .. } => response,
        }
    }
}

impl From<Response> for HookInput {
    fn from(response: Response) -> Self {
        Self::Response(response)
    }
}

impl From<serde_json::Value> for HookInput {
    fn from(response: serde_json::Value) -> Self {
        Self::Response(response.into())
    }
}

impl<Q: Into<Response>, R: Into<Response>> From<(Q, R)> for HookInput {
    fn from((request, response): (Q, R)) -> Self {
        Self::Exchange {
            request: request.into(),
            response: response.into(),
        }
    }
}

/// Events that can trigger hooks.
#[derive(Debug, Clone)]
pub enum HookEvent {
    /// Fired when a subagent is started.
    SubagentStart {
        parent_id: String,
        child_id: String,
        name: String,
    },

    /// Fired after a subagent's model call returns.
    ModelResponse { subagent: String, input: HookInput },

    /// Fired when a subagent completes.
    SubagentStop {
        parent_id: String,
        child_id: String,
        name: String,
        /// Error message if the subagent ended with an error.
        error: Option<String>,
    },
}

/// Actions a hook can return to control execution flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HookAction {
    /// Continue with normal execution.
    #[default]
    Continue,

    /// Stop the engine from proceeding, with a reason.
    Block(String),
}

/// Trait for implementing hooks.
#[async_trait]
pub trait Hook: Send + Sync {
    /// Called when an accepted event occurs.
    ///
    /// Return `Err` to signal a hook failure; it propagates out of
    /// [`HookRegistry::fire`].
    async fn on_event(&self, event: &HookEvent) -> Result<HookAction, anyhow::Error>;

    /// Optional: Filter which events this hook cares about.
    /// Default returns true for all events.
    fn accepts(&self, event: &HookEvent) -> bool {
        let _ = event;
        true
    }
}

/// Registry for managing and firing hooks.
pub struct HookRegistry {
    hooks: RwLock<Vec<Arc<dyn Hook>>>,
}

impl HookRegistry {
    /// Create a new empty hook registry.
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(Vec::new()),
        }
    }

    /// Register a hook.
    pub async fn register(&self, hook: impl Hook + 'static) {
        self.hooks.write().await.push(Arc::new(hook));
    }

    /// Register a hook wrapped in Arc.
    pub async fn register_arc(&self, hook: Arc<dyn Hook>) {
        self.hooks.write().await.push(hook);
    }

    /// Fire an event to all registered hooks, in registration order.
    ///
    /// Stops at the first hook that blocks or fails.
    pub async fn fire(&self, event: &HookEvent) -> Result<HookAction, anyhow::Error> {
        let hooks = self.hooks.read().await;
        for hook in hooks.iter() {
            if !hook.accepts(event) {
                continue;
            }
            if let HookAction::Block(reason) = hook.on_event(event).await? {
                warn!(%reason, "hook blocked event");
                return Ok(HookAction::Block(reason));
            }
        }
        Ok(HookAction::Continue)
    }

    /// Get the number of registered hooks.
    pub async fn len(&self) -> usize {
        self.hooks.read().await.len()
    }

    /// Check if the registry is empty.
    pub async fn is_empty(&self) -> bool {
        self.hooks.read().await.is_empty()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct LoggingHook {
        events: Arc<RwLock<Vec<String>>>,
    }

    impl LoggingHook {
        fn new() -> (Self, Arc<RwLock<Vec<String>>>) {
            let events = Arc::new(RwLock::new(Vec::new()));
            (
                Self {
                    events: events.clone(),
                },
                events,
            )
        }
    }

    #[async_trait]
    impl Hook for LoggingHook {
        async fn on_event(&self, event: &HookEvent) -> Result<HookAction, anyhow::Error> {
            let msg = match event {
                HookEvent::SubagentStart { name, .. } => format!("start:{name}"),
                HookEvent::ModelResponse { subagent, .. } => format!("response:{subagent}"),
                HookEvent::SubagentStop { name, .. } => format!("stop:{name}"),
            };
            self.events.write().await.push(msg);
            Ok(HookAction::Continue)
        }
    }

    struct FailingHook;

    #[async_trait]
    impl Hook for FailingHook {
        async fn on_event(&self, _event: &HookEvent) -> Result<HookAction, anyhow::Error> {
            anyhow::bail!("disk full")
        }
    }

    fn start(name: &str) -> HookEvent {
        HookEvent::SubagentStart {
            parent_id: "parent".into(),
            child_id: "child-1".into(),
            name: name.into(),
        }
    }

    #[tokio::test]
    async fn test_hook_registry_fire() {
        let registry = HookRegistry::new();
        let (hook, events) = LoggingHook::new();
        registry.register(hook).await;

        let action = registry.fire(&start("researcher")).await.unwrap();
        assert_eq!(action, HookAction::Continue);

        let event = HookEvent::ModelResponse {
            subagent: "researcher".into(),
            input: serde_json::json!({"content": "done"}).into(),
        };
        registry.fire(&event).await.unwrap();

        let logged = events.read().await;
        assert_eq!(*logged, vec!["start:researcher", "response:researcher"]);
    }

    /// Blocks starts of one named subagent.
    struct DenyHook {
        name: &'static str,
    }

    #[async_trait]
    impl Hook for DenyHook {
        fn accepts(&self, event: &HookEvent) -> bool {
            matches!(event, HookEvent::SubagentStart { .. })
        }

        async fn on_event(&self, event: &HookEvent) -> Result<HookAction, anyhow::Error> {
            match event {
                HookEvent::SubagentStart { name, .. } if name == self.name => {
                    Ok(HookAction::Block(format!("{name} may not run")))
                }
                _ => Ok(HookAction::Continue),
            }
        }
    }

    #[tokio::test]
    async fn test_block_stops_later_hooks() {
        let registry = HookRegistry::new();
        registry.register(DenyHook { name: "forbidden" }).await;
        let (hook, events) = LoggingHook::new();
        registry.register(hook).await;

        let action = registry.fire(&start("forbidden")).await.unwrap();
        assert_eq!(action, HookAction::Block("forbidden may not run".into()));
        assert!(events.read().await.is_empty());

        registry.fire(&start("allowed")).await.unwrap();
        assert_eq!(events.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_hook_error_propagates() {
        let registry = HookRegistry::new();
        registry.register(FailingHook).await;
        let err = registry.fire(&start("a")).await.unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    /// Counts failed stops only.
    struct StopCounter {
        failures: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Hook for StopCounter {
        fn accepts(&self, event: &HookEvent) -> bool {
            matches!(event, HookEvent::SubagentStop { error: Some(_), .. })
        }

        async fn on_event(&self, _event: &HookEvent) -> Result<HookAction, anyhow::Error> {
            self.failures.fetch_add(1, Ordering::SeqCst);
            Ok(HookAction::Continue)
        }
    }

    #[tokio::test]
    async fn test_accepts_filters_events() {
        let registry = HookRegistry::new();
        let failures = Arc::new(AtomicUsize::new(0));
        registry
            .register(StopCounter {
                failures: failures.clone(),
            })
            .await;

        let stop = |error: Option<&str>| HookEvent::SubagentStop {
            parent_id: "p".into(),
            child_id: "c".into(),
            name: "critic".into(),
            error: error.map(String::from),
        };
        registry.fire(&start("critic")).await.unwrap();
        registry.fire(&stop(None)).await.unwrap();
        registry.fire(&stop(Some("timeout"))).await.unwrap();

        assert_eq!(failures.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len().await, 1);
        assert!(!registry.is_empty().await);
    }

    #[test]
    fn test_hook_input_forms() {
        let single: HookInput = Response::from("answer").into();
        assert_eq!(single.response(), &Response::Text("answer".into()));
        assert!(single.request().is_none());

        let pair: HookInput = ("question", "answer").into();
        assert_eq!(pair.request(), Some(&Response::Text("question".into())));
        assert_eq!(pair.into_response(), Response::Text("answer".into()));
    }
}
