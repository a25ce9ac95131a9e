// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use cadre::prelude::*;` to get started quickly.

pub use crate::agent::{
    Assembler, ComponentRef, SpecDocument, SubagentDescriptor, SubagentSpec, describe_subagents,
};
pub use crate::audit::{
    AuditMiddleware, AuditRecord, AuditWriter, DEFAULT_MAX_LOG, RecordKind, Response, Truncator,
    extract_final_text,
};
pub use crate::component::{
    BoundCallable, ComponentRegistry, ConstructedComponent, Kwargs, Signature, Unit,
};
pub use crate::error::{AssemblyError, AuditError, CadreError, RenderError, SpecError};
pub use crate::hook::{Hook, HookAction, HookEvent, HookInput, HookRegistry};
pub use crate::message::{ContentBlock, Message, Role};
pub use crate::template::{RenderParams, render, render_str};
pub use crate::tool::{Tool, ToolBuilder, ToolResult};
pub use crate::tools::VenueLookupTool;
