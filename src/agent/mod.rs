// ABOUTME: Subagent assembly module - specification documents, the assembler,
// ABOUTME: and the descriptors it produces.

mod assembler;
mod descriptor;
mod document;

pub use assembler::Assembler;
pub use descriptor::{SubagentDescriptor, describe_subagents};
pub use document::{ComponentRef, SpecDocument, SubagentSpec};

#[cfg(test)]
mod assembler_test;
