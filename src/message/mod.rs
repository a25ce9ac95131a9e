// ABOUTME: Message module - conversation message types as produced by the
// ABOUTME: orchestration engine, recognized by the audit text extractor.

mod types;

pub use types::*;
