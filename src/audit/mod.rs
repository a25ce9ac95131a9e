// ABOUTME: Audit module - extracts a subagent's final answer from whatever
// ABOUTME: shape the engine returns, truncates it, and appends it to JSONL.

mod extract;
mod middleware;
mod response;
mod truncate;
mod writer;

pub use extract::*;
pub use middleware::*;
pub use response::*;
pub use truncate::*;
pub use writer::*;
