// ABOUTME: Tool module - the invoke contract shared by every constructed
// ABOUTME: component, plus the two-phase builder contract for tool units.

mod result;
mod traits;

pub use result::*;
pub use traits::*;
