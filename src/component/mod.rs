// ABOUTME: Component module - resolves "namespace:identifier" references to
// ABOUTME: registered units and builds them into tools or bound callables.

mod factory;
mod registry;
mod signature;
mod unit;

pub use factory::*;
pub use registry::*;
pub use signature::*;
pub use unit::*;
