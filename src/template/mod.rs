// ABOUTME: Template module - renders named parameters into strings and
// ABOUTME: recursively through nested mapping and sequence values.

mod params;
mod render;

pub use params::*;
pub use render::*;

#[cfg(test)]
mod render_test;
