// ABOUTME: Root module for cadre - declarative subagent assembly and
// ABOUTME: final-answer audit logging. Re-exports the public modules.

pub mod agent;
pub mod audit;
pub mod component;
pub mod error;
pub mod hook;
pub mod message;
pub mod prelude;
pub mod template;
pub mod tool;
pub mod tools;

pub use error::CadreError;
