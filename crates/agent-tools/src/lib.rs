//! Tool management and execution framework for weather-agent-rs
//!
//! This crate provides the seam between an agent runtime and the functions it
//! may call: a [`Tool`] trait, the [`ToolDefinition`] advertised to the model,
//! and a [`ToolRegistry`] that dispatches calls by name. A few ready-made
//! tools live in [`builtin`].

pub mod builtin;
pub mod definition;
pub mod error;
pub mod registry;
pub mod tool;

pub use definition::{ToolDefinition, schema};
pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::Tool;
