//! Tools that ship with the framework
//!
//! - [`WhereAmITool`]: fixed-answer greeting tool
//! - [`files`]: todo-file tools sandboxed to one directory

pub mod files;
pub mod where_am_i;

pub use files::{
    DEFAULT_TODO_DIR, DeleteFileTool, ListTodosTool, ReadFileTool, SandboxError, TodoSandbox,
    WriteFileTool,
};
pub use where_am_i::WhereAmITool;

use crate::ToolRegistry;
use std::sync::Arc;

/// Register every built-in tool, confining the file tools to `sandbox`
pub fn register_builtin_tools(registry: &ToolRegistry, sandbox: &TodoSandbox) {
    registry.register(Arc::new(WhereAmITool));
    registry.register(Arc::new(WriteFileTool::new(sandbox.clone())));
    registry.register(Arc::new(ReadFileTool::new(sandbox.clone())));
    registry.register(Arc::new(DeleteFileTool::new(sandbox.clone())));
    registry.register(Arc::new(ListTodosTool::new(sandbox.clone())));
}
