//! Error types for agent-tools

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type for tool dispatch and execution
#[derive(Error, Debug)]
pub enum ToolError {
    /// No tool registered under the requested name
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Parameters did not match the tool's input schema
    #[error("Invalid parameters for {tool}: {reason}")]
    InvalidParameters {
        tool: String,
        reason: String,
    },

    /// The tool ran but could not produce a result
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ToolError {
    /// Build an `InvalidParameters` error for the named tool
    pub fn invalid_parameters(tool: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidParameters {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }
}
