//! Todo-file tools confined to one base directory
//!
//! Paths from the model are normalized lexically and must stay inside the
//! sandbox; anything else is refused before the filesystem is touched. Like
//! the weather tool, failures come back as `{"success": false}` payloads and
//! only malformed parameters are returned as `Err`.

use crate::{Result, Tool, ToolError, schema};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Directory used when none is configured, relative to the working directory
pub const DEFAULT_TODO_DIR: &str = "todos";

pub const WRITE_FILE: &str = "write_file";
pub const READ_FILE: &str = "read_file";
pub const DELETE_FILE: &str = "delete_file";
pub const LIST_TODOS: &str = "list_todos";

/// Extensions `list_todos` reports
const TODO_EXTENSIONS: [&str; 2] = ["md", "txt"];

/// Failure inside the sandbox
#[derive(Error, Debug)]
pub enum SandboxError {
    #[error("Access denied: Path \"{0}\" is outside the allowed directory")]
    OutsideBase(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

type SandboxResult<T> = std::result::Result<T, SandboxError>;

/// What a delete found at the requested path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Missing,
    NotAFile,
}

/// Base directory every file tool is confined to
#[derive(Debug, Clone)]
pub struct TodoSandbox {
    base_dir: PathBuf,
}

impl Default for TodoSandbox {
    fn default() -> Self {
        Self::new(DEFAULT_TODO_DIR)
    }
}

impl TodoSandbox {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Normalize `requested` to a path relative to the base directory
    ///
    /// `..` may only climb back out of directories the path itself entered;
    /// absolute paths are refused outright.
    pub fn relative_path(&self, requested: &str) -> SandboxResult<PathBuf> {
        let outside = || SandboxError::OutsideBase(requested.to_string());

        let mut normalized = PathBuf::new();
        for component in Path::new(requested).components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(outside());
                    }
                }
                Component::RootDir | Component::Prefix(_) => return Err(outside()),
            }
        }
        Ok(normalized)
    }

    async fn ensure_base_dir(&self) -> SandboxResult<()> {
        tokio::fs::create_dir_all(&self.base_dir).await?;
        Ok(())
    }

    /// Write `content`, creating parent directories as needed
    pub async fn write(&self, requested: &str, content: &str) -> SandboxResult<PathBuf> {
        let relative = self.relative_path(requested)?;
        self.ensure_base_dir().await?;

        let full_path = self.base_dir.join(&relative);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, content).await?;
        Ok(relative)
    }

    /// Read a file; `None` when it does not exist
    pub async fn read(&self, requested: &str) -> SandboxResult<(PathBuf, Option<String>)> {
        let relative = self.relative_path(requested)?;
        self.ensure_base_dir().await?;

        match tokio::fs::read_to_string(self.base_dir.join(&relative)).await {
            Ok(content) => Ok((relative, Some(content))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok((relative, None)),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a regular file, leaving directories alone
    pub async fn delete(&self, requested: &str) -> SandboxResult<(PathBuf, DeleteOutcome)> {
        let relative = self.relative_path(requested)?;
        self.ensure_base_dir().await?;

        let full_path = self.base_dir.join(&relative);
        let metadata = match tokio::fs::metadata(&full_path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok((relative, DeleteOutcome::Missing));
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Ok((relative, DeleteOutcome::NotAFile));
        }

        tokio::fs::remove_file(&full_path).await?;
        Ok((relative, DeleteOutcome::Deleted))
    }

    /// Names of `.md` and `.txt` entries directly under the base directory, sorted
    pub async fn list_todos(&self) -> SandboxResult<Vec<String>> {
        self.ensure_base_dir().await?;

        let mut entries = tokio::fs::read_dir(&self.base_dir).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_todo = Path::new(&name)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| TODO_EXTENSIONS.contains(&ext));
            if is_todo {
                files.push(name);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[derive(Debug, Deserialize)]
struct PathParams {
    path: String,
}

#[derive(Debug, Deserialize)]
struct WriteParams {
    path: String,
    content: String,
}

fn parse_params<T: DeserializeOwned>(tool: &str, params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| ToolError::invalid_parameters(tool, e))
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn log_failure(tool: &str, path: &str, err: &SandboxError) {
    match err {
        SandboxError::OutsideBase(_) => tracing::warn!(tool, path, "Refused path outside sandbox"),
        SandboxError::Io(e) => tracing::warn!(tool, path, error = %e, "File tool failed"),
    }
}

fn path_schema() -> Value {
    schema::string("Path relative to the todos folder, e.g. \"shopping.md\"")
}

/// Writes a file inside the sandbox
pub struct WriteFileTool {
    sandbox: TodoSandbox,
}

impl WriteFileTool {
    pub fn new(sandbox: TodoSandbox) -> Self {
        Self { sandbox }
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: WriteParams = parse_params(WRITE_FILE, params)?;

        Ok(match self.sandbox.write(&params.path, &params.content).await {
            Ok(relative) => json!({
                "success": true,
                "message": format!("File written successfully: {}", relative.display()),
                "path": display(&relative),
            }),
            Err(e) => {
                log_failure(WRITE_FILE, &params.path, &e);
                json!({
                    "success": false,
                    "message": format!("Error writing file: {e}"),
                    "path": params.path,
                })
            }
        })
    }

    fn name(&self) -> &'static str {
        WRITE_FILE
    }

    fn description(&self) -> &'static str {
        "Writes content to a file in the todos folder, creating it or replacing what is there."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "path": path_schema(),
                "content": schema::string("Full text to store in the file")
            }),
            &["path", "content"],
        )
    }
}

/// Reads a file inside the sandbox
pub struct ReadFileTool {
    sandbox: TodoSandbox,
}

impl ReadFileTool {
    pub fn new(sandbox: TodoSandbox) -> Self {
        Self { sandbox }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: PathParams = parse_params(READ_FILE, params)?;

        Ok(match self.sandbox.read(&params.path).await {
            Ok((relative, Some(content))) => json!({
                "success": true,
                "content": content,
                "message": format!("File read successfully: {}", relative.display()),
                "path": display(&relative),
            }),
            Ok((relative, None)) => json!({
                "success": false,
                "message": format!("File not found: {}", relative.display()),
                "path": display(&relative),
            }),
            Err(e) => {
                log_failure(READ_FILE, &params.path, &e);
                json!({
                    "success": false,
                    "message": format!("Error reading file: {e}"),
                    "path": params.path,
                })
            }
        })
    }

    fn name(&self) -> &'static str {
        READ_FILE
    }

    fn description(&self) -> &'static str {
        "Reads a file from the todos folder."
    }

    fn input_schema(&self) -> Value {
        schema::object(json!({ "path": path_schema() }), &["path"])
    }
}

/// Deletes a file inside the sandbox
pub struct DeleteFileTool {
    sandbox: TodoSandbox,
}

impl DeleteFileTool {
    pub fn new(sandbox: TodoSandbox) -> Self {
        Self { sandbox }
    }
}

#[async_trait]
impl Tool for DeleteFileTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: PathParams = parse_params(DELETE_FILE, params)?;

        Ok(match self.sandbox.delete(&params.path).await {
            Ok((relative, outcome)) => {
                let (success, message) = match outcome {
                    DeleteOutcome::Deleted => (true, "File deleted successfully"),
                    DeleteOutcome::Missing => (false, "File not found"),
                    DeleteOutcome::NotAFile => (false, "Path is not a file"),
                };
                json!({
                    "success": success,
                    "message": format!("{message}: {}", relative.display()),
                    "path": display(&relative),
                })
            }
            Err(e) => {
                log_failure(DELETE_FILE, &params.path, &e);
                json!({
                    "success": false,
                    "message": format!("Error deleting file: {e}"),
                    "path": params.path,
                })
            }
        })
    }

    fn name(&self) -> &'static str {
        DELETE_FILE
    }

    fn description(&self) -> &'static str {
        "Deletes a file from the todos folder. Directories are never removed."
    }

    fn input_schema(&self) -> Value {
        schema::object(json!({ "path": path_schema() }), &["path"])
    }
}

/// Lists todo files in the sandbox
pub struct ListTodosTool {
    sandbox: TodoSandbox,
}

impl ListTodosTool {
    pub fn new(sandbox: TodoSandbox) -> Self {
        Self { sandbox }
    }
}

#[async_trait]
impl Tool for ListTodosTool {
    async fn execute(&self, _params: Value) -> Result<Value> {
        Ok(match self.sandbox.list_todos().await {
            Ok(files) => json!({
                "success": true,
                "message": format!("Found {} todo file(s)", files.len()),
                "files": files,
            }),
            Err(e) => {
                log_failure(LIST_TODOS, "", &e);
                json!({
                    "success": false,
                    "message": format!("Error listing todos: {e}"),
                })
            }
        })
    }

    fn name(&self) -> &'static str {
        LIST_TODOS
    }

    fn description(&self) -> &'static str {
        "Lists the .md and .txt files in the todos folder."
    }

    fn input_schema(&self) -> Value {
        schema::object(json!({}), &[])
    }
}
