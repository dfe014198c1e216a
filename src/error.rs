//! Error types for project mutation and configuration.
//!
//! The scheduling engine itself never fails; only structural edits to a
//! [`Project`](crate::project::Project) and config parsing can.

use thiserror::Error;

/// Errors from project tree and resource pool operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// No task with this ID exists.
    #[error("task not found: {0}")]
    TaskNotFound(String),
    /// The requested parent does not exist.
    #[error("parent task not found: {0}")]
    ParentNotFound(String),
    /// A task with this ID already exists in the project.
    #[error("duplicate task id: {0}")]
    DuplicateTaskId(String),
    /// Reordering is only supported between root tasks.
    #[error("task is not a root task: {0}")]
    NotARoot(String),
    /// No resource with this ID exists in the pool or on the task.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),
    /// The pool already holds a resource with this name.
    #[error("resource already in pool: {0}")]
    DuplicateResource(String),
    /// The task already has a resource with this name assigned.
    #[error("task {task_id} already has resource {name} assigned")]
    ResourceAlreadyAssigned { task_id: String, name: String },
}

/// Errors from loading a scheduler configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid scheduler config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config file could not be read.
    #[error("failed to read scheduler config: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;
