//! Introspection backend interface
//!
//! The engine is a pure client of an external introspection library that
//! opens the frozen image, maps addresses to symbols, unwinds stacks, and
//! reads raw memory. These traits are that boundary; [`crate::replay`]
//! provides the JSON replay implementation used by tests and development.

use std::path::Path;

use coresift_shared::types::task::{Frame, Task, TaskId};
use coresift_shared::types::variable::Variable;
use thiserror::Error;

use crate::config::LoadOptions;

/// Errors surfaced by a backend implementation.
///
/// `Open` and `ListTasks` are fatal for the whole invocation; the rest are
/// recoverable per task, per frame, or per variable (see [`crate::report`]).
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to open snapshot: {0}")]
    Open(String),

    #[error("failed to enumerate tasks: {0}")]
    ListTasks(String),

    #[error("failed to unwind stack for task {task}: {reason}")]
    Stacktrace { task: TaskId, reason: String },

    #[error("failed to list {what}: {reason}")]
    Scope { what: &'static str, reason: String },

    #[error("evaluation of `{expr}` failed: {reason}")]
    Eval { expr: String, reason: String },
}

/// An opened, immutable snapshot of a frozen process.
pub trait Snapshot {
    /// Enumerate every task that existed at capture time.
    fn list_tasks(&self) -> Result<Vec<Task>, BackendError>;

    /// Unwind one task's stack, innermost first, up to `max_frames` frames.
    fn stacktrace(&self, task: &Task, max_frames: usize) -> Result<Vec<Frame>, BackendError>;

    /// Build an evaluation context rooted at `frame` and its enclosing frames.
    fn frame_scope<'a>(&'a self, task: &Task, frame: &Frame) -> Box<dyn Scope + 'a>;
}

/// An evaluation context rooted at one frame.
pub trait Scope {
    /// Local variables visible in the scope's frame.
    fn locals(&self, options: &LoadOptions) -> Result<Vec<Variable>, BackendError>;

    /// Function arguments of the scope's frame.
    fn arguments(&self, options: &LoadOptions) -> Result<Vec<Variable>, BackendError>;

    /// Evaluate a path expression in this scope.
    fn evaluate(&self, expr: &str, options: &LoadOptions) -> Result<Variable, BackendError>;
}

/// Open a snapshot image / executable pair.
pub fn open_snapshot(image: &Path, executable: &Path) -> Result<Box<dyn Snapshot>, BackendError> {
    let snapshot = crate::replay::ReplaySnapshot::open(image, executable)?;
    Ok(Box::new(snapshot))
}
