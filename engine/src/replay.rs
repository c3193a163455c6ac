//! JSON replay backend
//!
//! Implements the backend interface over an already-reconstructed snapshot
//! model serialized to JSON. Parsing real core images belongs to an external
//! introspection library; the replay backend stands in for it in tests and
//! during development, and honors the same resolution bounds a real backend
//! would.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use coresift_shared::types::task::{Frame, Location, Task};
use coresift_shared::types::variable::{ValueKind, Variable};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{BackendError, Scope, Snapshot};
use crate::config::LoadOptions;

/// One frame of a replayed stack, with its reachable variables already
/// resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameModel {
    pub location: Location,

    #[serde(default)]
    pub arguments: Vec<Variable>,

    #[serde(default)]
    pub locals: Vec<Variable>,
}

/// One replayed task: the task header plus either a stack or a recorded
/// unwind failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskModel {
    #[serde(flatten)]
    pub task: Task,

    #[serde(default)]
    pub stack: Vec<FrameModel>,

    /// Simulated unwind failure, for exercising per-task recovery
    #[serde(default)]
    pub stack_error: Option<String>,
}

/// A whole reconstructed snapshot, as persisted to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotModel {
    pub tasks: Vec<TaskModel>,
}

/// Snapshot implementation backed by an in-memory [`SnapshotModel`].
pub struct ReplaySnapshot {
    model: SnapshotModel,
}

impl ReplaySnapshot {
    pub fn new(model: SnapshotModel) -> Self {
        Self { model }
    }

    /// Load a snapshot model from `image`. The executable is only checked
    /// for existence: the replay model already embeds resolved symbols.
    pub fn open(image: &Path, executable: &Path) -> Result<Self, BackendError> {
        if !executable.exists() {
            return Err(BackendError::Open(format!(
                "executable not found: {}",
                executable.display()
            )));
        }
        let file = File::open(image)
            .map_err(|e| BackendError::Open(format!("{}: {}", image.display(), e)))?;
        let model: SnapshotModel = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| BackendError::Open(format!("{}: {}", image.display(), e)))?;
        debug!("loaded replay snapshot with {} tasks", model.tasks.len());
        Ok(Self::new(model))
    }

    fn find(&self, id: i64) -> Option<&TaskModel> {
        self.model.tasks.iter().find(|t| t.task.id == id)
    }
}

impl Snapshot for ReplaySnapshot {
    fn list_tasks(&self) -> Result<Vec<Task>, BackendError> {
        Ok(self.model.tasks.iter().map(|t| t.task.clone()).collect())
    }

    fn stacktrace(&self, task: &Task, max_frames: usize) -> Result<Vec<Frame>, BackendError> {
        let model = self.find(task.id).ok_or_else(|| BackendError::Stacktrace {
            task: task.id,
            reason: "task not present in snapshot".to_string(),
        })?;
        if let Some(reason) = &model.stack_error {
            return Err(BackendError::Stacktrace {
                task: task.id,
                reason: reason.clone(),
            });
        }
        Ok(model
            .stack
            .iter()
            .take(max_frames)
            .enumerate()
            .map(|(ordinal, frame)| Frame {
                location: frame.location.clone(),
                ordinal,
            })
            .collect())
    }

    fn frame_scope<'a>(&'a self, task: &Task, frame: &Frame) -> Box<dyn Scope + 'a> {
        let model = self
            .find(task.id)
            .and_then(|t| t.stack.get(frame.ordinal));
        Box::new(ReplayScope { frame: model })
    }
}

struct ReplayScope<'a> {
    frame: Option<&'a FrameModel>,
}

impl ReplayScope<'_> {
    fn frame(&self, what: &'static str) -> Result<&FrameModel, BackendError> {
        self.frame.ok_or(BackendError::Scope {
            what,
            reason: "frame not present in snapshot".to_string(),
        })
    }
}

impl Scope for ReplayScope<'_> {
    fn locals(&self, options: &LoadOptions) -> Result<Vec<Variable>, BackendError> {
        let frame = self.frame("locals")?;
        Ok(frame
            .locals
            .iter()
            .map(|v| clamp(v, options, options.max_recursion))
            .collect())
    }

    fn arguments(&self, options: &LoadOptions) -> Result<Vec<Variable>, BackendError> {
        let frame = self.frame("arguments")?;
        Ok(frame
            .arguments
            .iter()
            .map(|v| clamp(v, options, options.max_recursion))
            .collect())
    }

    fn evaluate(&self, expr: &str, options: &LoadOptions) -> Result<Variable, BackendError> {
        let frame = self.frame.ok_or_else(|| BackendError::Eval {
            expr: expr.to_string(),
            reason: "frame not present in snapshot".to_string(),
        })?;
        let mut parts = expr.split('.');
        let root = parts.next().unwrap_or_default();
        let mut current = frame
            .arguments
            .iter()
            .chain(frame.locals.iter())
            .find(|v| v.name == root)
            .ok_or_else(|| BackendError::Eval {
                expr: expr.to_string(),
                reason: format!("no variable named `{root}` in scope"),
            })?;
        for part in parts {
            current = current
                .children
                .iter()
                .find(|c| c.name == part)
                .ok_or_else(|| BackendError::Eval {
                    expr: expr.to_string(),
                    reason: format!("`{part}` is not a child of `{}`", current.name),
                })?;
        }
        Ok(clamp(current, options, options.max_recursion))
    }
}

/// Apply the backend-side resolution bounds to a stored variable tree.
fn clamp(var: &Variable, options: &LoadOptions, budget: i64) -> Variable {
    let value = var
        .value
        .as_ref()
        .map(|v| v.chars().take(options.max_string_len).collect());

    let children = if budget <= 0
        || (var.kind == ValueKind::Pointer && !options.follow_pointers)
    {
        Vec::new()
    } else {
        let cap = match var.kind {
            ValueKind::Struct => options.max_struct_fields,
            _ => options.max_array_values,
        };
        var.children
            .iter()
            .take(cap)
            .map(|c| clamp(c, options, budget - 1))
            .collect()
    };

    Variable {
        name: var.name.clone(),
        type_name: var.type_name.clone(),
        kind: var.kind,
        value,
        children,
    }
}
