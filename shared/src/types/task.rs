//! Task and stack model
//!
//! These types represent one lightweight scheduled task reconstructed from a
//! frozen process image, together with the activation records of its call
//! stack. They are built once by the introspection backend per snapshot load
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Task identity assigned by the inspected runtime
pub type TaskId = i64;

/// Monotonic runtime timestamp in nanoseconds
pub type Timestamp = u64;

/// A source location: file, line, and qualified function name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl Location {
    pub fn new(file: &str, line: u32, function: &str) -> Self {
        Self {
            file: file.to_string(),
            line,
            function: function.to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.file, self.line, self.function)
    }
}

/// One task at snapshot time.
///
/// The stack is not stored here: unwinding is a backend call that can fail
/// per task, so it is requested on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Runtime-assigned identity, unique within one snapshot
    pub id: TaskId,

    /// Index into the blocking-reason table (see [`crate::wait`])
    pub wait_reason: u64,

    /// Runtime timestamp at which blocking began
    pub wait_since: Timestamp,

    /// Free-form labels; insertion order is irrelevant
    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// Where the task was created
    pub created_at: Location,
}

/// One activation record in a task's stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// Call-site location
    pub location: Location,

    /// Position in the stack, 0 = innermost; stable for the snapshot's lifetime
    pub ordinal: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = Location::new("main.go", 42, "main.worker");
        assert_eq!(loc.to_string(), "main.go:42 main.worker");
    }

    #[test]
    fn test_labels_ordered_by_key() {
        let mut task = Task {
            id: 1,
            wait_reason: 0,
            wait_since: 0,
            labels: BTreeMap::new(),
            created_at: Location::default(),
        };
        task.labels.insert("zone".to_string(), "us-east".to_string());
        task.labels.insert("app".to_string(), "frontend".to_string());

        let keys: Vec<_> = task.labels.keys().collect();
        assert_eq!(keys, ["app", "zone"]);
    }

    #[test]
    fn test_task_deserializes_without_labels() {
        let task: Task = serde_json::from_str(
            r#"{
                "id": 7,
                "wait_reason": 14,
                "wait_since": 1000,
                "created_at": {"file": "main.go", "line": 10, "function": "main.main"}
            }"#,
        )
        .unwrap();
        assert_eq!(task.id, 7);
        assert!(task.labels.is_empty());
    }
}
