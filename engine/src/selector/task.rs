//! Task selection and ordering
//!
//! Orders the population by time spent blocked (ascending blocking-start
//! timestamp) and applies the identity, stack-content, and result-count
//! filters, in that order.

use coresift_shared::types::task::{Frame, Task};
use tracing::warn;

use crate::backend::{BackendError, Snapshot};
use crate::config::Criteria;

/// Stack unwinding is capped per task; deeper stacks are truncated.
pub const MAX_STACK_FRAMES: usize = 40;

/// One selected task together with its unwind result.
///
/// A failed unwind keeps the task in the selection (its header is still
/// useful) unless a stack-content filter needed frames to match against.
pub struct SelectedTask {
    pub task: Task,
    pub stack: Result<Vec<Frame>, BackendError>,
}

/// Filter and order the task population.
///
/// The sort is stable on the blocking-start timestamp alone, so tasks with
/// equal timestamps keep their backend enumeration order.
pub fn select_tasks(
    snapshot: &dyn Snapshot,
    mut tasks: Vec<Task>,
    criteria: &Criteria,
) -> Vec<SelectedTask> {
    tasks.sort_by_key(|t| t.wait_since);

    let mut selected = Vec::new();
    for task in tasks {
        if criteria.id > 0 && task.id != criteria.id {
            continue;
        }

        let stack = snapshot.stacktrace(&task, MAX_STACK_FRAMES);
        if let Err(err) = &stack {
            warn!("task {}: {}", task.id, err);
        }

        if !criteria.stack_filter.is_empty() {
            // An unwindable stack is required to match; a failed unwind has
            // no frame containing the substring.
            let Ok(frames) = &stack else { continue };
            let matched = frames
                .iter()
                .any(|f| f.location.function.contains(&criteria.stack_filter));
            if !matched {
                continue;
            }
        }

        selected.push(SelectedTask { task, stack });
        if criteria.limit > 0 && selected.len() as i64 >= criteria.limit {
            break;
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{FrameModel, ReplaySnapshot, SnapshotModel, TaskModel};
    use coresift_shared::types::task::Location;

    fn task(id: i64, wait_since: u64) -> Task {
        Task {
            id,
            wait_reason: 0,
            wait_since,
            labels: Default::default(),
            created_at: Location::default(),
        }
    }

    fn model(id: i64, wait_since: u64, functions: &[&str]) -> TaskModel {
        TaskModel {
            task: task(id, wait_since),
            stack: functions
                .iter()
                .map(|f| FrameModel {
                    location: Location::new("main.go", 1, f),
                    arguments: vec![],
                    locals: vec![],
                })
                .collect(),
            stack_error: None,
        }
    }

    fn snapshot(tasks: Vec<TaskModel>) -> ReplaySnapshot {
        ReplaySnapshot::new(SnapshotModel { tasks })
    }

    #[test]
    fn test_ordering_ascending_by_wait_since() {
        let snapshot = snapshot(vec![
            model(1, 10, &["main.a"]),
            model(2, 5, &["main.b"]),
            model(3, 20, &["main.c"]),
        ]);
        let tasks = snapshot.list_tasks().unwrap();

        let selected = select_tasks(&snapshot, tasks, &Criteria::default());
        let order: Vec<_> = selected.iter().map(|s| s.task.wait_since).collect();
        assert_eq!(order, [5, 10, 20]);
    }

    #[test]
    fn test_identity_filter_keeps_exactly_one() {
        let snapshot = snapshot(vec![model(1, 10, &[]), model(2, 5, &[])]);
        let tasks = snapshot.list_tasks().unwrap();

        let criteria = Criteria {
            id: 2,
            ..Criteria::default()
        };
        let selected = select_tasks(&snapshot, tasks, &criteria);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].task.id, 2);
    }

    #[test]
    fn test_stack_filter_requires_a_matching_frame() {
        let snapshot = snapshot(vec![
            model(1, 1, &["runtime.gopark", "main.worker"]),
            model(2, 2, &["runtime.gopark"]),
        ]);
        let tasks = snapshot.list_tasks().unwrap();

        let criteria = Criteria {
            stack_filter: "main.".to_string(),
            ..Criteria::default()
        };
        let selected = select_tasks(&snapshot, tasks, &criteria);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].task.id, 1);
    }

    #[test]
    fn test_limit_counts_output_tasks() {
        let snapshot = snapshot(vec![
            model(1, 3, &[]),
            model(2, 1, &[]),
            model(3, 2, &[]),
        ]);
        let tasks = snapshot.list_tasks().unwrap();

        let criteria = Criteria {
            limit: 2,
            ..Criteria::default()
        };
        let selected = select_tasks(&snapshot, tasks, &criteria);
        let ids: Vec<_> = selected.iter().map(|s| s.task.id).collect();
        assert_eq!(ids, [2, 3]);
    }

    #[test]
    fn test_non_positive_limit_is_unlimited() {
        let snapshot = snapshot(vec![model(1, 1, &[]), model(2, 2, &[])]);
        let tasks = snapshot.list_tasks().unwrap();

        let criteria = Criteria {
            limit: -1,
            ..Criteria::default()
        };
        assert_eq!(select_tasks(&snapshot, tasks, &criteria).len(), 2);
    }

    #[test]
    fn test_unwind_failure_keeps_task_without_stack_filter() {
        let mut broken = model(1, 1, &[]);
        broken.stack_error = Some("truncated image".to_string());
        let snapshot = snapshot(vec![broken, model(2, 2, &["main.b"])]);
        let tasks = snapshot.list_tasks().unwrap();

        let selected = select_tasks(&snapshot, tasks, &Criteria::default());
        assert_eq!(selected.len(), 2);
        assert!(selected[0].stack.is_err());
    }

    #[test]
    fn test_unwind_failure_drops_task_under_stack_filter() {
        let mut broken = model(1, 1, &["main.a"]);
        broken.stack_error = Some("truncated image".to_string());
        let snapshot = snapshot(vec![broken, model(2, 2, &["main.b"])]);
        let tasks = snapshot.list_tasks().unwrap();

        let criteria = Criteria {
            stack_filter: "main.".to_string(),
            ..Criteria::default()
        };
        let selected = select_tasks(&snapshot, tasks, &criteria);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].task.id, 2);
    }
}
