//! Frame selection
//!
//! Restricts which frames of a selected task are inspected. The ordinal and
//! substring filters compose with AND semantics; relative frame order is
//! preserved.

use coresift_shared::types::task::Frame;

use crate::config::Criteria;

/// Apply the ordinal and frame-content filters to a task's stack.
pub fn select_frames<'a>(frames: &'a [Frame], criteria: &Criteria) -> Vec<&'a Frame> {
    frames
        .iter()
        .filter(|frame| {
            if criteria.frame > 0 && frame.ordinal != criteria.frame {
                return false;
            }
            if !criteria.frame_filter.is_empty()
                && !frame.location.function.contains(&criteria.frame_filter)
            {
                return false;
            }
            true
        })
        .collect()
}
