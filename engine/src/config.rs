//! Selection criteria and evaluation configuration

use coresift_shared::types::task::TaskId;

/// Immutable per-invocation selection criteria.
///
/// Zero means "no filter" for the numeric fields and the empty string means
/// "no filter" for the substring fields. All substring matches are literal
/// and case-sensitive.
#[derive(Debug, Clone)]
pub struct Criteria {
    /// Keep only the task with this identity, when > 0
    pub id: TaskId,

    /// Keep only tasks with at least one frame whose function name contains this
    pub stack_filter: String,

    /// Within a task, keep only frames whose function name contains this
    pub frame_filter: String,

    /// Keep only the frame at this ordinal, when > 0
    pub frame: usize,

    /// Render only variables whose name contains this
    pub variable: String,

    /// Path expression evaluated as `<name>.<expr>` against each matched variable
    pub expr: Option<String>,

    /// Remaining-depth budget for variable trees; values <= 0 render nothing
    pub depth: i64,

    /// Keep at most this many tasks, when > 0
    pub limit: i64,

    /// Whether to resolve and render variables at all
    pub show_variables: bool,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            id: 0,
            stack_filter: String::new(),
            frame_filter: String::new(),
            frame: 0,
            variable: String::new(),
            expr: None,
            depth: 5,
            limit: 0,
            show_variables: false,
        }
    }
}

impl Criteria {
    /// Backend resolution bounds matched to this invocation's render depth.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::for_depth(self.depth)
    }
}

/// Backend-side resolution bounds, independent of the renderer's own depth
/// budget.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Follow indirections when resolving values
    pub follow_pointers: bool,

    /// Maximum value-resolution recursion depth
    pub max_recursion: i64,

    /// Maximum resolved string length, in characters
    pub max_string_len: usize,

    /// Maximum struct fields resolved per level
    pub max_struct_fields: usize,

    /// Maximum collection elements resolved per level
    pub max_array_values: usize,
}

impl LoadOptions {
    /// Defaults matched to a render depth: the backend resolves one level
    /// past what the renderer will print.
    pub fn for_depth(depth: i64) -> Self {
        Self {
            follow_pointers: true,
            max_recursion: depth + 1,
            max_string_len: 10_000,
            max_struct_fields: 100,
            max_array_values: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_has_no_filters() {
        let criteria = Criteria::default();
        assert_eq!(criteria.id, 0);
        assert_eq!(criteria.frame, 0);
        assert_eq!(criteria.limit, 0);
        assert!(criteria.stack_filter.is_empty());
        assert_eq!(criteria.depth, 5);
    }

    #[test]
    fn test_load_options_track_render_depth() {
        let options = LoadOptions::for_depth(5);
        assert_eq!(options.max_recursion, 6);
        assert!(options.follow_pointers);
        assert_eq!(options.max_string_len, 10_000);
    }
}
