//! Expression bridge
//!
//! Optionally redirects rendering from a variable to the result of
//! evaluating a path expression rooted at it. Evaluation happens in the
//! variable's owning frame scope; a failure is local to that one variable
//! and never aborts the invocation.

use coresift_shared::types::variable::Variable;

use crate::backend::{BackendError, Scope};
use crate::config::LoadOptions;

/// Evaluate `<variable-name>.<expr>` in `scope`, producing the variable to
/// render in place of `var`.
pub fn evaluate_rooted(
    scope: &dyn Scope,
    var: &Variable,
    expr: &str,
    options: &LoadOptions,
) -> Result<Variable, BackendError> {
    scope.evaluate(&format!("{}.{}", var.name, expr), options)
}
