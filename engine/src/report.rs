//! Triage report pipeline
//!
//! Drives one whole invocation: enumerate the population, order and filter
//! it, then for each selected task print the header, the retained frames,
//! and the variable trees. Recoverable failures surface as inline
//! diagnostics interleaved with normal output; fatal failures propagate to
//! the caller.

use std::io::Write;

use anyhow::{Context, Result};
use coresift_shared::types::task::{Frame, Task};
use coresift_shared::wait::wait_reason_label;
use tracing::warn;

use crate::backend::Snapshot;
use crate::config::{Criteria, LoadOptions};
use crate::expr;
use crate::render::render_variable;
use crate::selector;
use crate::selector::task::SelectedTask;

/// One indent unit of structural nesting in variable trees.
const INDENT: &str = "  ";

/// Run the full selection-render pipeline against an opened snapshot.
pub fn run_triage(snapshot: &dyn Snapshot, criteria: &Criteria, out: &mut impl Write) -> Result<()> {
    let tasks = snapshot.list_tasks().context("failed to enumerate tasks")?;
    writeln!(out, "{}", tasks.len())?;

    // Blocked durations are shown relative to the latest blocking-start
    // timestamp observed across the whole population.
    let latest = tasks.iter().map(|t| t.wait_since).max().unwrap_or(0);

    let options = criteria.load_options();
    for selected in selector::task::select_tasks(snapshot, tasks, criteria) {
        report_task(snapshot, &selected, criteria, &options, latest, out)?;
        writeln!(out)?;
    }
    Ok(())
}

fn report_task(
    snapshot: &dyn Snapshot,
    selected: &SelectedTask,
    criteria: &Criteria,
    options: &LoadOptions,
    latest: u64,
    out: &mut impl Write,
) -> Result<()> {
    let task = &selected.task;
    let blocked_secs = latest.saturating_sub(task.wait_since) / 1_000_000_000;
    writeln!(
        out,
        "task {} {} {}s",
        task.id,
        wait_reason_label(task.wait_reason),
        blocked_secs
    )?;
    writeln!(out, "--> created {}", task.created_at)?;
    for (key, value) in &task.labels {
        writeln!(out, "     {} {}", key, value)?;
    }

    let frames = match &selected.stack {
        Ok(frames) => frames,
        Err(err) => {
            // Header information is still worth keeping; only the frame
            // loop is lost.
            writeln!(out, "  ! {}", err)?;
            return Ok(());
        }
    };

    for frame in selector::frame::select_frames(frames, criteria) {
        writeln!(out, "{} {}", frame.ordinal, frame.location)?;
        if criteria.show_variables {
            report_frame_variables(snapshot, task, frame, criteria, options, out)?;
        }
    }
    Ok(())
}

fn report_frame_variables(
    snapshot: &dyn Snapshot,
    task: &Task,
    frame: &Frame,
    criteria: &Criteria,
    options: &LoadOptions,
    out: &mut impl Write,
) -> Result<()> {
    let scope = snapshot.frame_scope(task, frame);

    // Arguments and locals are two independently ordered sequences with
    // their own tags, not a merged mapping.
    let arguments = match scope.arguments(options) {
        Ok(vars) => vars,
        Err(err) => {
            warn!("task {} frame {}: {}", task.id, frame.ordinal, err);
            writeln!(out, "  ! {}", err)?;
            return Ok(());
        }
    };
    let locals = match scope.locals(options) {
        Ok(vars) => vars,
        Err(err) => {
            warn!("task {} frame {}: {}", task.id, frame.ordinal, err);
            writeln!(out, "  ! {}", err)?;
            return Ok(());
        }
    };

    for (tag, vars) in [("A", &arguments), ("L", &locals)] {
        let prefix = format!(" {tag}");
        for var in vars {
            if !criteria.variable.is_empty() && !var.name.contains(&criteria.variable) {
                continue;
            }
            match &criteria.expr {
                Some(path) => match expr::evaluate_rooted(scope.as_ref(), var, path, options) {
                    Ok(result) => write_tree(out, &result, &prefix, criteria.depth)?,
                    Err(err) => {
                        // Skip this variable only; the rest of the frame
                        // still renders.
                        warn!("task {} frame {}: {}", task.id, frame.ordinal, err);
                        writeln!(out, "  ! {}", err)?;
                    }
                },
                None => write_tree(out, var, &prefix, criteria.depth)?,
            }
        }
    }
    Ok(())
}

fn write_tree(
    out: &mut impl Write,
    var: &coresift_shared::types::variable::Variable,
    prefix: &str,
    depth: i64,
) -> Result<()> {
    let mut text = String::new();
    render_variable(&mut text, var, prefix, INDENT, depth)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}
