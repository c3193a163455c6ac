//! Snapshot model type definitions

pub mod task;
pub mod variable;
