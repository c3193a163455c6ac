//! Shared types for Coresift
//!
//! This crate contains the reconstructed snapshot data model consumed by the
//! selection and rendering engine: tasks, their stacks, variables, and the
//! blocking-reason taxonomy.

pub mod types;
pub mod wait;

// Re-export commonly used types
pub use types::{task::*, variable::*};
