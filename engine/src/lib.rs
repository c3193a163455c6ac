//! Coresift triage engine
//!
//! Core selection, ordering, and rendering logic over an already-
//! reconstructed snapshot model: task selection, frame selection, variable
//! tree rendering, and expression bridging. Opening the frozen image,
//! symbolization, unwinding, and memory reads belong to an external
//! introspection backend consumed through the traits in [`backend`].

pub mod backend;
pub mod config;
pub mod expr;
pub mod render;
pub mod replay;
pub mod report;
pub mod selector;

pub use config::{Criteria, LoadOptions};
pub use report::run_triage;
