//! Task and frame selection

pub mod frame;
pub mod task;
