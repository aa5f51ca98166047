//! Domain models for the weather alert service

mod condition;
mod thresholds;

pub use condition::*;
pub use thresholds::*;
