//! Shared types and models for the weather alert service
//!
//! This crate contains the hazard model produced by forecast analysis and
//! consumed by alert dispatch.

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
