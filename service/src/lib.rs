//! Weather Alert Service
//!
//! Periodically fetches a multi-day forecast for one location, turns each
//! forecast entry into severity-ranked hazard conditions and pushes a
//! summary notification when any condition reaches the configured severity.

pub mod config;
pub mod error;
pub mod external;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
