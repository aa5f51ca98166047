//! Business logic services

pub mod alert;
pub mod analyzer;
pub mod monitor;
pub mod retry;

pub use alert::AlertDispatcher;
pub use analyzer::ForecastAnalyzer;
pub use monitor::{CycleReport, WeatherMonitor};
pub use retry::RetryPolicy;
