//! Configuration management for the weather alert service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with WEATHER_ALERT__ prefix
//! 4. The service's documented variables (OPENWEATHERMAP_API_KEY, LOCATION,
//!    PUSHOVER_USER_KEY, PUSHOVER_APP_TOKEN, NOTIFICATION_THRESHOLD)

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{Severity, ThresholdConfig};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Log output format: "pretty" or "json"
    pub log_format: String,

    /// Log file written alongside stderr output; empty disables it
    pub log_file: String,

    /// Timeout applied to every outbound HTTP request, in seconds
    pub http_timeout_secs: u64,

    /// Forecast API configuration
    pub weather: WeatherConfig,

    /// Pushover configuration
    pub pushover: PushoverConfig,

    /// Alerting configuration
    pub alerts: AlertConfig,

    /// Check schedule
    pub schedule: ScheduleConfig,

    /// Forecast fetch retry policy
    pub retry: RetryConfig,

    /// Hazard thresholds
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: String,

    /// Location query, e.g. "London,UK"
    pub location: String,

    /// OpenWeatherMap API base URL
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PushoverConfig {
    /// Pushover user key
    pub user_key: String,

    /// Pushover application token
    pub app_token: String,

    /// Pushover API base URL
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertConfig {
    /// Minimum severity that triggers a notification
    pub notification_threshold: String,

    /// Notification title; the dispatcher's default when unset
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleConfig {
    /// Seconds between forecast checks
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_backoff_secs: u64,
    pub max_backoff_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("WEATHER_ALERT_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::builder(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WEATHER_ALERT__ prefix)
            .add_source(
                Environment::with_prefix("WEATHER_ALERT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("weather.api_key", env_var("OPENWEATHERMAP_API_KEY"))?
            .set_override_option("weather.location", env_var("LOCATION"))?
            .set_override_option("pushover.user_key", env_var("PUSHOVER_USER_KEY"))?
            .set_override_option("pushover.app_token", env_var("PUSHOVER_APP_TOKEN"))?
            .set_override_option(
                "alerts.notification_threshold",
                env_var("NOTIFICATION_THRESHOLD"),
            )?
            .build()?;

        config.try_deserialize()
    }

    /// Configuration built from defaults only
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder("development")?.build()?.try_deserialize()
    }

    fn builder(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("log_format", "pretty")?
            .set_default("log_file", "weather_alert.log")?
            .set_default("http_timeout_secs", 10)?
            .set_default("weather.api_key", "")?
            .set_default("weather.location", "London,UK")?
            .set_default("weather.base_url", "https://api.openweathermap.org/data/2.5")?
            .set_default("pushover.user_key", "")?
            .set_default("pushover.app_token", "")?
            .set_default("pushover.base_url", "https://api.pushover.net")?
            .set_default("alerts.notification_threshold", Severity::default().label())?
            .set_default("schedule.interval_secs", 3600)?
            .set_default("retry.max_attempts", 3)?
            .set_default("retry.initial_backoff_secs", 4)?
            .set_default("retry.max_backoff_secs", 10)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.schedule.interval_secs)
    }

    pub fn notification_threshold(&self) -> Severity {
        Severity::parse(&self.alerts.notification_threshold)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
