//! Weather Alert Service - scheduler binary
//!
//! Checks the forecast once at startup and then on a fixed interval until
//! interrupted.

use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_alert_service::{
    external::{OpenWeatherClient, PushoverClient},
    services::{AlertDispatcher, ForecastAnalyzer, WeatherMonitor},
    Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    init_tracing(&config.log_format, &config.log_file)?;

    tracing::info!("Starting Weather Alert System");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        "Monitoring {} (notification threshold: {})",
        config.weather.location,
        config.notification_threshold()
    );

    if config.weather.api_key.is_empty() {
        tracing::warn!("OPENWEATHERMAP_API_KEY is not set; forecast requests will be rejected");
    }
    if config.pushover.user_key.is_empty() || config.pushover.app_token.is_empty() {
        tracing::warn!("Pushover credentials are not set; notifications will be rejected");
    }

    let source = Arc::new(OpenWeatherClient::from_config(&config));
    let transport = Arc::new(PushoverClient::from_config(&config));
    let dispatcher = AlertDispatcher::from_config(&config, transport);
    let analyzer = ForecastAnalyzer::new(config.thresholds.clone());

    let monitor = WeatherMonitor::new(source, analyzer, dispatcher, config.check_interval())
        .with_title(config.alerts.title.clone());

    monitor
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}

/// Initialize tracing: stderr in either human-readable or JSON form, plus an
/// appended plain-text log file unless `log_file` is empty
fn init_tracing(log_format: &str, log_file: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "weather_alert=info,weather_alert_service=info".into());

    let file_layer = if log_file.is_empty() {
        None
    } else {
        let file = OpenOptions::new().create(true).append(true).open(log_file)?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
