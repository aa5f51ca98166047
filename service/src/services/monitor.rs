//! Scheduled forecast checks: fetch, analyze, dispatch

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::Instrument;
use uuid::Uuid;

use crate::external::openweather::ForecastSource;
use crate::services::alert::AlertDispatcher;
use crate::services::analyzer::ForecastAnalyzer;

/// Outcome of one check cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub run_id: Uuid,
    pub forecast_received: bool,
    pub conditions_found: usize,
    pub notification_sent: bool,
}

/// Runs the alert pipeline at startup and then on a fixed interval
#[derive(Clone)]
pub struct WeatherMonitor {
    source: Arc<dyn ForecastSource>,
    analyzer: ForecastAnalyzer,
    dispatcher: AlertDispatcher,
    title: Option<String>,
    interval: Duration,
}

impl WeatherMonitor {
    pub fn new(
        source: Arc<dyn ForecastSource>,
        analyzer: ForecastAnalyzer,
        dispatcher: AlertDispatcher,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            analyzer,
            dispatcher,
            title: None,
            interval,
        }
    }

    /// Custom notification title
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch the forecast, analyze it and dispatch any alert, once.
    pub async fn run_cycle(&self) -> CycleReport {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("weather_check", %run_id);

        async {
            let forecast = self.source.fetch().await;
            let conditions = self.analyzer.analyze(forecast.as_ref());
            let notification_sent = self
                .dispatcher
                .dispatch(&conditions, self.title.as_deref())
                .await;

            CycleReport {
                run_id,
                forecast_received: forecast.is_some(),
                conditions_found: conditions.len(),
                notification_sent,
            }
        }
        .instrument(span)
        .await
    }

    /// Run checks until `shutdown` resolves.
    ///
    /// The first check starts immediately. Each check finishes before the
    /// next tick is awaited, so checks never overlap; a check that panics is
    /// logged and the schedule carries on.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        // tokio rejects a zero period
        let mut ticker = tokio::time::interval(self.interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(
            "Weather Alert System started, checking every {:?}",
            self.interval
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Weather Alert System shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let monitor = self.clone();
                    match tokio::spawn(async move { monitor.run_cycle().await }).await {
                        Ok(report) => tracing::info!(
                            "Weather check finished: forecast={}, conditions={}, notified={}",
                            report.forecast_received,
                            report.conditions_found,
                            report.notification_sent
                        ),
                        Err(e) => tracing::error!("Error in weather check: {}", e),
                    }
                }
            }
        }
    }
}
