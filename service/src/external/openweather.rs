//! Forecast API client
//!
//! Integrates with the OpenWeatherMap 5 day / 3 hour forecast endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::retry::RetryPolicy;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Forecast payload as returned by the API.
///
/// `list` is optional so that a payload without entries decodes and simply
/// yields no conditions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawForecast {
    #[serde(default)]
    pub city: Option<ForecastCity>,
    #[serde(default)]
    pub list: Option<Vec<ForecastEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastCity {
    #[serde(default)]
    pub name: String,
}

/// One 3-hour slice of the forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp of the slice
    #[serde(default)]
    pub dt: Option<i64>,
    pub main: EntryMain,
    pub wind: EntryWind,
    #[serde(default)]
    pub rain: Option<EntryRain>,
    #[serde(default)]
    pub weather: Vec<WeatherTag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryMain {
    /// Temperature in °C
    pub temp: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryWind {
    /// Wind speed in m/s
    pub speed: Decimal,
}

/// Rain volume by accumulation window, in mm
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryRain {
    #[serde(rename = "1h", default, skip_serializing_if = "Option::is_none")]
    pub one_hour: Option<Decimal>,
    #[serde(rename = "3h", default, skip_serializing_if = "Option::is_none")]
    pub three_hour: Option<Decimal>,
}

/// Weather category tag, e.g. `{ "main": "Thunderstorm", "description": "heavy thunderstorm" }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherTag {
    pub main: String,
    #[serde(default)]
    pub description: String,
}

impl ForecastEntry {
    pub fn new(temp: Decimal, wind_speed_mps: Decimal) -> Self {
        Self {
            dt: None,
            main: EntryMain { temp },
            wind: EntryWind {
                speed: wind_speed_mps,
            },
            rain: None,
            weather: Vec::new(),
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.dt.and_then(|dt| DateTime::from_timestamp(dt, 0))
    }

    pub fn rain_3h(&self) -> Option<Decimal> {
        self.rain.as_ref().and_then(|r| r.three_hour)
    }
}

impl RawForecast {
    pub fn from_entries(entries: Vec<ForecastEntry>) -> Self {
        Self {
            city: None,
            list: Some(entries),
        }
    }

    pub fn location_name(&self) -> Option<&str> {
        self.city.as_ref().map(|c| c.name.as_str())
    }
}

/// Anything that can supply a forecast for the configured location.
///
/// `None` is the only failure signal; implementations log their own errors.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self) -> Option<RawForecast>;
}

/// OpenWeatherMap forecast client
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    location: String,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl OpenWeatherClient {
    /// Create a new OpenWeatherClient
    pub fn new(api_key: String, location: String) -> Self {
        Self::with_base_url(api_key, location, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new OpenWeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, location: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            location,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_base_url(
            config.weather.api_key.clone(),
            config.weather.location.clone(),
            config.weather.base_url.clone(),
        )
        .with_timeout(config.http_timeout())
        .with_retry_policy(RetryPolicy::from(&config.retry))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Single request against the forecast endpoint, without retries
    pub async fn fetch_once(&self) -> AppResult<RawForecast> {
        tracing::info!("Fetching weather forecast for {}", self.location);

        let response = self
            .client
            .get(format!("{}/forecast", self.base_url))
            .query(&[
                ("q", self.location.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UnexpectedStatus {
                service: "Forecast API",
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let forecast: RawForecast = serde_json::from_slice(&body)?;

        tracing::debug!(
            "Received {} forecast entries for {}",
            forecast.list.as_ref().map_or(0, Vec::len),
            forecast.location_name().unwrap_or(&self.location)
        );

        Ok(forecast)
    }
}

#[async_trait]
impl ForecastSource for OpenWeatherClient {
    async fn fetch(&self) -> Option<RawForecast> {
        self.retry
            .run("Forecast fetch", || self.fetch_once())
            .await
            .ok()
    }
}
