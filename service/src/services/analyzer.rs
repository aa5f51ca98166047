//! Forecast analysis: turns raw forecast entries into hazard conditions

use rust_decimal::Decimal;
use shared::{Condition, ConditionKind, Severity, ThresholdConfig};

use crate::external::openweather::{ForecastEntry, RawForecast};

/// Severity label attached to heavy rain. It is not part of the ranking
/// table, so it ranks with `info`.
pub const HEAVY_RAIN_SEVERITY: &str = "heavy";

/// m/s to km/h, saturating at `Decimal::MAX` for out-of-range speeds
fn mps_to_kmh(speed: Decimal) -> Decimal {
    speed
        .checked_mul(Decimal::new(36, 1))
        .unwrap_or(if speed.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Applies the hazard rules to every forecast entry
#[derive(Debug, Clone, Default)]
pub struct ForecastAnalyzer {
    thresholds: ThresholdConfig,
}

impl ForecastAnalyzer {
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    /// Analyze a forecast and return every hazardous condition found.
    ///
    /// Conditions come out in entry order; within an entry the order is
    /// temperature, wind, precipitation, then one condition per severe
    /// weather tag. A missing forecast or entry list yields nothing.
    pub fn analyze(&self, forecast: Option<&RawForecast>) -> Vec<Condition> {
        let Some(entries) = forecast.and_then(|f| f.list.as_ref()) else {
            tracing::warn!("Invalid forecast data");
            return Vec::new();
        };

        let conditions: Vec<Condition> = entries
            .iter()
            .flat_map(|entry| self.analyze_entry(entry))
            .collect();

        tracing::info!(
            "Analyzed {} forecast entries, {} conditions detected",
            entries.len(),
            conditions.len()
        );

        conditions
    }

    /// Apply all rules to a single entry
    pub fn analyze_entry(&self, entry: &ForecastEntry) -> Vec<Condition> {
        let mut conditions = Vec::new();

        conditions.extend(self.check_temperature(entry));
        conditions.extend(self.check_wind(entry));
        conditions.extend(self.check_precipitation(entry));
        conditions.extend(self.check_severe_weather(entry));

        for condition in &conditions {
            tracing::debug!(
                "{} {} at {}",
                condition.severity,
                condition.description,
                entry
                    .timestamp()
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "unknown time".to_string())
            );
        }

        conditions
    }

    fn check_temperature(&self, entry: &ForecastEntry) -> Option<Condition> {
        let temp = entry.main.temp;
        let limits = &self.thresholds.temperature;

        let description = if temp > limits.extreme_high {
            "Extreme Heat"
        } else if temp < limits.extreme_low {
            "Extreme Cold"
        } else {
            return None;
        };

        Some(Condition::new(
            ConditionKind::Temperature,
            Severity::Extreme,
            description,
            temp,
            "°C",
        ))
    }

    fn check_wind(&self, entry: &ForecastEntry) -> Option<Condition> {
        let wind_kmh = mps_to_kmh(entry.wind.speed);

        (wind_kmh > self.thresholds.wind.severe).then(|| {
            Condition::new(
                ConditionKind::Wind,
                Severity::Severe,
                "High Winds",
                wind_kmh,
                "km/h",
            )
        })
    }

    fn check_precipitation(&self, entry: &ForecastEntry) -> Option<Condition> {
        let volume = entry.rain_3h()?;

        (volume > self.thresholds.precipitation.heavy_rain_3h).then(|| {
            Condition::new(
                ConditionKind::Precipitation,
                Severity::Other(HEAVY_RAIN_SEVERITY.to_string()),
                "Heavy Rain",
                volume,
                "mm",
            )
        })
    }

    fn check_severe_weather(&self, entry: &ForecastEntry) -> Vec<Condition> {
        entry
            .weather
            .iter()
            .filter(|tag| self.thresholds.severe_keywords.matches(&tag.main))
            .map(|tag| {
                let detail = if tag.description.is_empty() {
                    &tag.main
                } else {
                    &tag.description
                };
                Condition::severe_weather(format!("Severe Weather: {}", detail))
            })
            .collect()
    }
}
