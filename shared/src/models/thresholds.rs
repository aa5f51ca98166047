//! Hazard thresholds used by forecast analysis

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Complete threshold table, fixed for the lifetime of the process.
///
/// Some values are carried for completeness but not consulted by the
/// analysis rules: the warning-level temperature and wind limits, the
/// 6-hour rain limit and both snow limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ThresholdConfig {
    pub temperature: TemperatureThresholds,
    pub wind: WindThresholds,
    pub precipitation: PrecipitationThresholds,
    /// Weather category substrings that mark an entry as severe
    pub severe_keywords: SevereKeywords,
}

/// Temperature limits in °C
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemperatureThresholds {
    pub extreme_high: Decimal,
    pub extreme_low: Decimal,
    pub warning_high: Decimal,
    pub warning_low: Decimal,
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self {
            extreme_high: Decimal::from(40),
            extreme_low: Decimal::from(-15),
            warning_high: Decimal::from(35),
            warning_low: Decimal::from(-10),
        }
    }
}

/// Wind speed limits in km/h
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindThresholds {
    pub severe: Decimal,
    pub warning: Decimal,
}

impl Default for WindThresholds {
    fn default() -> Self {
        Self {
            severe: Decimal::from(75),
            warning: Decimal::from(50),
        }
    }
}

/// Accumulation limits: rain in mm, snow in cm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PrecipitationThresholds {
    pub heavy_rain_3h: Decimal,
    pub heavy_rain_6h: Decimal,
    pub snow_3h: Decimal,
    pub snow_6h: Decimal,
}

impl Default for PrecipitationThresholds {
    fn default() -> Self {
        Self {
            heavy_rain_3h: Decimal::from(50),
            heavy_rain_6h: Decimal::from(80),
            snow_3h: Decimal::from(20),
            snow_6h: Decimal::from(40),
        }
    }
}

/// Case-insensitive keyword list for severe weather categories
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SevereKeywords(pub Vec<String>);

impl Default for SevereKeywords {
    fn default() -> Self {
        Self(
            [
                "thunderstorm",
                "hurricane",
                "tornado",
                "cyclone",
                "typhoon",
                "blizzard",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
        )
    }
}

impl SevereKeywords {
    /// True if `category` contains any keyword, ignoring case.
    pub fn matches(&self, category: &str) -> bool {
        let category = category.to_lowercase();
        self.0
            .iter()
            .any(|keyword| category.contains(&keyword.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = ThresholdConfig::default();

        assert_eq!(thresholds.temperature.extreme_high, Decimal::from(40));
        assert_eq!(thresholds.temperature.extreme_low, Decimal::from(-15));
        assert_eq!(thresholds.wind.severe, Decimal::from(75));
        assert_eq!(thresholds.precipitation.heavy_rain_3h, Decimal::from(50));
        assert_eq!(thresholds.severe_keywords.0.len(), 6);
    }

    #[test]
    fn test_keyword_match_is_substring_and_case_insensitive() {
        let keywords = SevereKeywords::default();

        assert!(keywords.matches("Thunderstorm"));
        assert!(keywords.matches("TORNADO"));
        assert!(keywords.matches("tropical cyclone"));
        assert!(!keywords.matches("Rain"));
        assert!(!keywords.matches("Clouds"));
        assert!(!keywords.matches(""));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "wind": { "severe": 60 }, "severe_keywords": ["Squall"] }"#;
        let thresholds: ThresholdConfig = serde_json::from_str(json).unwrap();

        assert_eq!(thresholds.wind.severe, Decimal::from(60));
        assert_eq!(thresholds.wind.warning, Decimal::from(50));
        assert_eq!(thresholds.temperature, TemperatureThresholds::default());
        assert!(thresholds.severe_keywords.matches("squall line"));
        assert!(!thresholds.severe_keywords.matches("thunderstorm"));
    }

    proptest! {
        #[test]
        fn prop_keyword_found_anywhere(prefix in "[a-z ]{0,8}", suffix in "[a-z ]{0,8}") {
            let keywords = SevereKeywords::default();
            let category = format!("{}Hurricane{}", prefix, suffix);
            prop_assert!(keywords.matches(&category));
        }
    }
}
