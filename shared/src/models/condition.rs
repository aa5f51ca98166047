//! Detected weather condition records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ConditionKind, Severity};

/// A hazardous condition found in one forecast entry.
///
/// Conditions are plain values: two records with the same fields are
/// interchangeable, and nothing deduplicates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: ConditionKind,
    pub severity: Severity,
    pub description: String,
    /// Magnitude in `unit` (°C, km/h or mm); zero when not applicable
    pub value: Decimal,
    pub unit: String,
}

impl Condition {
    pub fn new(
        kind: ConditionKind,
        severity: Severity,
        description: impl Into<String>,
        value: Decimal,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            description: description.into(),
            value,
            unit: unit.into(),
        }
    }

    /// Severe-weather conditions carry no magnitude or unit.
    pub fn severe_weather(description: impl Into<String>) -> Self {
        Self::new(
            ConditionKind::SevereWeather,
            Severity::Severe,
            description,
            Decimal::ZERO,
            "",
        )
    }

    /// Value rendered without trailing zeros, e.g. `90` rather than `90.0`.
    pub fn display_value(&self) -> String {
        self.value.normalize().to_string()
    }
}
