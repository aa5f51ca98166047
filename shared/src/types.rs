//! Common types used across the service

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Severity of a detected weather condition.
///
/// The four ranked levels are ordered `Info < Warning < Severe < Extreme`.
/// Any other label is kept verbatim in `Other` and ranks as `Info`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    Info,
    #[default]
    Warning,
    Severe,
    Extreme,
    Other(String),
}

impl Severity {
    /// Parse a severity label. Ranked names are matched case-insensitively.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "info" => Severity::Info,
            "warning" => Severity::Warning,
            "severe" => Severity::Severe,
            "extreme" => Severity::Extreme,
            _ => Severity::Other(label.to_string()),
        }
    }

    /// Position in the ranking table used for threshold comparisons.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Info => 0,
            Severity::Warning => 1,
            Severity::Severe => 2,
            Severity::Extreme => 3,
            Severity::Other(_) => 0,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Severe => "severe",
            Severity::Extreme => "extreme",
            Severity::Other(label) => label,
        }
    }

    /// Label with its first character upper-cased, e.g. `"Warning"`.
    pub fn capitalized(&self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Whether this severity ranks at or above `threshold`.
    pub fn meets(&self, threshold: &Severity) -> bool {
        self.rank() >= threshold.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Severity::parse(&label))
    }
}

/// Hazard category of a detected condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    Temperature,
    Wind,
    Precipitation,
    #[serde(rename = "weather")]
    SevereWeather,
}

impl ConditionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKind::Temperature => "temperature",
            ConditionKind::Wind => "wind",
            ConditionKind::Precipitation => "precipitation",
            ConditionKind::SevereWeather => "weather",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
