//! Alert dispatch: severity filtering, message formatting and delivery

use std::sync::Arc;

use shared::{Condition, ConditionKind, Severity};

use crate::config::Config;
use crate::external::pushover::{PushTransport, PushoverMessage};

pub const NO_CONDITIONS_MESSAGE: &str = "No significant weather conditions detected.";
pub const MESSAGE_HEADER: &str = "⚠️ Weather Alert:";
pub const DEFAULT_TITLE: &str = "Weather Alert System";

/// Filters conditions by severity and sends the survivors as one notification
#[derive(Clone)]
pub struct AlertDispatcher {
    transport: Arc<dyn PushTransport>,
    user_key: String,
    app_token: String,
    threshold: Severity,
}

impl AlertDispatcher {
    pub fn new(
        transport: Arc<dyn PushTransport>,
        user_key: String,
        app_token: String,
        threshold: Severity,
    ) -> Self {
        Self {
            transport,
            user_key,
            app_token,
            threshold,
        }
    }

    pub fn from_config(config: &Config, transport: Arc<dyn PushTransport>) -> Self {
        Self::new(
            transport,
            config.pushover.user_key.clone(),
            config.pushover.app_token.clone(),
            config.notification_threshold(),
        )
    }

    pub fn threshold(&self) -> &Severity {
        &self.threshold
    }

    /// Keep the conditions ranked at or above the notification threshold
    pub fn filter_by_severity(&self, conditions: &[Condition]) -> Vec<Condition> {
        conditions
            .iter()
            .filter(|c| c.severity.meets(&self.threshold))
            .cloned()
            .collect()
    }

    /// Render conditions as the notification body
    pub fn format_message(&self, conditions: &[Condition]) -> String {
        format_message(conditions)
    }

    /// Filter, format and send. Returns true only when the service accepted
    /// the message with HTTP 200. Nothing is sent when no condition passes
    /// the threshold.
    pub async fn dispatch(&self, conditions: &[Condition], title: Option<&str>) -> bool {
        let filtered = self.filter_by_severity(conditions);

        if filtered.is_empty() {
            tracing::info!("No conditions meet notification threshold");
            return false;
        }

        let message = PushoverMessage {
            token: self.app_token.clone(),
            user: self.user_key.clone(),
            message: format_message(&filtered),
            title: title.unwrap_or(DEFAULT_TITLE).to_string(),
        };

        match self.transport.send(&message).await {
            Ok(200) => {
                tracing::info!(
                    "Notification sent successfully ({} conditions)",
                    filtered.len()
                );
                true
            }
            Ok(status) => {
                tracing::error!("Failed to send notification. Status: {}", status);
                false
            }
            Err(e) => {
                tracing::error!("Failed to send notification: {}", e);
                false
            }
        }
    }
}

/// Header line, a blank line, then one line per condition in input order
pub fn format_message(conditions: &[Condition]) -> String {
    if conditions.is_empty() {
        return NO_CONDITIONS_MESSAGE.to_string();
    }

    let mut lines = vec![format!("{}\n", MESSAGE_HEADER)];
    lines.extend(conditions.iter().map(format_condition));
    lines.join("\n")
}

fn format_condition(condition: &Condition) -> String {
    let glyph = match condition.kind {
        ConditionKind::Temperature => "🌡️",
        ConditionKind::Wind => "💨",
        ConditionKind::Precipitation => "🌧️",
        ConditionKind::SevereWeather => {
            return format!(
                "⚡ {} {}",
                condition.severity.capitalized(),
                condition.description
            );
        }
    };

    format!(
        "{} {} {}: {}{}",
        glyph,
        condition.severity.capitalized(),
        condition.description,
        condition.display_value(),
        condition.unit
    )
}
