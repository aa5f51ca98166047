//! Pushover push notification client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::Config;
use crate::error::AppResult;

const DEFAULT_BASE_URL: &str = "https://api.pushover.net";
const MESSAGES_PATH: &str = "/1/messages.json";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Form body of a Pushover message request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PushoverMessage {
    pub token: String,
    pub user: String,
    pub message: String,
    pub title: String,
}

/// Delivers a message and reports the HTTP status the service answered with.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn send(&self, message: &PushoverMessage) -> AppResult<u16>;
}

/// Pushover messages API client
#[derive(Clone)]
pub struct PushoverClient {
    http_client: Client,
    base_url: String,
    timeout: Duration,
}

impl PushoverClient {
    /// Create a new Pushover client
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_base_url(config.pushover.base_url.clone()).with_timeout(config.http_timeout())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PushoverClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushTransport for PushoverClient {
    async fn send(&self, message: &PushoverMessage) -> AppResult<u16> {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, MESSAGES_PATH))
            .form(message)
            .timeout(self.timeout)
            .send()
            .await?;

        Ok(response.status().as_u16())
    }
}
