//! Webhook delivery for hot-trend batches.
//!
//! One JSON POST per scan cycle carries every trend that crossed the hot
//! threshold. Delivery is at-least-once: the engine retries nothing here,
//! and downstream consumers are expected to be idempotent.

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Url};
use serde::Serialize;
use thiserror::Error;

use async_trait::async_trait;

use trendwatch_core::Trend;
use trendwatch_engine::{EngineError, HotTrendNotifier};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned status {0}")]
    Status(u16),

    #[error("invalid webhook URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Debug, Serialize)]
struct HotTrendPayload<'a> {
    cycle_at: chrono::DateTime<Utc>,
    count: usize,
    trends: Vec<HotTrendEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct HotTrendEntry<'a> {
    topic: &'a str,
    trend_score: f64,
    lifecycle_stage: String,
    platforms: &'a [String],
    search_volume: u64,
}

/// Posts hot-trend batches to a configured webhook.
///
/// Use [`WebhookNotifier::new`] for production or
/// [`WebhookNotifier::with_base_url`] to point at a mock server in tests.
pub struct WebhookNotifier {
    client: Client,
    webhook_url: Url,
}

impl WebhookNotifier {
    /// Creates a notifier targeting `webhook_url`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying client cannot be
    /// constructed, or [`NotifyError::InvalidUrl`] for an unparsable URL.
    pub fn new(webhook_url: &str, timeout_secs: u64) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let webhook_url = Url::parse(webhook_url).map_err(|e| NotifyError::InvalidUrl {
            url: webhook_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            webhook_url,
        })
    }

    /// Creates a notifier with default client settings — intended for
    /// wiremock tests.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`WebhookNotifier::new`].
    pub fn with_base_url(base_url: &str) -> Result<Self, NotifyError> {
        Self::new(base_url, 30)
    }

    /// Deliver one batch.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] on transport failure or
    /// [`NotifyError::Status`] on a non-2xx response.
    pub async fn send(&self, trends: &[Trend]) -> Result<(), NotifyError> {
        let payload = HotTrendPayload {
            cycle_at: Utc::now(),
            count: trends.len(),
            trends: trends
                .iter()
                .map(|t| HotTrendEntry {
                    topic: &t.topic,
                    trend_score: t.trend_score,
                    lifecycle_stage: t.lifecycle_stage.to_string(),
                    platforms: &t.platforms,
                    search_volume: t.search_volume,
                })
                .collect(),
        };

        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        tracing::debug!(count = trends.len(), "hot-trend batch delivered");
        Ok(())
    }
}

#[async_trait]
impl HotTrendNotifier for WebhookNotifier {
    async fn notify_hot_trends(&self, trends: &[Trend]) -> Result<(), EngineError> {
        self.send(trends)
            .await
            .map_err(|e| EngineError::Notification(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_is_rejected() {
        let result = WebhookNotifier::new("not a url", 30);
        assert!(matches!(result, Err(NotifyError::InvalidUrl { .. })));
    }
}
