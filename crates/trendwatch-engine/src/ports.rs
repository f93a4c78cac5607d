//! Outbound ports: persistence and hot-trend notification.
//!
//! The engine depends on these seams, never on sqlx or HTTP concretions;
//! `trendwatch-db` and `trendwatch-notify` provide the production
//! implementations.

use async_trait::async_trait;

use trendwatch_core::{Niche, Trend};

use crate::error::EngineError;

/// Durable storage for a cycle's output. Insert-only from the engine's
/// perspective: the engine never reads back what it wrote.
#[async_trait]
pub trait TrendStore: Send + Sync {
    async fn persist_trends(&self, trends: &[Trend]) -> Result<(), EngineError>;

    async fn persist_niches(&self, niches: &[Niche]) -> Result<(), EngineError>;
}

/// Delivery of the per-cycle hot-trend batch. At-least-once; the engine
/// does not wait for downstream acknowledgment beyond the call itself.
#[async_trait]
pub trait HotTrendNotifier: Send + Sync {
    async fn notify_hot_trends(&self, trends: &[Trend]) -> Result<(), EngineError>;
}

/// Store that drops everything. Used by one-shot scans without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

#[async_trait]
impl TrendStore for NoopStore {
    async fn persist_trends(&self, _trends: &[Trend]) -> Result<(), EngineError> {
        Ok(())
    }

    async fn persist_niches(&self, _niches: &[Niche]) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Notifier that logs instead of delivering. Used when no webhook is
/// configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl HotTrendNotifier for NoopNotifier {
    async fn notify_hot_trends(&self, trends: &[Trend]) -> Result<(), EngineError> {
        tracing::info!(count = trends.len(), "hot trends (no notifier configured)");
        Ok(())
    }
}
