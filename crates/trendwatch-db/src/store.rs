//! Engine `TrendStore` port backed by Postgres.

use async_trait::async_trait;
use sqlx::PgPool;

use trendwatch_core::{Niche, Trend};
use trendwatch_engine::{EngineError, TrendStore};

use crate::{insert_niches, insert_trends};

/// Insert-only store over a shared connection pool. The engine treats
/// writes as fire-and-forget; read paths live in the CLI report, not here.
#[derive(Clone)]
pub struct PgTrendStore {
    pool: PgPool,
}

impl PgTrendStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrendStore for PgTrendStore {
    async fn persist_trends(&self, trends: &[Trend]) -> Result<(), EngineError> {
        let inserted = insert_trends(&self.pool, trends)
            .await
            .map_err(|e| EngineError::Persistence(e.to_string()))?;
        tracing::debug!(inserted, "trend batch persisted");
        Ok(())
    }

    async fn persist_niches(&self, niches: &[Niche]) -> Result<(), EngineError> {
        let inserted = insert_niches(&self.pool, niches)
            .await
            .map_err(|e| EngineError::Persistence(e.to_string()))?;
        tracing::debug!(inserted, "niche batch persisted");
        Ok(())
    }
}
