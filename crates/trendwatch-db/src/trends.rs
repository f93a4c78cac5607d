//! Database operations for the `trends` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use trendwatch_core::Trend;

use crate::DbError;

/// A row from the `trends` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrendRow {
    pub id: Uuid,
    pub topic: String,
    pub platforms: Vec<String>,
    pub trend_score: f64,
    pub search_volume: i64,
    pub competition_level: String,
    pub lifecycle_stage: String,
    pub related_keywords: Vec<String>,
    pub discovered_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insert one cycle's trend batch inside a single transaction.
///
/// Returns the number of rows inserted. An empty batch is a no-op.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; the transaction rolls
/// back and no partial batch is committed.
pub async fn insert_trends(pool: &PgPool, trends: &[Trend]) -> Result<usize, DbError> {
    if trends.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;

    for trend in trends {
        sqlx::query(
            "INSERT INTO trends \
                 (id, topic, platforms, trend_score, search_volume, competition_level, \
                  lifecycle_stage, related_keywords, discovered_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(trend.id)
        .bind(&trend.topic)
        .bind(&trend.platforms)
        .bind(trend.trend_score)
        .bind(i64::try_from(trend.search_volume).unwrap_or(i64::MAX))
        .bind(trend.competition_level.to_string())
        .bind(trend.lifecycle_stage.to_string())
        .bind(&trend.related_keywords)
        .bind(trend.discovered_at)
        .bind(trend.expires_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(trends.len())
}

/// List recently discovered trends, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_trends(pool: &PgPool, limit: i64) -> Result<Vec<TrendRow>, DbError> {
    let rows = sqlx::query_as::<_, TrendRow>(
        "SELECT id, topic, platforms, trend_score, search_volume, competition_level, \
                lifecycle_stage, related_keywords, discovered_at, expires_at, created_at \
         FROM trends \
         ORDER BY discovered_at DESC, trend_score DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
