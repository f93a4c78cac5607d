//! Database operations for the `niches` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use trendwatch_core::Niche;

use crate::DbError;

/// A row from the `niches` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NicheRow {
    pub id: Uuid,
    pub niche_name: String,
    pub category: String,
    pub market_size_estimate: f64,
    pub competition_score: i16,
    pub profitability_score: f64,
    pub trend_direction: String,
    pub discovered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Insert one cycle's niche batch inside a single transaction.
///
/// Returns the number of rows inserted. An empty batch is a no-op.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; the transaction rolls
/// back and no partial batch is committed.
pub async fn insert_niches(pool: &PgPool, niches: &[Niche]) -> Result<usize, DbError> {
    if niches.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;

    for niche in niches {
        sqlx::query(
            "INSERT INTO niches \
                 (id, niche_name, category, market_size_estimate, competition_score, \
                  profitability_score, trend_direction, discovered_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(niche.id)
        .bind(&niche.niche_name)
        .bind(&niche.category)
        .bind(niche.market_size_estimate)
        .bind(i16::from(niche.competition_score))
        .bind(niche.profitability_score)
        .bind(niche.trend_direction.to_string())
        .bind(niche.discovered_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(niches.len())
}

/// List recently promoted niches, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_niches(pool: &PgPool, limit: i64) -> Result<Vec<NicheRow>, DbError> {
    let rows = sqlx::query_as::<_, NicheRow>(
        "SELECT id, niche_name, category, market_size_estimate, competition_score, \
                profitability_score, trend_direction, discovered_at, created_at \
         FROM niches \
         ORDER BY discovered_at DESC, profitability_score DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
