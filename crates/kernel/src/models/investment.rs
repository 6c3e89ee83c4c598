//! Player investment model and single-record operations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Investment record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Investment {
    pub id: i64,
    pub account_id: i64,
    pub type_detail_id: Option<i64>,
    pub amount: f64,
    pub status: i16,
    pub created: DateTime<Utc>,
}

impl Investment {
    /// Find an investment by ID.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>> {
        let investment =
            sqlx::query_as::<_, Investment>("SELECT * FROM user_investments WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await
                .context("failed to fetch investment by id")?;

        Ok(investment)
    }

    /// Delete an investment.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_investments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete investment")?;

        Ok(result.rows_affected() > 0)
    }
}
