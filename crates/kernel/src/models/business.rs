//! Player-owned business model and single-record operations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Business record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Business {
    pub id: i64,
    pub account_id: i64,
    /// Link into the type-detail catalog; null when the detail was removed.
    pub type_detail_id: Option<i64>,
    pub label: String,
    pub revenue: f64,
    pub status: i16,
    pub created: DateTime<Utc>,
}

impl Business {
    /// Find a business by ID.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>> {
        let business =
            sqlx::query_as::<_, Business>("SELECT * FROM user_businesses WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await
                .context("failed to fetch business by id")?;

        Ok(business)
    }

    /// Update a business's status.
    pub async fn set_status(pool: &PgPool, id: i64, status: i16) -> Result<bool> {
        let result = sqlx::query("UPDATE user_businesses SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(pool)
            .await
            .context("failed to update business status")?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a business.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_businesses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete business")?;

        Ok(result.rows_affected() > 0)
    }
}
