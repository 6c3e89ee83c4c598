//! Tax rule model and CRUD operations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Tax rule record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaxType {
    pub id: i64,
    pub name: String,
    /// Fractional rate, e.g. 0.18 for 18%.
    pub rate: f64,
    pub status: i16,
    pub created: DateTime<Utc>,
}

/// Input for creating a new tax rule.
#[derive(Debug, Deserialize)]
pub struct CreateTaxType {
    pub name: String,
    pub rate: f64,
}

/// Input for updating a tax rule; absent fields keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaxType {
    pub name: Option<String>,
    pub rate: Option<f64>,
    pub status: Option<i16>,
}

impl TaxType {
    /// Find a tax rule by ID.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>> {
        let tax = sqlx::query_as::<_, TaxType>("SELECT * FROM tax_types WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch tax type by id")?;

        Ok(tax)
    }

    /// Create a new tax rule (active by default).
    pub async fn create(pool: &PgPool, input: CreateTaxType) -> Result<Self> {
        let tax = sqlx::query_as::<_, TaxType>(
            r#"
            INSERT INTO tax_types (name, rate, status, created)
            VALUES ($1, $2, 1, NOW())
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.rate)
        .fetch_one(pool)
        .await
        .context("failed to create tax type")?;

        Ok(tax)
    }

    /// Update a tax rule; absent fields are left untouched.
    pub async fn update(pool: &PgPool, id: i64, input: UpdateTaxType) -> Result<Option<Self>> {
        let tax = sqlx::query_as::<_, TaxType>(
            r#"
            UPDATE tax_types
            SET name = COALESCE($1, name),
                rate = COALESCE($2, rate),
                status = COALESCE($3, status)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(input.name.as_deref())
        .bind(input.rate)
        .bind(input.status)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to update tax type")?;

        Ok(tax)
    }

    /// Delete a tax rule.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tax_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete tax type")?;

        Ok(result.rows_affected() > 0)
    }
}
