//! Listing service for executing composed queries.
//!
//! One entry point per request: normalize the parameter bag, resolve the
//! join plan, build the SELECT/COUNT pair, execute both against Postgres,
//! and wrap the outcome in the uniform envelope. Stateless across calls —
//! every request gets a fresh spec and plan.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;

use super::entity::EntityKind;
use super::filter::FilterSpec;
use super::join::JoinPlan;
use super::query_builder::ListingQueryBuilder;
use super::types::{Envelope, PageMeta, RawListParams};

/// Service executing admin list queries.
pub struct ListingService {
    pool: PgPool,
}

impl ListingService {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }

    /// Run one list request for an entity view.
    ///
    /// Store failures are logged here, once, and surfaced as the failure
    /// envelope; they are never retried.
    pub async fn list(
        &self,
        kind: EntityKind,
        params: &RawListParams,
    ) -> Envelope<Vec<serde_json::Value>> {
        let view = kind.view();
        let spec = FilterSpec::normalize(params, view);
        let plan = JoinPlan::resolve(view, &spec);
        let builder = ListingQueryBuilder::new(view, &spec, &plan);

        match self.fetch(&builder).await {
            Ok((rows, total)) => {
                let meta = PageMeta::new(Some(total), spec.page, spec.limit);
                Envelope::paginated(rows, meta)
            }
            Err(e) => {
                tracing::error!(entity = ?kind, error = %e, "listing query failed");
                Envelope::failure(e.to_string())
            }
        }
    }

    /// Execute the count and main queries inside one transaction with a
    /// statement timeout, returning rows as JSON objects.
    async fn fetch(
        &self,
        builder: &ListingQueryBuilder<'_>,
    ) -> Result<(Vec<serde_json::Value>, i64)> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to begin transaction")?;

        // SET LOCAL applies for the duration of this transaction only.
        sqlx::query("SET LOCAL statement_timeout = '10s'")
            .execute(&mut *tx)
            .await
            .context("failed to set statement timeout")?;

        let count_sql = builder.build_count();
        let total: i64 = sqlx::query_scalar(&count_sql)
            .fetch_one(&mut *tx)
            .await
            .context("failed to execute count query")?;

        let main_sql = builder.build();
        let rows: Vec<serde_json::Value> =
            sqlx::query_scalar(&format!("SELECT row_to_json(t) FROM ({main_sql}) t"))
                .fetch_all(&mut *tx)
                .await
                .context("failed to execute list query")?;

        tx.commit()
            .await
            .context("failed to commit query transaction")?;

        Ok((rows, total))
    }
}
