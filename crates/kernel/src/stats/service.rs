//! Growth stat execution against Postgres.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{DashboardStats, GrowthStat, growth_percent, month_start};

/// Entity categories surfaced on the dashboard, with their creation
/// timestamp columns. Table and column names are static — nothing here is
/// caller-supplied.
const ACCOUNTS: (&str, &str) = ("accounts", "created");
const BUSINESSES: (&str, &str) = ("user_businesses", "created");
const ASSETS: (&str, &str) = ("user_assets", "created");
const INVESTMENTS: (&str, &str) = ("user_investments", "created");

/// Service computing dashboard growth statistics.
pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }

    /// Compute all four category stats concurrently.
    ///
    /// Results recombine by category, not completion order; a failing
    /// category logs once and degrades to a zero stat so the rest of the
    /// dashboard still renders.
    pub async fn dashboard(&self) -> DashboardStats {
        let since = month_start(Utc::now());

        let (accounts, businesses, assets, investments) = tokio::join!(
            self.category_stat(ACCOUNTS, since),
            self.category_stat(BUSINESSES, since),
            self.category_stat(ASSETS, since),
            self.category_stat(INVESTMENTS, since),
        );

        DashboardStats {
            accounts,
            businesses,
            assets,
            investments,
        }
    }

    async fn category_stat(
        &self,
        (table, ts_column): (&'static str, &'static str),
        since: DateTime<Utc>,
    ) -> GrowthStat {
        match self.growth_stat(table, ts_column, since).await {
            Ok(stat) => stat,
            Err(e) => {
                tracing::error!(table, error = %e, "growth stat failed");
                GrowthStat::default()
            }
        }
    }

    /// Current total and count before the month boundary for one table.
    async fn growth_stat(
        &self,
        table: &str,
        ts_column: &str,
        since: DateTime<Utc>,
    ) -> Result<GrowthStat> {
        let current: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("failed to count {table}"))?;

        let previous: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE {ts_column} < $1"))
                .bind(since)
                .fetch_one(&self.pool)
                .await
                .with_context(|| format!("failed to count {table} before month start"))?;

        Ok(GrowthStat {
            count: current,
            growth: growth_percent(current, previous),
        })
    }
}
