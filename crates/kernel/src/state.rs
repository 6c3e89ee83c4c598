//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;

use magnate_kernel::listing::ListingService;
use magnate_kernel::stats::StatsService;

use crate::config::Config;
use crate::db;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool.
    db: PgPool,

    /// Listing query engine.
    listing: Arc<ListingService>,

    /// Dashboard growth statistics.
    stats: Arc<StatsService>,
}

impl AppState {
    /// Initialize state: connect the pool and wire up services.
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = db::create_pool(config).await?;

        let listing = ListingService::new(pool.clone());
        let stats = StatsService::new(pool.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                db: pool,
                listing,
                stats,
            }),
        })
    }

    /// Database pool.
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Listing service.
    pub fn listing(&self) -> &ListingService {
        &self.inner.listing
    }

    /// Stats service.
    pub fn stats(&self) -> &StatsService {
        &self.inner.stats
    }

    /// Whether PostgreSQL answers a trivial query.
    pub async fn postgres_healthy(&self) -> bool {
        db::check_health(&self.inner.db).await
    }
}
