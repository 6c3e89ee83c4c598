//! Dashboard growth statistics.
//!
//! Month-over-month growth per entity category: current row count against
//! the count before the start of the current UTC month. The four category
//! aggregations run concurrently and a failing category degrades to a zero
//! stat instead of taking the dashboard down.

mod service;

#[allow(unused_imports)]
pub use service::StatsService;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Count and growth figure for one entity category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct GrowthStat {
    pub count: i64,
    pub growth: f64,
}

/// Combined dashboard statistics, keyed by category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub accounts: GrowthStat,
    pub businesses: GrowthStat,
    pub assets: GrowthStat,
    pub investments: GrowthStat,
}

/// Month-over-month growth percentage.
///
/// A category with no prior rows but some current rows reads as fully new
/// this period (100); an entirely empty category reads as flat (0).
pub fn growth_percent(current: i64, previous: i64) -> f64 {
    if previous > 0 {
        (current - previous) as f64 / previous as f64 * 100.0
    } else if current > 0 {
        100.0
    } else {
        0.0
    }
}

/// First instant of the month containing `now`, in UTC.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}
