//! Listing query engine module.
//!
//! This module provides:
//! - EntityView: static descriptors for the four admin list domains
//! - FilterSpec: normalized, validated request parameters
//! - JoinPlan: per-request strict/loose join resolution
//! - ListingQueryBuilder: SeaQuery-based SQL generation
//! - ListingService: query execution and envelope wrapping

mod entity;
mod filter;
mod join;
mod query_builder;
mod service;
pub mod types;

#[allow(unused_imports)]
pub use entity::{ColumnRef, EntityKind, EntityView, FieldBinding, FieldKind, RelationDef};
#[allow(unused_imports)]
pub use filter::{
    ALL_SENTINEL, DEFAULT_LIMIT, DEFAULT_PAGE, DateRange, FilterSpec, FilterValue, NumericRange,
};
#[allow(unused_imports)]
pub use join::{JoinPlan, Strictness};
#[allow(unused_imports)]
pub use query_builder::ListingQueryBuilder;
#[allow(unused_imports)]
pub use service::ListingService;
#[allow(unused_imports)]
pub use types::{Envelope, PageMeta, PageWindow, RawListParams, SortOrder};
