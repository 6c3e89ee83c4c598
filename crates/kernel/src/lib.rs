//! Magnate Back Office Library
//!
//! Domain core consumed by the `magnate` binary and by integration tests:
//! the listing query engine, growth statistics, and record models.

pub mod listing;
pub mod models;
pub mod stats;
