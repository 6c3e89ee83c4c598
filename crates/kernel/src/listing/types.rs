//! Listing engine request/response types.
//!
//! Provides the raw parameter bag accepted by every admin list endpoint,
//! the pagination window math, and the uniform response envelope.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Raw, untrusted filter parameters as they arrive on the query string.
///
/// Every field is optional and string-typed; normalization into a
/// [`FilterSpec`](crate::listing::FilterSpec) applies defaults and drops
/// anything structurally invalid instead of failing the request. Parameters
/// not recognized by the target view are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawListParams {
    /// 1-based page number.
    pub page: Option<String>,

    /// Rows per page.
    pub limit: Option<String>,

    /// Free-text search across the view's declared search columns.
    pub query: Option<String>,

    /// Requested sort column (checked against the view's whitelist).
    pub sort_by: Option<String>,

    /// "asc" or "desc".
    pub sort_order: Option<String>,

    /// Row id to exclude from results.
    pub exclude_id: Option<String>,

    /// Per-view filters: equality values (`type`, `category`, `status`),
    /// numeric bounds (`clicksMin`, `clicksMax`), date bounds
    /// (`createdFrom`, `createdTo`).
    #[serde(flatten)]
    pub filters: HashMap<String, String>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse a requested order, falling back to the default (descending)
    /// for anything unrecognized.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Zero-based inclusive row window for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Index of the first row on the page.
    pub start: u64,
    /// Index of the last row on the page (inclusive).
    pub end: u64,
}

impl PageWindow {
    /// Compute the window for a 1-based page and a positive limit.
    pub fn new(page: u32, limit: u32) -> Self {
        let limit = u64::from(limit.max(1));
        let start = u64::from(page.saturating_sub(1)) * limit;
        let end = start + limit - 1;
        Self { start, end }
    }

    /// Number of rows the window covers.
    pub fn size(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Pagination metadata attached to successful list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl PageMeta {
    /// Build metadata from an optional row count.
    ///
    /// An unknown count yields `total = 0` and `total_pages = 0` rather
    /// than an error.
    pub fn new(total: Option<i64>, page: u32, limit: u32) -> Self {
        let total_pages = match total {
            Some(t) if limit > 0 => ((t.max(0) as f64) / f64::from(limit)).ceil() as u32,
            _ => 0,
        };

        Self {
            total: total.unwrap_or(0),
            page,
            limit,
            total_pages,
        }
    }
}

/// Uniform success/error wrapper returned by every listing and dashboard
/// operation.
///
/// Serializes as `{"success": true, "data": ..., "meta": {...}}` or
/// `{"success": false, "error": "..."}` — never both shapes at once.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Success {
        success: bool,
        data: T,
        #[serde(skip_serializing_if = "Option::is_none")]
        meta: Option<PageMeta>,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl<T> Envelope<T> {
    /// Successful result without pagination metadata.
    pub fn success(data: T) -> Self {
        Envelope::Success {
            success: true,
            data,
            meta: None,
        }
    }

    /// Successful list result with pagination metadata.
    pub fn paginated(data: T, meta: PageMeta) -> Self {
        Envelope::Success {
            success: true,
            data,
            meta: Some(meta),
        }
    }

    /// Failed result carrying a caller-safe message.
    pub fn failure(error: impl Into<String>) -> Self {
        Envelope::Failure {
            success: false,
            error: error.into(),
        }
    }
}
