//! Filter normalization.
//!
//! Turns the raw, string-typed parameter bag into a canonical
//! [`FilterSpec`] for one view: defaults applied, the `"all"` sentinel and
//! empty values dropped, malformed numbers discarded instead of erroring,
//! and every remaining filter resolved to the column it constrains. The
//! spec is built fresh per request and never mutated afterwards.

use super::entity::{ColumnRef, EntityView, FieldKind};
use super::types::{RawListParams, SortOrder};

/// Default page when absent or malformed.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when absent or malformed.
pub const DEFAULT_LIMIT: u32 = 25;

/// Equality value meaning "no constraint".
pub const ALL_SENTINEL: &str = "all";

/// A typed filter value.
///
/// Values arrive as strings; numeric-looking ones are promoted so the
/// generated SQL compares numbers as numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i64),
    Num(f64),
    Text(String),
}

impl FilterValue {
    /// Parse an equality value, promoting integers and floats.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return FilterValue::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return FilterValue::Num(f);
        }
        FilterValue::Text(trimmed.to_string())
    }

    /// Parse a range bound; non-numeric input yields `None` (bound omitted).
    pub fn parse_numeric(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Some(FilterValue::Int(i));
        }
        trimmed.parse::<f64>().ok().map(FilterValue::Num)
    }
}

/// Inclusive numeric range; each bound independently optional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericRange {
    pub min: Option<FilterValue>,
    pub max: Option<FilterValue>,
}

impl NumericRange {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Inclusive date range; bounds are passed through as trimmed strings and
/// compared by the store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Canonical, validated representation of one list request.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub page: u32,
    pub limit: u32,
    pub query: Option<String>,
    /// Requested sort column, still unchecked; the composer resolves it
    /// against the view's whitelist.
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    pub exclude_id: Option<i64>,
    pub equality: Vec<(ColumnRef, FilterValue)>,
    pub ranges: Vec<(ColumnRef, NumericRange)>,
    pub date_ranges: Vec<(ColumnRef, DateRange)>,
}

impl FilterSpec {
    /// Normalize a raw parameter bag against a view's declared bindings.
    pub fn normalize(params: &RawListParams, view: &EntityView) -> Self {
        let page = parse_with_floor(params.page.as_deref(), 1).unwrap_or(DEFAULT_PAGE);
        let limit = parse_with_floor(params.limit.as_deref(), 1).unwrap_or(DEFAULT_LIMIT);

        let query = params
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        let sort_by = params
            .sort_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let exclude_id = params
            .exclude_id
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok());

        let mut equality = Vec::new();
        let mut ranges = Vec::new();
        let mut date_ranges = Vec::new();

        for binding in view.fields {
            match binding.kind {
                FieldKind::Equality => {
                    if let Some(value) = active_value(params, binding.param) {
                        equality.push((binding.target, FilterValue::parse(value)));
                    }
                }
                FieldKind::Range => {
                    let range = NumericRange {
                        min: bound(params, binding.param, "Min")
                            .and_then(FilterValue::parse_numeric),
                        max: bound(params, binding.param, "Max")
                            .and_then(FilterValue::parse_numeric),
                    };
                    if !range.is_unbounded() {
                        ranges.push((binding.target, range));
                    }
                }
                FieldKind::DateRange => {
                    let range = DateRange {
                        from: bound(params, binding.param, "From").map(str::to_string),
                        to: bound(params, binding.param, "To").map(str::to_string),
                    };
                    if !range.is_unbounded() {
                        date_ranges.push((binding.target, range));
                    }
                }
            }
        }

        Self {
            page,
            limit,
            query,
            sort_by,
            sort_order: SortOrder::parse(params.sort_order.as_deref()),
            exclude_id,
            equality,
            ranges,
            date_ranges,
        }
    }

    /// Every column any active filter addresses, search columns included.
    ///
    /// This is the exact set the join resolver derives strictness from,
    /// and the only set of relation columns the composer will address.
    pub fn constrained_columns(&self, view: &EntityView) -> Vec<ColumnRef> {
        let mut columns: Vec<ColumnRef> = Vec::new();
        columns.extend(self.equality.iter().map(|(c, _)| *c));
        columns.extend(self.ranges.iter().map(|(c, _)| *c));
        columns.extend(self.date_ranges.iter().map(|(c, _)| *c));
        if self.query.is_some() {
            columns.extend(view.search_columns.iter().copied());
        }
        columns
    }
}

/// Read an equality parameter, treating "" and the "all" sentinel as unset.
fn active_value<'a>(params: &'a RawListParams, name: &str) -> Option<&'a str> {
    params
        .filters
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL_SENTINEL))
}

/// Read a suffixed range bound (`clicksMin`, `createdFrom`, ...), treating
/// "" as unset.
fn bound<'a>(params: &'a RawListParams, name: &str, suffix: &str) -> Option<&'a str> {
    params
        .filters
        .get(&format!("{name}{suffix}"))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Parse a positive integer, rejecting values below `floor`.
fn parse_with_floor(raw: Option<&str>, floor: u32) -> Option<u32> {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&v| v >= floor)
}
