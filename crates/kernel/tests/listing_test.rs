#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Listing engine integration tests.
//!
//! Exercises the full pure pipeline — raw params → FilterSpec → JoinPlan →
//! SQL — without a database.

use std::collections::HashMap;

use magnate_kernel::listing::types::{Envelope, PageMeta, PageWindow, RawListParams, SortOrder};
use magnate_kernel::listing::{
    ColumnRef, EntityKind, FilterSpec, FilterValue, JoinPlan, ListingQueryBuilder,
};

fn params(pairs: &[(&str, &str)]) -> RawListParams {
    RawListParams {
        filters: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
        ..Default::default()
    }
}

fn pipeline(kind: EntityKind, raw: &RawListParams) -> (FilterSpec, JoinPlan, String, String) {
    let view = kind.view();
    let spec = FilterSpec::normalize(raw, view);
    let plan = JoinPlan::resolve(view, &spec);
    let builder = ListingQueryBuilder::new(view, &spec, &plan);
    let sql = builder.build();
    let count_sql = builder.build_count();
    (spec, plan, sql, count_sql)
}

// -------------------------------------------------------------------------
// End-to-end scenario
// -------------------------------------------------------------------------

#[test]
fn account_filter_scenario_end_to_end() {
    let mut raw = params(&[
        ("type", "all"),
        ("status", "1"),
        ("clicksMin", "100"),
        ("clicksMax", "500"),
    ]);
    raw.page = Some("2".to_string());
    raw.limit = Some("10".to_string());

    let (spec, _plan, sql, count_sql) = pipeline(EntityKind::Account, &raw);

    // "type=all" is no constraint; only status survives as equality.
    assert_eq!(spec.equality.len(), 1);
    assert_eq!(spec.equality[0].1, FilterValue::Int(1));
    assert!(!sql.contains("account_type"));

    // Row window covers positions 10-19 (0-based).
    let window = PageWindow::new(spec.page, spec.limit);
    assert_eq!(window.start, 10);
    assert_eq!(window.end, 19);
    assert!(sql.contains("LIMIT 10"));
    assert!(sql.contains("OFFSET 10"));

    // Default ordering: id descending.
    assert!(sql.contains("ORDER BY \"accounts\".\"id\" DESC"));

    // Range bounds inclusive, both applied.
    assert!(sql.contains("\"accounts\".\"clicks\" >= 100"));
    assert!(sql.contains("\"accounts\".\"clicks\" <= 500"));

    // The count query carries the same predicates but no window.
    assert!(count_sql.contains("\"accounts\".\"status\" = 1"));
    assert!(!count_sql.contains("LIMIT"));

    // 25 matching rows at limit 10 paginate into 3 pages.
    let meta = PageMeta::new(Some(25), spec.page, spec.limit);
    assert_eq!(meta.total, 25);
    assert_eq!(meta.page, 2);
    assert_eq!(meta.limit, 10);
    assert_eq!(meta.total_pages, 3);
}

// -------------------------------------------------------------------------
// Normalization properties
// -------------------------------------------------------------------------

#[test]
fn all_sentinel_equivalent_to_omission() {
    let (with_all, _, sql_all, count_all) =
        pipeline(EntityKind::Account, &params(&[("status", "all")]));
    let (omitted, _, sql_omitted, count_omitted) = pipeline(EntityKind::Account, &params(&[]));

    assert_eq!(with_all.equality, omitted.equality);
    assert_eq!(sql_all, sql_omitted);
    assert_eq!(count_all, count_omitted);
}

#[test]
fn min_only_range_has_no_upper_bound() {
    let (_, _, sql, _) = pipeline(EntityKind::Account, &params(&[("clicksMin", "100")]));

    assert!(sql.contains("\"accounts\".\"clicks\" >= 100"));
    assert!(!sql.contains("\"clicks\" <="));
}

#[test]
fn malformed_paging_falls_back_to_defaults() {
    let mut raw = params(&[]);
    raw.page = Some("not-a-number".to_string());
    raw.limit = Some("-5".to_string());

    let (spec, _, sql, _) = pipeline(EntityKind::Account, &raw);

    assert_eq!(spec.page, 1);
    assert_eq!(spec.limit, 25);
    assert!(sql.contains("LIMIT 25"));
    assert!(sql.contains("OFFSET 0"));
}

#[test]
fn unknown_filter_params_are_ignored() {
    let (_, _, sql, _) = pipeline(
        EntityKind::TaxType,
        &params(&[("clicksMin", "100"), ("frobnicate", "yes")]),
    );

    assert!(!sql.contains("clicks"));
    assert!(!sql.contains("frobnicate"));
}

// -------------------------------------------------------------------------
// Sort guard
// -------------------------------------------------------------------------

#[test]
fn sort_injection_resolves_to_default() {
    let mut raw = params(&[]);
    raw.sort_by = Some("droptable; --".to_string());

    let (_, _, sql, _) = pipeline(EntityKind::Account, &raw);

    assert!(sql.contains("ORDER BY \"accounts\".\"id\" DESC"));
    assert!(!sql.contains("droptable"));
}

#[test]
fn whitelisted_sort_passes_through() {
    let mut raw = params(&[]);
    raw.sort_by = Some("clicks".to_string());
    raw.sort_order = Some("asc".to_string());

    let (spec, _, sql, _) = pipeline(EntityKind::Account, &raw);

    assert_eq!(spec.sort_order, SortOrder::Asc);
    assert!(sql.contains("ORDER BY \"accounts\".\"clicks\" ASC"));
}

// -------------------------------------------------------------------------
// Join strictness
// -------------------------------------------------------------------------

#[test]
fn business_category_filter_is_strict() {
    let (_, plan, sql, _) = pipeline(EntityKind::Business, &params(&[("category", "3")]));

    assert!(plan.is_strict("type_detail"));
    assert!(sql.contains("INNER JOIN \"business_type_details\" AS \"type_detail\""));
    assert!(sql.contains("\"type_detail\".\"category_id\" = 3"));
}

#[test]
fn business_without_relation_filters_is_loose() {
    let (_, plan, sql, _) = pipeline(EntityKind::Business, &params(&[("status", "1")]));

    assert!(!plan.is_strict("type_detail"));
    assert!(sql.contains("LEFT JOIN \"business_type_details\" AS \"type_detail\""));
    assert!(!sql.contains("INNER JOIN"));
}

#[test]
fn strictness_propagates_to_ancestor_relations() {
    // A filter addressing a grandchild relation (business_types.name) can
    // only be evaluated when the intermediate detail link matches too.
    let view = EntityKind::Business.view();
    let mut spec = FilterSpec::normalize(&RawListParams::default(), view);
    spec.equality.push((
        ColumnRef::joined("btype", "name"),
        FilterValue::Text("bakery".to_string()),
    ));

    let plan = JoinPlan::resolve(view, &spec);

    assert!(plan.is_strict("btype"));
    assert!(plan.is_strict("type_detail"));
    assert!(!plan.is_strict("bcategory"));
    assert!(!plan.is_strict("owner"));
}

#[test]
fn investment_search_tightens_owner_join() {
    let mut raw = params(&[]);
    raw.query = Some("alice".to_string());

    let (_, plan, sql, _) = pipeline(EntityKind::Investment, &raw);

    assert!(plan.is_strict("owner"));
    assert!(sql.contains("INNER JOIN \"accounts\" AS \"owner\""));
    assert!(sql.contains("LOWER(\"owner\".\"uname\") LIKE '%alice%'"));
    assert!(sql.contains("LOWER(\"owner\".\"email\") LIKE '%alice%'"));
    // Catalog relations stay loose; nothing filters them.
    assert!(sql.contains("LEFT JOIN \"investment_type_details\" AS \"type_detail\""));
}

// -------------------------------------------------------------------------
// Free-text search
// -------------------------------------------------------------------------

#[test]
fn account_search_covers_all_declared_columns() {
    let mut raw = params(&[]);
    raw.query = Some("Ada".to_string());

    let (_, _, sql, _) = pipeline(EntityKind::Account, &raw);

    for column in ["uname", "email", "fname", "lname"] {
        assert!(
            sql.contains(&format!("LOWER(\"accounts\".\"{column}\") LIKE '%ada%'")),
            "missing search column {column}: {sql}"
        );
    }
    assert!(sql.contains(" OR "));
}

// -------------------------------------------------------------------------
// Envelope
// -------------------------------------------------------------------------

#[test]
fn envelope_shapes_are_mutually_exclusive() {
    let success = Envelope::paginated(vec![serde_json::json!({"id": 1})], PageMeta::new(Some(1), 1, 25));
    let success_json = serde_json::to_value(&success).unwrap();
    assert_eq!(success_json["success"], true);
    assert!(success_json.get("error").is_none());
    assert_eq!(success_json["meta"]["total"], 1);

    let failure: Envelope<Vec<serde_json::Value>> = Envelope::failure("boom");
    let failure_json = serde_json::to_value(&failure).unwrap();
    assert_eq!(failure_json["success"], false);
    assert!(failure_json.get("data").is_none());
    assert!(failure_json.get("meta").is_none());
}
