//! Listing query builder using SeaQuery.
//!
//! Generates the SELECT and COUNT statements for one admin list request
//! from a normalized [`FilterSpec`], a static [`EntityView`], and a
//! resolved [`JoinPlan`]. Predicates are appended in a fixed order:
//! id exclusion, equality filters, numeric ranges, date ranges, then one
//! OR-group of case-insensitive substring matches for free-text search.

use sea_query::{
    Alias, Asterisk, Cond, Expr, ExprTrait, Func, Order, PostgresQueryBuilder, Query,
    SelectStatement, SimpleExpr,
};

use super::entity::{ColumnRef, EntityView};
use super::filter::{FilterSpec, FilterValue};
use super::join::{JoinPlan, Strictness};
use super::types::{PageWindow, SortOrder};

/// Query builder for one list request.
pub struct ListingQueryBuilder<'a> {
    view: &'static EntityView,
    spec: &'a FilterSpec,
    plan: &'a JoinPlan,
}

impl<'a> ListingQueryBuilder<'a> {
    pub fn new(view: &'static EntityView, spec: &'a FilterSpec, plan: &'a JoinPlan) -> Self {
        Self { view, spec, plan }
    }

    /// Build the main SELECT with joins, predicates, ordering, and the
    /// pagination window.
    pub fn build(&self) -> String {
        let mut query = Query::select();

        query.column((Alias::new(self.view.base_table), Asterisk));
        for (column, label) in self.view.extras {
            query.expr_as(self.col_expr(column), Alias::new(*label));
        }

        query.from(Alias::new(self.view.base_table));
        self.add_joins(&mut query);
        self.add_predicates(&mut query);

        let order = match self.spec.sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        query.order_by(
            (
                Alias::new(self.view.base_table),
                Alias::new(self.sort_column()),
            ),
            order,
        );

        let window = PageWindow::new(self.spec.page, self.spec.limit);
        query.limit(window.size());
        query.offset(window.start);

        query.to_string(PostgresQueryBuilder)
    }

    /// Build the COUNT(*) query over the same joins and predicates.
    pub fn build_count(&self) -> String {
        let mut query = Query::select();

        query.expr(Expr::col(Asterisk).count());
        query.from(Alias::new(self.view.base_table));
        self.add_joins(&mut query);
        self.add_predicates(&mut query);

        query.to_string(PostgresQueryBuilder)
    }

    /// The sort column actually used: the requested one when whitelisted,
    /// the view default otherwise. Unknown values never reach the SQL.
    pub fn sort_column(&self) -> &'static str {
        match self.spec.sort_by.as_deref() {
            Some(requested) => self
                .view
                .sortable
                .iter()
                .find(|col| **col == requested)
                .copied()
                .unwrap_or(self.view.default_sort),
            None => self.view.default_sort,
        }
    }

    /// Emit every declared relation with the strictness the plan resolved.
    fn add_joins(&self, query: &mut SelectStatement) {
        for rel in self.view.relations {
            let join_type = match self.plan.strictness(rel.name) {
                Some(Strictness::Strict) => sea_query::JoinType::InnerJoin,
                _ => sea_query::JoinType::LeftJoin,
            };

            let owner = rel.parent.unwrap_or(self.view.base_table);
            let on_condition = Expr::col((Alias::new(owner), Alias::new(rel.local_column)))
                .equals((Alias::new(rel.name), Alias::new(rel.foreign_column)));

            query.join_as(
                join_type,
                Alias::new(rel.table),
                Alias::new(rel.name),
                on_condition,
            );
        }
    }

    /// Append WHERE clauses in the fixed composition order.
    fn add_predicates(&self, query: &mut SelectStatement) {
        if let Some(id) = self.spec.exclude_id {
            query.and_where(
                Expr::col((
                    Alias::new(self.view.base_table),
                    Alias::new(self.view.id_column),
                ))
                .ne(id),
            );
        }

        for (column, value) in &self.spec.equality {
            query.and_where(self.col_expr(column).eq(value_expr(value)));
        }

        for (column, range) in &self.spec.ranges {
            if let Some(min) = &range.min {
                query.and_where(self.col_expr(column).gte(value_expr(min)));
            }
            if let Some(max) = &range.max {
                query.and_where(self.col_expr(column).lte(value_expr(max)));
            }
        }

        for (column, range) in &self.spec.date_ranges {
            if let Some(from) = &range.from {
                query.and_where(self.col_expr(column).gte(Expr::val(from.clone())));
            }
            if let Some(to) = &range.to {
                query.and_where(self.col_expr(column).lte(Expr::val(to.clone())));
            }
        }

        if let Some(needle) = &self.spec.query
            && let Some(condition) = self.search_condition(needle)
        {
            query.and_where(condition);
        }
    }

    /// One conjunctive OR-group matching the needle case-insensitively
    /// against every declared search column.
    fn search_condition(&self, needle: &str) -> Option<SimpleExpr> {
        if self.view.search_columns.is_empty() {
            return None;
        }

        let pattern = format!("%{}%", escape_like_wildcards(&needle.to_lowercase()));
        let mut cond = Cond::any();
        for column in self.view.search_columns {
            cond = cond.add(
                Expr::expr(Func::lower(self.col_expr(column))).like(pattern.clone()),
            );
        }

        Some(cond.into())
    }

    /// Address a column on the base table or on a joined relation alias.
    ///
    /// Relation columns only ever come from the active filter set — the
    /// same set the join plan derived strictness from — so a loose-joined
    /// relation is never the target of a predicate.
    fn col_expr(&self, column: &ColumnRef) -> Expr {
        let table = column.relation.unwrap_or(self.view.base_table);
        Expr::col((Alias::new(table), Alias::new(column.column)))
    }
}

/// Render a typed filter value as a SQL literal expression.
fn value_expr(value: &FilterValue) -> Expr {
    match value {
        FilterValue::Int(i) => Expr::val(*i),
        FilterValue::Num(n) => Expr::val(*n),
        FilterValue::Text(s) => Expr::val(s.clone()),
    }
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::listing::entity::EntityKind;
    use crate::listing::types::RawListParams;
    use std::collections::HashMap;

    fn raw(pairs: &[(&str, &str)]) -> RawListParams {
        RawListParams {
            filters: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
            ..Default::default()
        }
    }

    fn build_for(kind: EntityKind, params: &RawListParams) -> (String, String) {
        let view = kind.view();
        let spec = FilterSpec::normalize(params, view);
        let plan = JoinPlan::resolve(view, &spec);
        let builder = ListingQueryBuilder::new(view, &spec, &plan);
        (builder.build(), builder.build_count())
    }

    #[test]
    fn default_account_listing() {
        let (sql, count_sql) = build_for(EntityKind::Account, &RawListParams::default());

        assert!(sql.contains("FROM \"accounts\""));
        assert!(sql.contains("ORDER BY \"accounts\".\"id\" DESC"));
        assert!(sql.contains("LIMIT 25"));
        assert!(sql.contains("OFFSET 0"));

        assert!(count_sql.contains("COUNT(*)"));
        assert!(!count_sql.contains("LIMIT"));
        assert!(!count_sql.contains("ORDER BY"));
    }

    #[test]
    fn pagination_window() {
        let params = RawListParams {
            page: Some("2".to_string()),
            limit: Some("10".to_string()),
            ..Default::default()
        };
        let (sql, _) = build_for(EntityKind::Account, &params);

        assert!(sql.contains("LIMIT 10"));
        assert!(sql.contains("OFFSET 10"));
    }

    #[test]
    fn sort_guard_blocks_unlisted_columns() {
        let params = RawListParams {
            sort_by: Some("droptable; --".to_string()),
            ..Default::default()
        };
        let (sql, _) = build_for(EntityKind::Account, &params);

        assert!(sql.contains("ORDER BY \"accounts\".\"id\" DESC"));
        assert!(!sql.contains("droptable"));
    }

    #[test]
    fn sort_guard_allows_whitelisted_column() {
        let params = RawListParams {
            sort_by: Some("uname".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        let (sql, _) = build_for(EntityKind::Account, &params);

        assert!(sql.contains("ORDER BY \"accounts\".\"uname\" ASC"));
    }

    #[test]
    fn equality_and_range_predicates() {
        let (sql, _) = build_for(
            EntityKind::Account,
            &raw(&[("status", "1"), ("clicksMin", "100"), ("clicksMax", "500")]),
        );

        assert!(sql.contains("\"accounts\".\"status\" = 1"));
        assert!(sql.contains("\"accounts\".\"clicks\" >= 100"));
        assert!(sql.contains("\"accounts\".\"clicks\" <= 500"));
    }

    #[test]
    fn all_sentinel_builds_identical_sql() {
        let (with_all, _) = build_for(EntityKind::Account, &raw(&[("status", "all")]));
        let (omitted, _) = build_for(EntityKind::Account, &raw(&[]));

        assert_eq!(with_all, omitted);
    }

    #[test]
    fn only_min_bound_applies_no_upper() {
        let (sql, _) = build_for(EntityKind::Account, &raw(&[("clicksMin", "100")]));

        assert!(sql.contains("\"accounts\".\"clicks\" >= 100"));
        assert!(!sql.contains("\"clicks\" <="));
    }

    #[test]
    fn exclude_id_predicate_comes_through() {
        let params = RawListParams {
            exclude_id: Some("5".to_string()),
            ..Default::default()
        };
        let (sql, _) = build_for(EntityKind::Account, &params);

        assert!(sql.contains("\"accounts\".\"id\" <> 5"));
    }

    #[test]
    fn free_text_search_is_or_combined_and_lowercased() {
        let params = RawListParams {
            query: Some("Bob".to_string()),
            ..Default::default()
        };
        let (sql, _) = build_for(EntityKind::Account, &params);

        assert!(sql.contains("LOWER(\"accounts\".\"uname\") LIKE '%bob%'"));
        assert!(sql.contains("LOWER(\"accounts\".\"email\") LIKE '%bob%'"));
        assert!(sql.contains("LOWER(\"accounts\".\"fname\") LIKE '%bob%'"));
        assert!(sql.contains("LOWER(\"accounts\".\"lname\") LIKE '%bob%'"));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        let params = RawListParams {
            query: Some("100%_done".to_string()),
            ..Default::default()
        };
        let (sql, _) = build_for(EntityKind::Account, &params);

        assert!(!sql.contains("%100%_done%"), "wildcards must not pass through: {sql}");
    }

    #[test]
    fn business_category_filter_joins_strictly() {
        let (sql, count_sql) = build_for(EntityKind::Business, &raw(&[("category", "3")]));

        assert!(sql.contains(
            "INNER JOIN \"business_type_details\" AS \"type_detail\""
        ));
        assert!(sql.contains("\"type_detail\".\"category_id\" = 3"));
        // Unfiltered relations stay loose even in the same query.
        assert!(sql.contains("LEFT JOIN \"business_types\" AS \"btype\""));
        assert!(sql.contains("LEFT JOIN \"accounts\" AS \"owner\""));
        // The count query must see the same join shape.
        assert!(count_sql.contains(
            "INNER JOIN \"business_type_details\" AS \"type_detail\""
        ));
    }

    #[test]
    fn unfiltered_business_listing_joins_loosely() {
        let (sql, _) = build_for(EntityKind::Business, &raw(&[]));

        assert!(sql.contains("LEFT JOIN \"business_type_details\" AS \"type_detail\""));
        assert!(!sql.contains("INNER JOIN"));
    }

    #[test]
    fn nested_join_chains_off_parent_alias() {
        let (sql, _) = build_for(EntityKind::Business, &raw(&[]));

        assert!(sql.contains(
            "LEFT JOIN \"business_types\" AS \"btype\" ON \"type_detail\".\"type_id\" = \"btype\".\"id\""
        ));
    }

    #[test]
    fn extras_are_labeled() {
        let (sql, _) = build_for(EntityKind::Business, &raw(&[]));

        assert!(sql.contains("\"btype\".\"name\" AS \"type_name\""));
        assert!(sql.contains("\"owner\".\"uname\" AS \"owner_uname\""));
    }

    #[test]
    fn date_range_bounds_render_inclusive() {
        let (sql, _) = build_for(
            EntityKind::Account,
            &raw(&[("createdFrom", "2026-01-01"), ("createdTo", "2026-06-30")]),
        );

        assert!(sql.contains("\"accounts\".\"created\" >= '2026-01-01'"));
        assert!(sql.contains("\"accounts\".\"created\" <= '2026-06-30'"));
    }

    #[test]
    fn escape_like_wildcards_function() {
        assert_eq!(escape_like_wildcards("hello"), "hello");
        assert_eq!(escape_like_wildcards("100%"), "100\\%");
        assert_eq!(escape_like_wildcards("a_b"), "a\\_b");
        assert_eq!(escape_like_wildcards("a\\b"), "a\\\\b");
    }
}
