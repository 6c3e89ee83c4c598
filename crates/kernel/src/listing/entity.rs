//! Static view descriptors for the four admin list domains.
//!
//! Each [`EntityView`] declares, as data, everything the query layer needs:
//! the base table, which columns free-text search touches, how filter
//! parameters map onto columns (possibly across a joined relation), which
//! relations exist and how they chain, and which columns may be sorted on.
//! Filter handling is driven entirely by these tables — there are no
//! per-entity conditional branches in the composer.

/// The four filterable admin list domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Account,
    Business,
    Investment,
    TaxType,
}

impl EntityKind {
    /// The static view descriptor for this domain.
    pub fn view(self) -> &'static EntityView {
        match self {
            EntityKind::Account => &ACCOUNT_VIEW,
            EntityKind::Business => &BUSINESS_VIEW,
            EntityKind::Investment => &INVESTMENT_VIEW,
            EntityKind::TaxType => &TAX_TYPE_VIEW,
        }
    }
}

/// A column address: on the base table when `relation` is `None`, otherwise
/// on the named relation alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub relation: Option<&'static str>,
    pub column: &'static str,
}

impl ColumnRef {
    pub const fn base(column: &'static str) -> Self {
        Self {
            relation: None,
            column,
        }
    }

    pub const fn joined(relation: &'static str, column: &'static str) -> Self {
        Self {
            relation: Some(relation),
            column,
        }
    }
}

/// How a filter parameter constrains its target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Exact match; the sentinel value "all" means unconstrained.
    Equality,
    /// Inclusive numeric range via `<param>Min` / `<param>Max`.
    Range,
    /// Inclusive date range via `<param>From` / `<param>To`.
    DateRange,
}

/// Declarative mapping from a filter parameter name to a column.
#[derive(Debug, Clone, Copy)]
pub struct FieldBinding {
    pub param: &'static str,
    pub kind: FieldKind,
    pub target: ColumnRef,
}

/// A joinable relation of the view.
///
/// `parent` is `None` when the join condition hangs off the base table,
/// otherwise the name of the relation owning `local_column`. Relations are
/// declared parents-first so joins can be emitted in order.
#[derive(Debug, Clone, Copy)]
pub struct RelationDef {
    /// Alias used for the joined table and in dotted column addressing.
    pub name: &'static str,
    pub table: &'static str,
    pub parent: Option<&'static str>,
    pub local_column: &'static str,
    pub foreign_column: &'static str,
}

/// Complete static description of one admin list view.
#[derive(Debug)]
pub struct EntityView {
    pub kind: EntityKind,
    pub base_table: &'static str,
    pub id_column: &'static str,
    pub search_columns: &'static [ColumnRef],
    pub fields: &'static [FieldBinding],
    pub relations: &'static [RelationDef],
    /// Extra joined columns included in each result row, with their labels.
    pub extras: &'static [(ColumnRef, &'static str)],
    /// Columns `sortBy` may name; anything else falls back to the default.
    pub sortable: &'static [&'static str],
    pub default_sort: &'static str,
}

impl EntityView {
    /// Look up a declared relation by name.
    pub fn relation(&self, name: &str) -> Option<&'static RelationDef> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Look up a filter binding by parameter name.
    pub fn binding(&self, param: &str) -> Option<&'static FieldBinding> {
        self.fields.iter().find(|b| b.param == param)
    }
}

static ACCOUNT_VIEW: EntityView = EntityView {
    kind: EntityKind::Account,
    base_table: "accounts",
    id_column: "id",
    search_columns: &[
        ColumnRef::base("uname"),
        ColumnRef::base("email"),
        ColumnRef::base("fname"),
        ColumnRef::base("lname"),
    ],
    fields: &[
        FieldBinding {
            param: "type",
            kind: FieldKind::Equality,
            target: ColumnRef::base("account_type"),
        },
        FieldBinding {
            param: "status",
            kind: FieldKind::Equality,
            target: ColumnRef::base("status"),
        },
        FieldBinding {
            param: "clicks",
            kind: FieldKind::Range,
            target: ColumnRef::base("clicks"),
        },
        FieldBinding {
            param: "created",
            kind: FieldKind::DateRange,
            target: ColumnRef::base("created"),
        },
    ],
    relations: &[],
    extras: &[],
    sortable: &["id", "uname", "email", "clicks", "status", "created"],
    default_sort: "id",
};

static BUSINESS_VIEW: EntityView = EntityView {
    kind: EntityKind::Business,
    base_table: "user_businesses",
    id_column: "id",
    search_columns: &[
        ColumnRef::base("label"),
        ColumnRef::joined("owner", "uname"),
    ],
    fields: &[
        FieldBinding {
            param: "type",
            kind: FieldKind::Equality,
            target: ColumnRef::joined("type_detail", "type_id"),
        },
        FieldBinding {
            param: "category",
            kind: FieldKind::Equality,
            target: ColumnRef::joined("type_detail", "category_id"),
        },
        FieldBinding {
            param: "status",
            kind: FieldKind::Equality,
            target: ColumnRef::base("status"),
        },
        FieldBinding {
            param: "revenue",
            kind: FieldKind::Range,
            target: ColumnRef::base("revenue"),
        },
        FieldBinding {
            param: "created",
            kind: FieldKind::DateRange,
            target: ColumnRef::base("created"),
        },
    ],
    relations: &[
        RelationDef {
            name: "type_detail",
            table: "business_type_details",
            parent: None,
            local_column: "type_detail_id",
            foreign_column: "id",
        },
        RelationDef {
            name: "btype",
            table: "business_types",
            parent: Some("type_detail"),
            local_column: "type_id",
            foreign_column: "id",
        },
        RelationDef {
            name: "bcategory",
            table: "business_categories",
            parent: Some("type_detail"),
            local_column: "category_id",
            foreign_column: "id",
        },
        RelationDef {
            name: "owner",
            table: "accounts",
            parent: None,
            local_column: "account_id",
            foreign_column: "id",
        },
    ],
    extras: &[
        (ColumnRef::joined("btype", "name"), "type_name"),
        (ColumnRef::joined("bcategory", "name"), "category_name"),
        (ColumnRef::joined("owner", "uname"), "owner_uname"),
    ],
    sortable: &["id", "label", "revenue", "status", "created"],
    default_sort: "id",
};

static INVESTMENT_VIEW: EntityView = EntityView {
    kind: EntityKind::Investment,
    base_table: "user_investments",
    id_column: "id",
    search_columns: &[
        ColumnRef::joined("owner", "uname"),
        ColumnRef::joined("owner", "email"),
    ],
    fields: &[
        FieldBinding {
            param: "type",
            kind: FieldKind::Equality,
            target: ColumnRef::joined("type_detail", "type_id"),
        },
        FieldBinding {
            param: "category",
            kind: FieldKind::Equality,
            target: ColumnRef::joined("type_detail", "category_id"),
        },
        FieldBinding {
            param: "status",
            kind: FieldKind::Equality,
            target: ColumnRef::base("status"),
        },
        FieldBinding {
            param: "amount",
            kind: FieldKind::Range,
            target: ColumnRef::base("amount"),
        },
        FieldBinding {
            param: "created",
            kind: FieldKind::DateRange,
            target: ColumnRef::base("created"),
        },
    ],
    relations: &[
        RelationDef {
            name: "owner",
            table: "accounts",
            parent: None,
            local_column: "account_id",
            foreign_column: "id",
        },
        RelationDef {
            name: "type_detail",
            table: "investment_type_details",
            parent: None,
            local_column: "type_detail_id",
            foreign_column: "id",
        },
        RelationDef {
            name: "itype",
            table: "investment_types",
            parent: Some("type_detail"),
            local_column: "type_id",
            foreign_column: "id",
        },
        RelationDef {
            name: "icategory",
            table: "investment_categories",
            parent: Some("type_detail"),
            local_column: "category_id",
            foreign_column: "id",
        },
    ],
    extras: &[
        (ColumnRef::joined("owner", "uname"), "owner_uname"),
        (ColumnRef::joined("itype", "name"), "type_name"),
        (ColumnRef::joined("icategory", "name"), "category_name"),
    ],
    sortable: &["id", "amount", "status", "created"],
    default_sort: "id",
};

static TAX_TYPE_VIEW: EntityView = EntityView {
    kind: EntityKind::TaxType,
    base_table: "tax_types",
    id_column: "id",
    search_columns: &[ColumnRef::base("name")],
    fields: &[
        FieldBinding {
            param: "status",
            kind: FieldKind::Equality,
            target: ColumnRef::base("status"),
        },
        FieldBinding {
            param: "rate",
            kind: FieldKind::Range,
            target: ColumnRef::base("rate"),
        },
        FieldBinding {
            param: "created",
            kind: FieldKind::DateRange,
            target: ColumnRef::base("created"),
        },
    ],
    relations: &[],
    extras: &[],
    sortable: &["id", "name", "rate", "status", "created"],
    default_sort: "id",
};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn every_view_sorts_by_a_whitelisted_default() {
        for kind in [
            EntityKind::Account,
            EntityKind::Business,
            EntityKind::Investment,
            EntityKind::TaxType,
        ] {
            let view = kind.view();
            assert!(
                view.sortable.contains(&view.default_sort),
                "{kind:?} default sort must be whitelisted"
            );
        }
    }

    #[test]
    fn relations_are_declared_parents_first() {
        for kind in [EntityKind::Business, EntityKind::Investment] {
            let view = kind.view();
            for (idx, rel) in view.relations.iter().enumerate() {
                if let Some(parent) = rel.parent {
                    let parent_idx = view
                        .relations
                        .iter()
                        .position(|r| r.name == parent)
                        .expect("parent relation must be declared");
                    assert!(parent_idx < idx, "{parent} must precede {}", rel.name);
                }
            }
        }
    }

    #[test]
    fn bindings_only_reference_declared_relations() {
        for kind in [
            EntityKind::Account,
            EntityKind::Business,
            EntityKind::Investment,
            EntityKind::TaxType,
        ] {
            let view = kind.view();
            let targets = view
                .fields
                .iter()
                .map(|b| b.target)
                .chain(view.search_columns.iter().copied())
                .chain(view.extras.iter().map(|(c, _)| *c));
            for target in targets {
                if let Some(rel) = target.relation {
                    assert!(view.relation(rel).is_some(), "undeclared relation {rel}");
                }
            }
        }
    }

    #[test]
    fn business_category_binding_targets_type_detail() {
        let view = EntityKind::Business.view();
        let binding = view.binding("category").unwrap();
        assert_eq!(binding.target.relation, Some("type_detail"));
        assert_eq!(binding.target.column, "category_id");
    }
}
