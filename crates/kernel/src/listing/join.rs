//! Per-request join strictness resolution.
//!
//! A relation must be joined strictly (inner) when some active filter
//! targets one of its columns, so the store evaluates the predicate as part
//! of the row match. With no such filter it must be joined loosely (left),
//! otherwise base rows with no related row — a business whose type detail
//! was deleted — would silently vanish from the listing. The plan is
//! recomputed for every request and never cached.

use std::collections::HashSet;

use super::entity::EntityView;
use super::filter::FilterSpec;

/// Join semantics for one relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Inner join: the related row must exist and match.
    Strict,
    /// Left join: base rows survive a missing related row.
    Loose,
}

/// The resolved strictness of every relation a view declares, in
/// declaration order.
#[derive(Debug, Clone)]
pub struct JoinPlan {
    entries: Vec<(&'static str, Strictness)>,
}

impl JoinPlan {
    /// Resolve strictness from the filters active in `spec`.
    ///
    /// A relation is strict when a filter addresses a column on it or on
    /// any relation whose parent chain passes through it: filtering a
    /// grandchild forces the whole chain inner, since the predicate is
    /// only evaluable when every link matches.
    pub fn resolve(view: &EntityView, spec: &FilterSpec) -> Self {
        let mut strict: HashSet<&'static str> = HashSet::new();

        for column in spec.constrained_columns(view) {
            let mut current = column.relation;
            while let Some(name) = current {
                if !strict.insert(name) {
                    break;
                }
                current = view.relation(name).and_then(|r| r.parent);
            }
        }

        let entries = view
            .relations
            .iter()
            .map(|rel| {
                let strictness = if strict.contains(rel.name) {
                    Strictness::Strict
                } else {
                    Strictness::Loose
                };
                (rel.name, strictness)
            })
            .collect();

        Self { entries }
    }

    /// Strictness for a named relation, if the view declares it.
    pub fn strictness(&self, name: &str) -> Option<Strictness> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, s)| *s)
    }

    /// Whether the named relation resolved strict.
    pub fn is_strict(&self, name: &str) -> bool {
        self.strictness(name) == Some(Strictness::Strict)
    }

    /// Relations in declaration order with their strictness.
    pub fn entries(&self) -> &[(&'static str, Strictness)] {
        &self.entries
    }
}
