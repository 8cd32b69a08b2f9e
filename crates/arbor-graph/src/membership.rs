//! Membership sets with conditional membership.
//!
//! A [`MembershipSet`] is the working state of one node in the
//! permission graph during resolution: for every candidate resource, is
//! it a member of the permission set, and under what condition? The
//! walker issues sub-queries, converts each returned wire map into set
//! form, and folds the results together with [`union_with`],
//! [`intersect_with`], and [`subtract`] as the permission expression
//! dictates.
//!
//! [`union_with`]: MembershipSet::union_with
//! [`intersect_with`]: MembershipSet::intersect_with
//! [`subtract`]: MembershipSet::subtract
//!
//! # Merge Semantics
//!
//! Every pairwise merge is the [`Guard`] algebra applied to the two
//! sides' entries, reading an id absent from a map as `Never`, a
//! determined entry as `Always`, and a conditional entry as its
//! expression:
//!
//! | operation | merged guard |
//! |-----------|--------------|
//! | union | `self OR other` |
//! | intersect | `self AND other` |
//! | subtract | `self AND NOT(other)` |
//!
//! The guard identities then reproduce the full merge table: a
//! determined member absorbs any caveat on union, passes the other
//! side through on intersection, and fully excludes on subtraction.
//! Operand order inside synthesized expressions is always
//! `(self, other)`; it is observable through structural equality and
//! debug traces, and tests rely on it.
//!
//! # Ownership
//!
//! A set is owned by exactly one combining task at a time and mutated in
//! place; nothing here is thread-safe, by contract with the walker.

use std::collections::HashMap;
use std::mem;

use arbor_types::{CaveatExpr, CheckResult, CheckResultsMap, Guard, Membership};

use crate::error::ResolutionError;

/// Membership status of a single resource in the set.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// The resource is a member unconditionally.
    Determined,
    /// The resource is a member iff the expression evaluates true.
    Conditional(CaveatExpr),
}

impl Entry {
    /// Returns `true` for an unconditional member.
    #[must_use]
    pub fn is_determined(&self) -> bool {
        matches!(self, Self::Determined)
    }

    /// Returns the guarding expression of a conditional member.
    #[must_use]
    pub fn expression(&self) -> Option<&CaveatExpr> {
        match self {
            Self::Determined => None,
            Self::Conditional(expr) => Some(expr),
        }
    }

    fn into_guard(self) -> Guard {
        match self {
            Self::Determined => Guard::Always,
            Self::Conditional(expr) => Guard::When(expr),
        }
    }

    fn from_guard(guard: Guard) -> Option<Self> {
        match guard {
            Guard::Always => Some(Self::Determined),
            Guard::When(expr) => Some(Self::Conditional(expr)),
            Guard::Never => None,
        }
    }
}

/// Reads a wire entry as a guard.
///
/// Presence in the map is membership; the expression alone decides
/// whether it is conditional. Membership kinds are enumerated only by
/// the adapter ([`MembershipSet::from_check_results_map`]).
fn incoming_guard(result: &CheckResult) -> Guard {
    match &result.expression {
        Some(expr) => Guard::When(expr.clone()),
        None => Guard::Always,
    }
}

/// A set of resources with determined or conditional membership.
///
/// Keys are resource ids; insertion order is not significant. Sets are
/// constructed empty or from a wire map, mutated in place by the algebra
/// operations, and rendered back to wire form when resolution of the
/// node completes.
///
/// # Example
///
/// ```
/// use arbor_graph::MembershipSet;
/// use arbor_types::{CaveatExpr, CaveatRef};
///
/// let mut readers = MembershipSet::new();
/// readers.add_direct_member("plan", None);
/// readers.add_direct_member(
///     "report",
///     Some(CaveatExpr::leaf(CaveatRef::new("during_business_hours"))),
/// );
///
/// let mut editors = MembershipSet::new();
/// editors.add_direct_member("report", None);
///
/// // Only `report` survives the intersection, caveat intact.
/// readers.intersect_with(&editors.as_check_results_map());
/// assert_eq!(readers.len(), 1);
/// assert!(!readers.has_determined_member());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MembershipSet {
    members_by_id: HashMap<String, Entry>,
}

impl MembershipSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from an expressions-by-id mapping, where an absent
    /// expression means the member is determined.
    pub fn from_expressions<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<CaveatExpr>)>,
        S: Into<String>,
    {
        let members_by_id = members
            .into_iter()
            .map(|(id, expr)| {
                let entry = match expr {
                    Some(expr) => Entry::Conditional(expr),
                    None => Entry::Determined,
                };
                (id.into(), entry)
            })
            .collect();
        Self { members_by_id }
    }

    /// Builds a set from a wire check-results map.
    ///
    /// `NOT_MEMBER` entries are omitted. A `CAVEATED_MEMBER` without an
    /// expression is treated as determined.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::UnrecognizedMembership`] if an entry
    /// carries a membership kind outside the known three.
    pub fn from_check_results_map(results: &CheckResultsMap) -> Result<Self, ResolutionError> {
        let mut set = Self::new();
        for (id, result) in results {
            let entry = match result.membership {
                Membership::Member => Entry::Determined,
                Membership::CaveatedMember => match &result.expression {
                    Some(expr) => Entry::Conditional(expr.clone()),
                    None => Entry::Determined,
                },
                Membership::NotMember => continue,
                Membership::Unspecified => {
                    return Err(ResolutionError::UnrecognizedMembership {
                        resource_id: id.clone(),
                    });
                }
            };
            set.members_by_id.insert(id.clone(), entry);
        }
        Ok(set)
    }

    /// Adds a resource reached by a direct membership edge.
    ///
    /// An absent caveat means the member is determined. A resource is a
    /// member if *any* path justifies membership, so a repeated add ORs
    /// the new justification onto the existing one: a determined entry
    /// stays determined, and two caveats combine as
    /// `OR(existing, incoming)`.
    pub fn add_direct_member(&mut self, resource_id: impl Into<String>, caveat: Option<CaveatExpr>) {
        self.merge_member(resource_id.into(), Guard::from_caveat(caveat));
    }

    /// Adds a resource reached transitively via a parent relationship.
    ///
    /// The relationship itself may carry a caveat; membership then
    /// requires both the edge's caveat and the downstream resource's
    /// caveat, conjoined as `AND(relationship, resource)`, with the edge
    /// condition first. The conjunction merges into the set under the
    /// same policy as [`add_direct_member`](Self::add_direct_member).
    pub fn add_member_via_relationship(
        &mut self,
        resource_id: impl Into<String>,
        resource_caveat: Option<CaveatExpr>,
        relationship_caveat: Option<CaveatExpr>,
    ) {
        let via = Guard::from_caveat(relationship_caveat).and(Guard::from_caveat(resource_caveat));
        self.merge_member(resource_id.into(), via);
    }

    /// Unions the wire results into this set.
    ///
    /// Ids only in `results` are inserted; overlapping ids merge with
    /// `OR(existing, incoming)`, so a determined side wins outright.
    pub fn union_with(&mut self, results: &CheckResultsMap) {
        for (id, result) in results {
            self.merge_member(id.clone(), incoming_guard(result));
        }
    }

    /// Intersects this set with the wire results.
    ///
    /// Ids absent from `results` are removed. Overlapping ids merge
    /// with `AND(self, other)`: a determined side passes the other side
    /// through, and two caveats conjoin in `(self, other)` order.
    pub fn intersect_with(&mut self, results: &CheckResultsMap) {
        let members = mem::take(&mut self.members_by_id);
        for (id, entry) in members {
            let other = results.get(&id).map_or(Guard::Never, incoming_guard);
            if let Some(entry) = Entry::from_guard(entry.into_guard().and(other)) {
                self.members_by_id.insert(id, entry);
            }
        }
    }

    /// Excludes the wire results from this set.
    ///
    /// Each overlapping id merges with `AND(self, NOT(other))`: a
    /// determined exclusion removes the member outright, while a
    /// caveated exclusion leaves membership conditional on the exclusion
    /// *not* firing. Ids absent from `results` are unchanged.
    pub fn subtract(&mut self, results: &CheckResultsMap) {
        let members = mem::take(&mut self.members_by_id);
        for (id, entry) in members {
            let excluded = results.get(&id).map_or(Guard::Never, incoming_guard);
            if let Some(entry) = Entry::from_guard(entry.into_guard().and(excluded.invert())) {
                self.members_by_id.insert(id, entry);
            }
        }
    }

    /// Returns `true` if at least one member is determined.
    #[must_use]
    pub fn has_determined_member(&self) -> bool {
        self.members_by_id.values().any(Entry::is_determined)
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members_by_id.is_empty()
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members_by_id.len()
    }

    /// Returns the entry for a resource, if it is a member.
    #[must_use]
    pub fn get(&self, resource_id: &str) -> Option<&Entry> {
        self.members_by_id.get(resource_id)
    }

    /// Iterates over the member resource ids, in no particular order.
    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        self.members_by_id.keys().map(String::as_str)
    }

    /// Renders the set in wire form.
    ///
    /// Determined members serialize as `MEMBER` with no expression,
    /// conditional members as `CAVEATED_MEMBER` with their expression.
    /// Non-members are simply absent.
    #[must_use]
    pub fn as_check_results_map(&self) -> CheckResultsMap {
        self.members_by_id
            .iter()
            .map(|(id, entry)| {
                let result = match entry {
                    Entry::Determined => CheckResult::member(),
                    Entry::Conditional(expr) => CheckResult::caveated_member(expr.clone()),
                };
                (id.clone(), result)
            })
            .collect()
    }

    fn merge_member(&mut self, id: String, incoming: Guard) {
        let existing = self
            .members_by_id
            .remove(&id)
            .map_or(Guard::Never, Entry::into_guard);
        if let Some(entry) = Entry::from_guard(existing.or(incoming)) {
            self.members_by_id.insert(id, entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_types::CaveatRef;
    use serde_json::Value;

    fn caveat(name: &str) -> CaveatExpr {
        CaveatExpr::leaf(CaveatRef::new(name))
    }

    fn caveat_with(name: &str, context: Value) -> CaveatExpr {
        let Value::Object(map) = context else {
            panic!("expected object context");
        };
        CaveatExpr::leaf(CaveatRef::with_context(name, map))
    }

    fn set(members: Vec<(&str, Option<CaveatExpr>)>) -> MembershipSet {
        MembershipSet::from_expressions(members)
    }

    // -- add_direct_member --------------------------------------------------

    #[test]
    fn add_determined_member_to_empty_set() {
        let mut ms = MembershipSet::new();
        ms.add_direct_member("somedoc", None);
        assert_eq!(ms, set(vec![("somedoc", None)]));
        assert!(ms.has_determined_member());
        assert!(!ms.is_empty());
    }

    #[test]
    fn add_caveated_member_to_empty_set() {
        let mut ms = MembershipSet::new();
        ms.add_direct_member("somedoc", Some(caveat("somecaveat")));
        assert_eq!(ms, set(vec![("somedoc", Some(caveat("somecaveat")))]));
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn add_caveated_member_alongside_existing_members() {
        let mut ms = set(vec![("somedoc", Some(caveat("somecaveat")))]);
        ms.add_direct_member("anotherdoc", Some(caveat("anothercaveat")));
        assert_eq!(
            ms,
            set(vec![
                ("somedoc", Some(caveat("somecaveat"))),
                ("anotherdoc", Some(caveat("anothercaveat"))),
            ]),
        );
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn determined_add_upgrades_caveated_member() {
        let mut ms = set(vec![("somedoc", Some(caveat("somecaveat")))]);
        ms.add_direct_member("somedoc", None);
        assert_eq!(ms, set(vec![("somedoc", None)]));
        assert!(ms.has_determined_member());
    }

    #[test]
    fn determined_member_swallows_new_caveat() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.add_direct_member("somedoc", Some(caveat("somecaveat")));
        assert_eq!(ms, set(vec![("somedoc", None)]));
        assert!(ms.has_determined_member());
    }

    #[test]
    fn caveats_on_same_id_combine_with_or() {
        let mut ms = set(vec![("somedoc", Some(caveat("c1")))]);
        ms.add_direct_member("somedoc", Some(caveat("c2")));
        assert_eq!(
            ms,
            set(vec![(
                "somedoc",
                Some(CaveatExpr::or(caveat("c1"), caveat("c2"))),
            )]),
        );
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn same_caveat_name_different_context_still_combines() {
        let mut ms = set(vec![("somedoc", Some(caveat("c1")))]);
        ms.add_direct_member(
            "somedoc",
            Some(caveat_with("c1", serde_json::json!({"hi": "hello"}))),
        );
        assert_eq!(
            ms,
            set(vec![(
                "somedoc",
                Some(CaveatExpr::or(
                    caveat("c1"),
                    caveat_with("c1", serde_json::json!({"hi": "hello"})),
                )),
            )]),
        );
    }

    // -- add_member_via_relationship ----------------------------------------

    #[test]
    fn via_relationship_determined_member() {
        let mut ms = MembershipSet::new();
        ms.add_member_via_relationship("somedoc", None, None);
        assert_eq!(ms, set(vec![("somedoc", None)]));
        assert!(ms.has_determined_member());
    }

    #[test]
    fn via_relationship_resource_caveat_only() {
        let mut ms = MembershipSet::new();
        ms.add_member_via_relationship("somedoc", Some(caveat("somecaveat")), None);
        assert_eq!(ms, set(vec![("somedoc", Some(caveat("somecaveat")))]));
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn via_relationship_edge_caveat_only() {
        let mut ms = MembershipSet::new();
        ms.add_member_via_relationship("somedoc", None, Some(caveat("somecaveat")));
        assert_eq!(ms, set(vec![("somedoc", Some(caveat("somecaveat")))]));
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn via_relationship_conjoins_edge_before_resource() {
        let mut ms = MembershipSet::new();
        ms.add_member_via_relationship("somedoc", Some(caveat("c1")), Some(caveat("c2")));
        assert_eq!(
            ms,
            set(vec![(
                "somedoc",
                Some(CaveatExpr::and(caveat("c2"), caveat("c1"))),
            )]),
        );
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn via_relationship_into_determined_set_stays_determined() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.add_member_via_relationship("somedoc", Some(caveat("c1")), Some(caveat("c2")));
        assert_eq!(ms, set(vec![("somedoc", None)]));
        assert!(ms.has_determined_member());
    }

    #[test]
    fn via_relationship_merges_into_existing_caveat() {
        let mut ms = set(vec![("somedoc", Some(caveat("c0")))]);
        ms.add_member_via_relationship("somedoc", Some(caveat("c1")), Some(caveat("c2")));
        assert_eq!(
            ms,
            set(vec![(
                "somedoc",
                Some(CaveatExpr::or(
                    caveat("c0"),
                    CaveatExpr::and(caveat("c2"), caveat("c1")),
                )),
            )]),
        );
        assert!(!ms.has_determined_member());
    }

    // -- union_with ---------------------------------------------------------

    #[test]
    fn union_empty_with_empty() {
        let mut ms = MembershipSet::new();
        ms.union_with(&MembershipSet::new().as_check_results_map());
        assert!(ms.is_empty());
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn union_with_empty_is_identity() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.union_with(&MembershipSet::new().as_check_results_map());
        assert_eq!(ms, set(vec![("somedoc", None)]));
        assert!(ms.has_determined_member());
    }

    #[test]
    fn union_of_empty_adopts_other() {
        let mut ms = MembershipSet::new();
        ms.union_with(&set(vec![("somedoc", None)]).as_check_results_map());
        assert_eq!(ms, set(vec![("somedoc", None)]));
        assert!(ms.has_determined_member());
    }

    #[test]
    fn union_non_overlapping() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.union_with(
            &set(vec![("anotherdoc", Some(caveat("c1")))]).as_check_results_map(),
        );
        assert_eq!(
            ms,
            set(vec![("somedoc", None), ("anotherdoc", Some(caveat("c1")))]),
        );
        assert!(ms.has_determined_member());
    }

    #[test]
    fn union_overlapping_determined() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.union_with(&set(vec![("somedoc", None)]).as_check_results_map());
        assert_eq!(ms, set(vec![("somedoc", None)]));
    }

    #[test]
    fn union_determined_absorbs_incoming_caveat() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.union_with(&set(vec![("somedoc", Some(caveat("c1")))]).as_check_results_map());
        assert_eq!(ms, set(vec![("somedoc", None)]));
        assert!(ms.has_determined_member());
    }

    #[test]
    fn union_incoming_determined_absorbs_caveat() {
        let mut ms = set(vec![("somedoc", Some(caveat("c1")))]);
        ms.union_with(&set(vec![("somedoc", None)]).as_check_results_map());
        assert_eq!(ms, set(vec![("somedoc", None)]));
        assert!(ms.has_determined_member());
    }

    #[test]
    fn union_combines_caveats_with_or() {
        let mut ms = set(vec![("somedoc", Some(caveat("c1")))]);
        ms.union_with(&set(vec![("somedoc", Some(caveat("c2")))]).as_check_results_map());
        assert_eq!(
            ms,
            set(vec![(
                "somedoc",
                Some(CaveatExpr::or(caveat("c1"), caveat("c2"))),
            )]),
        );
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn union_preserves_unrelated_determined_member() {
        let mut ms = set(vec![("somedoc", Some(caveat("c1"))), ("anotherdoc", None)]);
        ms.union_with(&set(vec![("somedoc", Some(caveat("c2")))]).as_check_results_map());
        assert_eq!(
            ms,
            set(vec![
                ("anotherdoc", None),
                ("somedoc", Some(CaveatExpr::or(caveat("c1"), caveat("c2")))),
            ]),
        );
        assert!(ms.has_determined_member());
    }

    // -- intersect_with -----------------------------------------------------

    #[test]
    fn intersect_with_empty_is_empty() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.intersect_with(&MembershipSet::new().as_check_results_map());
        assert!(ms.is_empty());
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn intersect_of_empty_is_empty() {
        let mut ms = MembershipSet::new();
        ms.intersect_with(&set(vec![("somedoc", None)]).as_check_results_map());
        assert!(ms.is_empty());
    }

    #[test]
    fn intersect_non_overlapping_is_empty() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.intersect_with(&set(vec![("anotherdoc", None)]).as_check_results_map());
        assert!(ms.is_empty());
    }

    #[test]
    fn intersect_determined_with_determined() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.intersect_with(&set(vec![("somedoc", None)]).as_check_results_map());
        assert_eq!(ms, set(vec![("somedoc", None)]));
        assert!(ms.has_determined_member());
    }

    #[test]
    fn intersect_partial_overlap_keeps_common_ids() {
        let mut ms = set(vec![("somedoc", None), ("anotherdoc", None)]);
        ms.intersect_with(&set(vec![("anotherdoc", None)]).as_check_results_map());
        assert_eq!(ms, set(vec![("anotherdoc", None)]));
    }

    #[test]
    fn intersect_determined_passes_incoming_caveat() {
        let mut ms = set(vec![("anotherdoc", None)]);
        ms.intersect_with(
            &set(vec![("somedoc", None), ("anotherdoc", Some(caveat("c2")))])
                .as_check_results_map(),
        );
        assert_eq!(ms, set(vec![("anotherdoc", Some(caveat("c2")))]));
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn intersect_incoming_determined_passes_existing_caveat() {
        let mut ms = set(vec![("anotherdoc", Some(caveat("c1")))]);
        ms.intersect_with(
            &set(vec![("somedoc", None), ("anotherdoc", None)]).as_check_results_map(),
        );
        assert_eq!(ms, set(vec![("anotherdoc", Some(caveat("c1")))]));
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn intersect_conjoins_caveats_in_order() {
        let mut ms = set(vec![("anotherdoc", Some(caveat("c1")))]);
        ms.intersect_with(
            &set(vec![("somedoc", None), ("anotherdoc", Some(caveat("c2")))])
                .as_check_results_map(),
        );
        assert_eq!(
            ms,
            set(vec![(
                "anotherdoc",
                Some(CaveatExpr::and(caveat("c1"), caveat("c2"))),
            )]),
        );
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn intersect_mixed_determined_and_caveated() {
        let mut ms = set(vec![
            ("somedoc", None),
            ("thirddoc", None),
            ("anotherdoc", Some(caveat("c1"))),
        ]);
        ms.intersect_with(
            &set(vec![("somedoc", None), ("anotherdoc", Some(caveat("c2")))])
                .as_check_results_map(),
        );
        assert_eq!(
            ms,
            set(vec![
                ("somedoc", None),
                ("anotherdoc", Some(CaveatExpr::and(caveat("c1"), caveat("c2")))),
            ]),
        );
        assert!(ms.has_determined_member());
    }

    // -- subtract -----------------------------------------------------------

    #[test]
    fn subtract_empty_from_empty() {
        let mut ms = MembershipSet::new();
        ms.subtract(&MembershipSet::new().as_check_results_map());
        assert!(ms.is_empty());
    }

    #[test]
    fn subtract_from_empty_is_empty() {
        let mut ms = MembershipSet::new();
        ms.subtract(&set(vec![("somedoc", None)]).as_check_results_map());
        assert!(ms.is_empty());
    }

    #[test]
    fn subtract_empty_is_identity() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.subtract(&MembershipSet::new().as_check_results_map());
        assert_eq!(ms, set(vec![("somedoc", None)]));
        assert!(ms.has_determined_member());
    }

    #[test]
    fn subtract_non_overlapping_unchanged() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.subtract(&set(vec![("anotherdoc", None)]).as_check_results_map());
        assert_eq!(ms, set(vec![("somedoc", None)]));
    }

    #[test]
    fn subtract_determined_removes_determined() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.subtract(&set(vec![("somedoc", None)]).as_check_results_map());
        assert!(ms.is_empty());
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn subtract_determined_removes_caveated() {
        let mut ms = set(vec![("somedoc", Some(caveat("c1")))]);
        ms.subtract(&set(vec![("somedoc", None)]).as_check_results_map());
        assert!(ms.is_empty());
    }

    #[test]
    fn subtract_caveated_from_determined_inverts() {
        let mut ms = set(vec![("somedoc", None)]);
        ms.subtract(&set(vec![("somedoc", Some(caveat("c2")))]).as_check_results_map());
        assert_eq!(
            ms,
            set(vec![("somedoc", Some(CaveatExpr::invert(caveat("c2"))))]),
        );
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn subtract_caveated_from_caveated() {
        let mut ms = set(vec![("somedoc", Some(caveat("c1")))]);
        ms.subtract(&set(vec![("somedoc", Some(caveat("c2")))]).as_check_results_map());
        assert_eq!(
            ms,
            set(vec![(
                "somedoc",
                Some(CaveatExpr::and(
                    caveat("c1"),
                    CaveatExpr::invert(caveat("c2")),
                )),
            )]),
        );
        assert!(!ms.has_determined_member());
    }

    #[test]
    fn subtract_preserves_unrelated_members() {
        let mut ms = set(vec![("somedoc", Some(caveat("c1"))), ("anotherdoc", None)]);
        ms.subtract(&set(vec![("somedoc", Some(caveat("c2")))]).as_check_results_map());
        assert_eq!(
            ms,
            set(vec![
                ("anotherdoc", None),
                (
                    "somedoc",
                    Some(CaveatExpr::and(
                        caveat("c1"),
                        CaveatExpr::invert(caveat("c2")),
                    )),
                ),
            ]),
        );
        assert!(ms.has_determined_member());
    }

    #[test]
    fn subtract_overlapping_determined_members_removed() {
        let mut ms = set(vec![("somedoc", Some(caveat("c1"))), ("anotherdoc", None)]);
        ms.subtract(
            &set(vec![("somedoc", Some(caveat("c2"))), ("anotherdoc", None)])
                .as_check_results_map(),
        );
        assert_eq!(
            ms,
            set(vec![(
                "somedoc",
                Some(CaveatExpr::and(
                    caveat("c1"),
                    CaveatExpr::invert(caveat("c2")),
                )),
            )]),
        );
        assert!(!ms.has_determined_member());
    }

    // -- inspection ---------------------------------------------------------

    #[test]
    fn has_determined_member_soundness() {
        assert!(!MembershipSet::new().has_determined_member());
        assert!(!set(vec![("a", Some(caveat("c1")))]).has_determined_member());
        assert!(set(vec![("a", Some(caveat("c1"))), ("b", None)]).has_determined_member());
    }

    #[test]
    fn is_empty_soundness() {
        assert!(MembershipSet::new().is_empty());
        assert!(!set(vec![("a", None)]).is_empty());
    }

    #[test]
    fn len_counts_members() {
        assert_eq!(MembershipSet::new().len(), 0);
        assert_eq!(set(vec![("a", None), ("b", Some(caveat("c1")))]).len(), 2);
    }

    #[test]
    fn get_returns_entries() {
        let ms = set(vec![("a", None), ("b", Some(caveat("c1")))]);
        assert_eq!(ms.get("a"), Some(&Entry::Determined));
        assert_eq!(ms.get("b"), Some(&Entry::Conditional(caveat("c1"))));
        assert_eq!(ms.get("missing"), None);
        assert!(ms.get("a").is_some_and(Entry::is_determined));
        assert_eq!(ms.get("b").and_then(Entry::expression), Some(&caveat("c1")));
    }

    // -- adapter ------------------------------------------------------------

    #[test]
    fn wire_form_shapes() {
        let ms = set(vec![("a", None), ("b", Some(caveat("c1")))]);
        let wire = ms.as_check_results_map();
        assert_eq!(wire.len(), 2);
        assert_eq!(wire["a"], CheckResult::member());
        assert_eq!(wire["b"], CheckResult::caveated_member(caveat("c1")));
    }

    #[test]
    fn wire_round_trip() {
        let ms = set(vec![
            ("a", None),
            ("b", Some(caveat("c1"))),
            ("c", Some(CaveatExpr::or(caveat("c1"), caveat("c2")))),
        ]);
        let back = MembershipSet::from_check_results_map(&ms.as_check_results_map())
            .expect("round trip");
        assert_eq!(back, ms);
        assert_eq!(back.as_check_results_map(), ms.as_check_results_map());
    }

    #[test]
    fn from_map_skips_not_member_entries() {
        let mut wire = CheckResultsMap::new();
        wire.insert("a".to_string(), CheckResult::member());
        wire.insert("gone".to_string(), CheckResult::not_member());
        let ms = MembershipSet::from_check_results_map(&wire).expect("convert");
        assert_eq!(ms, set(vec![("a", None)]));
    }

    #[test]
    fn from_map_treats_missing_expression_as_determined() {
        let mut wire = CheckResultsMap::new();
        wire.insert(
            "a".to_string(),
            CheckResult {
                membership: Membership::CaveatedMember,
                expression: None,
            },
        );
        let ms = MembershipSet::from_check_results_map(&wire).expect("convert");
        assert_eq!(ms, set(vec![("a", None)]));
        assert!(ms.has_determined_member());
    }

    #[test]
    fn from_map_rejects_unspecified_membership() {
        let mut wire = CheckResultsMap::new();
        wire.insert(
            "somedoc".to_string(),
            CheckResult {
                membership: Membership::Unspecified,
                expression: None,
            },
        );
        assert_eq!(
            MembershipSet::from_check_results_map(&wire),
            Err(ResolutionError::UnrecognizedMembership {
                resource_id: "somedoc".to_string(),
            }),
        );
    }
}
