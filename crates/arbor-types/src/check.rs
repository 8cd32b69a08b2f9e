//! Wire-form check results.
//!
//! The dispatcher forwards sub-queries across nodes and hands their
//! results to the graph walker as a map of resource id to
//! [`CheckResult`]. These types fix the semantic fields of that map; the
//! exact framing is the transport layer's concern.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::expression::CaveatExpr;

/// Wire form of a permission-check response: resource id → result.
///
/// Resources that are not members are not serialized.
pub type CheckResultsMap = HashMap<String, CheckResult>;

/// Membership kind of a single resource in a check response.
///
/// # Wire Names
///
/// | Variant | Wire name |
/// |---------|-----------|
/// | [`Unspecified`](Self::Unspecified) | `UNSPECIFIED` |
/// | [`Member`](Self::Member) | `MEMBER` |
/// | [`CaveatedMember`](Self::CaveatedMember) | `CAVEATED_MEMBER` |
/// | [`NotMember`](Self::NotMember) | `NOT_MEMBER` |
///
/// `Unspecified` is the zero value a skewed or corrupted peer can
/// produce; the adapter rejects it loudly rather than guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Membership {
    /// Zero value; never produced by a well-formed resolver.
    Unspecified,
    /// The resource is a member unconditionally.
    Member,
    /// The resource is a member iff the attached expression holds.
    CaveatedMember,
    /// The resource is not a member.
    NotMember,
}

impl Membership {
    /// Returns the wire name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Member => "MEMBER",
            Self::CaveatedMember => "CAVEATED_MEMBER",
            Self::NotMember => "NOT_MEMBER",
        }
    }
}

impl std::fmt::Display for Membership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The check result for a single resource.
///
/// A determined member carries no expression; a caveated member carries
/// the expression that must evaluate true for membership to hold.
///
/// # Example
///
/// ```
/// use arbor_types::{CaveatExpr, CaveatRef, CheckResult, Membership};
///
/// let member = CheckResult::member();
/// assert_eq!(member.membership, Membership::Member);
/// assert!(member.expression.is_none());
///
/// let caveated = CheckResult::caveated_member(
///     CaveatExpr::leaf(CaveatRef::new("on_vpn")),
/// );
/// assert!(caveated.is_caveated_member());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Membership kind for the resource.
    pub membership: Membership,

    /// Expression guarding membership; present iff the membership is
    /// caveated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<CaveatExpr>,
}

impl CheckResult {
    /// A determined member.
    #[must_use]
    pub fn member() -> Self {
        Self {
            membership: Membership::Member,
            expression: None,
        }
    }

    /// A member conditional on `expression`.
    #[must_use]
    pub fn caveated_member(expression: CaveatExpr) -> Self {
        Self {
            membership: Membership::CaveatedMember,
            expression: Some(expression),
        }
    }

    /// Not a member.
    #[must_use]
    pub fn not_member() -> Self {
        Self {
            membership: Membership::NotMember,
            expression: None,
        }
    }

    /// Returns `true` for a determined member.
    #[must_use]
    pub fn is_member(&self) -> bool {
        self.membership == Membership::Member
    }

    /// Returns `true` for a caveated member.
    #[must_use]
    pub fn is_caveated_member(&self) -> bool {
        self.membership == Membership::CaveatedMember
    }
}
