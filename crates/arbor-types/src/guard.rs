//! Three-valued membership guards and their combinators.
//!
//! Every fan-in of the permission graph combines per-branch membership
//! results with boolean operators. The operands are not plain booleans:
//! a branch may prove membership unconditionally, disprove it, or leave
//! it hanging on a caveat expression. [`Guard`] is that three-valued
//! operand, and its combinators perform exactly the identity-based
//! simplifications the set algebra relies on.
//!
//! | Guard | Meaning |
//! |-------|---------|
//! | [`Always`](Guard::Always) | membership holds unconditionally (`⊤`) |
//! | [`Never`](Guard::Never) | membership does not hold |
//! | [`When(e)`](Guard::When) | membership holds iff `e` evaluates true |
//!
//! `Always` and `Never` are distinct from each other and from any
//! expression; collapsing them into one "no expression" state is the
//! classic soundness bug this type exists to prevent. In practice the
//! membership layer only ever *feeds in* `Always` or `When`; `Never`
//! arises inside the algebra as an identity (an id absent from the other
//! operand's map) and as the result of inverting `Always`.

use crate::expression::CaveatExpr;

/// A three-valued condition guarding membership.
///
/// # Combinator Laws
///
/// The combinators simplify identities only; whenever both operands carry
/// expressions, a new node is synthesized with operands in argument
/// order. No boolean-algebra normalization is attempted.
///
/// # Example
///
/// ```
/// use arbor_types::{CaveatExpr, CaveatRef, Guard};
///
/// let c1 = || Guard::when(CaveatExpr::leaf(CaveatRef::new("c1")));
///
/// // Identities collapse without synthesizing nodes.
/// assert!(Guard::Always.or(c1()).is_always());
/// assert_eq!(Guard::Always.and(c1()), c1());
/// assert!(Guard::Always.invert().is_never());
///
/// // Two expressions synthesize a node, operands in argument order.
/// let c2 = Guard::when(CaveatExpr::leaf(CaveatRef::new("c2")));
/// let Guard::When(expr) = c1().and(c2) else { unreachable!() };
/// assert_eq!(expr.to_string(), "(c1 && c2)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Guard {
    /// Membership holds unconditionally.
    Always,
    /// Membership does not hold.
    Never,
    /// Membership holds iff the expression evaluates true.
    When(CaveatExpr),
}

impl Guard {
    /// Wraps an expression as a conditional guard.
    #[must_use]
    pub fn when(expr: CaveatExpr) -> Self {
        Self::When(expr)
    }

    /// Builds a guard from an optional caveat, under the API convention
    /// that an absent caveat means membership is unconditional.
    ///
    /// `Never` cannot be produced this way; it only arises inside the
    /// algebra.
    #[must_use]
    pub fn from_caveat(caveat: Option<CaveatExpr>) -> Self {
        match caveat {
            Some(expr) => Self::When(expr),
            None => Self::Always,
        }
    }

    /// Returns `true` if membership holds unconditionally.
    #[must_use]
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Returns `true` if membership does not hold.
    #[must_use]
    pub fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }

    /// Disjunction: membership holds if either guard admits it.
    ///
    /// `Always` absorbs; `Never` is the identity; two expressions
    /// synthesize `OR(self, other)`.
    #[must_use]
    pub fn or(self, other: Guard) -> Guard {
        match (self, other) {
            (Self::Always, _) | (_, Self::Always) => Self::Always,
            (Self::Never, g) | (g, Self::Never) => g,
            (Self::When(a), Self::When(b)) => Self::When(CaveatExpr::or(a, b)),
        }
    }

    /// Conjunction: membership holds only if both guards admit it.
    ///
    /// `Always` is the identity; `Never` absorbs; two expressions
    /// synthesize `AND(self, other)`.
    #[must_use]
    pub fn and(self, other: Guard) -> Guard {
        match (self, other) {
            (Self::Never, _) | (_, Self::Never) => Self::Never,
            (Self::Always, g) | (g, Self::Always) => g,
            (Self::When(a), Self::When(b)) => Self::When(CaveatExpr::and(a, b)),
        }
    }

    /// Negation: membership holds iff it did not before.
    ///
    /// `Always` and `Never` swap; an expression synthesizes `NOT(self)`.
    #[must_use]
    pub fn invert(self) -> Guard {
        match self {
            Self::Always => Self::Never,
            Self::Never => Self::Always,
            Self::When(e) => Self::When(CaveatExpr::invert(e)),
        }
    }
}
