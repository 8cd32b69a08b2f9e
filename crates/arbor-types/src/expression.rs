//! Caveat expression trees.
//!
//! A [`CaveatExpr`] is an immutable boolean combination of caveat
//! references. The tree preserves exactly the shape its builders produce:
//! there is no flattening of nested ORs, no de-duplication of equivalent
//! subtrees, no normal form. Debug traces and tests compare expressions
//! structurally, so a predictable shape is part of the contract.
//!
//! Identity-based simplification (`⊤ OR x = ⊤` and friends) lives in
//! [`Guard`](crate::Guard), not here: the builders in this module always
//! wrap their operands.

use serde::{Deserialize, Serialize};

use crate::caveat::CaveatRef;

/// Boolean operator of an expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpKind {
    /// At least one child must hold.
    Or,
    /// Every child must hold.
    And,
    /// The single child must not hold.
    Not,
}

/// An immutable boolean combination of caveat references.
///
/// "Unconditionally true" (`⊤`) is deliberately not a value of this type;
/// it is represented by the enclosing layer (an absent expression on the
/// wire, [`Guard::Always`](crate::Guard::Always) in the combinator
/// algebra, a determined entry in a membership set).
///
/// # Structural Equality
///
/// Equality is deep and shape-sensitive: `OR(a, b)` and `OR(b, a)` are
/// different values.
///
/// # Example
///
/// ```
/// use arbor_types::{CaveatExpr, CaveatRef};
///
/// let c1 = CaveatExpr::leaf(CaveatRef::new("c1"));
/// let c2 = CaveatExpr::leaf(CaveatRef::new("c2"));
///
/// let either = CaveatExpr::or(c1.clone(), c2.clone());
/// assert_ne!(either, CaveatExpr::or(c2, c1));
/// assert_eq!(either.to_string(), "(c1 || c2)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaveatExpr {
    /// A single caveat reference.
    Leaf(CaveatRef),
    /// A boolean combination of child expressions.
    Op {
        /// The operator applied to the children.
        kind: OpKind,
        /// Operands, in the order they were combined. OR and AND carry at
        /// least one child; NOT carries exactly one.
        children: Vec<CaveatExpr>,
    },
}

impl CaveatExpr {
    /// Wraps a caveat reference as an expression.
    #[must_use]
    pub fn leaf(caveat: CaveatRef) -> Self {
        Self::Leaf(caveat)
    }

    /// Builds `OR(first, second)`, preserving operand order.
    #[must_use]
    pub fn or(first: Self, second: Self) -> Self {
        Self::Op {
            kind: OpKind::Or,
            children: vec![first, second],
        }
    }

    /// Builds `AND(first, second)`, preserving operand order.
    #[must_use]
    pub fn and(first: Self, second: Self) -> Self {
        Self::Op {
            kind: OpKind::And,
            children: vec![first, second],
        }
    }

    /// Builds `NOT(expr)`.
    #[must_use]
    pub fn invert(expr: Self) -> Self {
        Self::Op {
            kind: OpKind::Not,
            children: vec![expr],
        }
    }

    /// Returns `true` if this is a single caveat reference.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}

impl From<CaveatRef> for CaveatExpr {
    fn from(caveat: CaveatRef) -> Self {
        Self::Leaf(caveat)
    }
}

impl std::fmt::Display for CaveatExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf(caveat) => write!(f, "{caveat}"),
            Self::Op { kind, children } => match kind {
                OpKind::Not => match children.first() {
                    Some(child) => write!(f, "!({child})"),
                    None => write!(f, "!()"),
                },
                OpKind::Or | OpKind::And => {
                    let sep = if *kind == OpKind::Or { " || " } else { " && " };
                    write!(f, "(")?;
                    for (i, child) in children.iter().enumerate() {
                        if i > 0 {
                            write!(f, "{sep}")?;
                        }
                        write!(f, "{child}")?;
                    }
                    write!(f, ")")
                }
            },
        }
    }
}
