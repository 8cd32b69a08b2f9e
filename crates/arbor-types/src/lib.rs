//! Core types for Arbor, a relationship-graph permission resolver.
//!
//! This crate is the stable leaf of the Arbor workspace: the types a
//! dispatcher, datastore, or graph walker needs in order to exchange
//! permission-check results with the resolution core.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  arbor-types : CaveatRef, CaveatExpr, Guard, CheckResult     │ ◄── HERE
//! ├──────────────────────────────────────────────────────────────┤
//! │  arbor-graph : MembershipSet algebra, adapter, depth guard   │
//! └──────────────────────────────────────────────────────────────┘
//!                               ▲
//!            dispatcher / datastore / graph walker
//! ```
//!
//! # Three-Valued Membership
//!
//! A resource's membership in a permission set is one of:
//!
//! | State | Meaning | Representation |
//! |-------|---------|----------------|
//! | determined | member, no conditions | no expression attached |
//! | conditional | member iff a caveat expression holds | [`CaveatExpr`] |
//! | not a member | absent | not serialized |
//!
//! The truth value of a caveat is only known at evaluation time, against
//! per-request context. Until then the resolver carries the *expression*
//! guarding membership, combining expressions with [`Guard`] wherever the
//! permission graph fans in.
//!
//! # Example
//!
//! ```
//! use arbor_types::{CaveatExpr, CaveatRef, CheckResult, Guard};
//!
//! // A caveat reference names a predicate declared in the schema.
//! let on_vpn = CaveatExpr::leaf(CaveatRef::new("on_vpn"));
//! let is_weekday = CaveatExpr::leaf(CaveatRef::new("is_weekday"));
//!
//! // Guards combine with identity-only simplification.
//! let both = Guard::when(on_vpn).and(Guard::when(is_weekday));
//! assert!(!both.is_always());
//!
//! // Wire form for a caveated member.
//! let Guard::When(expr) = both else { unreachable!() };
//! let result = CheckResult::caveated_member(expr);
//! assert!(result.is_caveated_member());
//! ```

mod caveat;
mod check;
mod error;
mod expression;
mod guard;

pub use caveat::CaveatRef;
pub use check::{CheckResult, CheckResultsMap, Membership};
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use expression::{CaveatExpr, OpKind};
pub use guard::Guard;
