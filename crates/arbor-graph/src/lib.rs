//! Permission-resolution core for Arbor.
//!
//! Given a permission query over a graph of relations, the resolver
//! computes, for each candidate resource, whether it is a member of the
//! permission set: unconditionally, or conditional on a caveat
//! expression whose truth is only known at evaluation time.
//!
//! # Crate Architecture
//!
//! ```text
//! arbor-types  (CaveatRef, CaveatExpr, Guard, CheckResult)
//!      ▲
//! arbor-graph  (MembershipSet, adapter, depth guard)  ◄── THIS CRATE
//!      ▲
//! graph walker / dispatcher  (collaborators, out of tree)
//! ```
//!
//! # Resolution Flow
//!
//! ```text
//! walker issues sub-queries ──► wire CheckResult maps
//!          │                            │
//!          │         MembershipSet::from_check_results_map
//!          ▼                            ▼
//!   union_with / intersect_with / subtract   (per permission operator)
//!          │
//!          ▼
//!   MembershipSet::as_check_results_map ──► wire form, back to caller
//! ```
//!
//! The walker decides *which* sub-queries to issue and in what order;
//! this crate defines *how* their results combine. Each combination
//! preserves the minimal caveat expression guarding every resource's
//! membership, so the final answer carries exactly the conditions a
//! later evaluation stage must test.
//!
//! Recursion between walker and resolver is bounded by the depth guard:
//! every dispatched sub-request carries a [`ResolverMeta`] budget, and
//! [`check_depth`] rejects requests whose budget is exhausted.
//!
//! # Design Principles
//!
//! - **Sound fan-in**: determined membership absorbs caveats on union,
//!   passes them through on intersection, and excludes outright on
//!   subtraction; these identities live in `arbor_types::Guard`.
//! - **Predictable expression shape**: combination synthesizes operands
//!   in a specified order and never normalizes, so traces and tests can
//!   compare trees structurally.
//! - **Total algebra**: set combination never fails; errors come only
//!   from the depth guard and the wire adapter.

mod dispatch;
mod error;
mod membership;

pub use dispatch::{check_depth, HasMetadata, ResolverMeta};
pub use error::ResolutionError;
pub use membership::{Entry, MembershipSet};
