//! Depth guarding for dispatched sub-requests.
//!
//! The dispatcher embeds a [`ResolverMeta`] block in every sub-request it
//! forwards. Before resolving at any layer, [`check_depth`] verifies that
//! a recursion budget remains; the caller is responsible for decrementing
//! the budget (via [`ResolverMeta::descend`]) before recursing.
//!
//! Depth lives in request metadata rather than ambient state so that the
//! bound holds across node boundaries: each hop carries the remaining
//! budget with it.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ResolutionError;

/// Resolver metadata attached to every dispatched sub-request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverMeta {
    /// Remaining recursion budget for this request.
    pub depth_remaining: u32,
}

impl ResolverMeta {
    /// Creates metadata with the given recursion budget.
    #[must_use]
    pub fn new(depth_remaining: u32) -> Self {
        Self { depth_remaining }
    }

    /// Returns a copy with the budget decremented, for the next hop.
    ///
    /// Saturates at zero; [`check_depth`] rejects the request there.
    #[must_use]
    pub fn descend(&self) -> Self {
        Self {
            depth_remaining: self.depth_remaining.saturating_sub(1),
        }
    }

    /// Returns `true` if no recursion budget remains.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.depth_remaining == 0
    }
}

/// A dispatched request that may carry resolver metadata.
///
/// Request types are owned by the transport layer; the resolver only
/// needs to read the metadata block, so the seam is a trait.
pub trait HasMetadata: fmt::Debug {
    /// Returns the resolver metadata block, if the request carries one.
    fn metadata(&self) -> Option<&ResolverMeta>;
}

/// Verifies that a request may be resolved at this layer.
///
/// # Errors
///
/// - [`ResolutionError::MetadataMissing`] if the request has no metadata
///   block (programmer error in the caller; logged).
/// - [`ResolutionError::MaxDepthExceeded`] if the recursion budget is
///   exhausted.
///
/// # Example
///
/// ```
/// use arbor_graph::{check_depth, HasMetadata, ResolverMeta};
///
/// #[derive(Debug)]
/// struct CheckRequest {
///     metadata: Option<ResolverMeta>,
/// }
///
/// impl HasMetadata for CheckRequest {
///     fn metadata(&self) -> Option<&ResolverMeta> {
///         self.metadata.as_ref()
///     }
/// }
///
/// let req = CheckRequest { metadata: Some(ResolverMeta::new(50)) };
/// assert!(check_depth(&req).is_ok());
///
/// let exhausted = CheckRequest { metadata: Some(ResolverMeta::new(0)) };
/// assert!(check_depth(&exhausted).is_err());
/// ```
pub fn check_depth<R: HasMetadata>(request: &R) -> Result<(), ResolutionError> {
    let Some(metadata) = request.metadata() else {
        warn!("request missing resolver metadata: {:?}", request);
        return Err(ResolutionError::MetadataMissing);
    };

    if metadata.is_exhausted() {
        return Err(ResolutionError::MaxDepthExceeded);
    }

    Ok(())
}
