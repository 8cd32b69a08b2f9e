//! Resolution-layer errors.
//!
//! The algebra itself is total over well-typed inputs: set combination
//! never fails. The errors here come from the two places the core can
//! reject work: the depth guard and the wire adapter.
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`ResolutionError::MaxDepthExceeded`] | `RESOLVE_MAX_DEPTH_EXCEEDED` | No |
//! | [`ResolutionError::MetadataMissing`] | `RESOLVE_METADATA_MISSING` | No |
//! | [`ResolutionError::UnrecognizedMembership`] | `RESOLVE_UNRECOGNIZED_MEMBERSHIP` | No |

use arbor_types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error raised by the resolution core.
///
/// All other failures (datastore, network) originate in collaborators
/// and pass through the resolver unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ResolutionError {
    /// The depth guard tripped: no recursion budget remains for a
    /// further dispatch. The walker translates this into a resolution
    /// failure; retrying in-process cannot succeed.
    #[error("max depth exceeded")]
    MaxDepthExceeded,

    /// A request arrived without a resolver metadata block. This is a
    /// programmer error in the caller, logged and returned.
    #[error("request missing resolver metadata")]
    MetadataMissing,

    /// A wire check result carried a membership kind the adapter does
    /// not recognize: protocol skew or corruption, fatal to the current
    /// operation.
    #[error("unrecognized membership kind for resource '{resource_id}'")]
    UnrecognizedMembership {
        /// The resource whose result could not be interpreted.
        resource_id: String,
    },
}

impl ErrorCode for ResolutionError {
    fn code(&self) -> &'static str {
        match self {
            Self::MaxDepthExceeded => "RESOLVE_MAX_DEPTH_EXCEEDED",
            Self::MetadataMissing => "RESOLVE_METADATA_MISSING",
            Self::UnrecognizedMembership { .. } => "RESOLVE_UNRECOGNIZED_MEMBERSHIP",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
