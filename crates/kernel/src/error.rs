use tensegrity_types::{MemberKind, NodeId};
use thiserror::Error;

/// Errors raised while configuring, generating or emitting a lattice.
///
/// None of these are recoverable by retrying with the same inputs.
#[derive(Debug, Error)]
pub enum LatticeError {
    #[error("invalid lattice parameter `{parameter}`: {reason}")]
    InvalidParameters {
        parameter: &'static str,
        reason: String,
    },

    #[error("degenerate {kind:?} {from} -> {to}: length {length}")]
    DegenerateGeometry {
        kind: MemberKind,
        from: NodeId,
        to: NodeId,
        length: f64,
    },

    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl LatticeError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            parameter,
            reason: reason.into(),
        }
    }
}
