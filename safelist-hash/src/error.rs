//! Error types for key computation.

use crate::Strategy;
use thiserror::Error;

/// Result type for key computation.
pub type HashResult<T> = Result<T, HashError>;

/// Why an entry could not be given a hash key.
#[derive(Debug, Error)]
pub enum HashError {
    /// The type tag maps to no hashing strategy.
    #[error("unrecognized entry type {0:?}")]
    UnrecognizedType(String),

    /// The entry carries no payload, or the payload for a different type.
    #[error("{strategy} entry needs a `{expected}` payload, found {}", .found.unwrap_or("none"))]
    WrongPayload {
        strategy: Strategy,
        expected: &'static str,
        found: Option<&'static str>,
    },

    /// The record populated more than one payload field.
    #[error("{strategy} entry populates more than one payload field: {}", .fields.join(", "))]
    ConflictingPayloads {
        strategy: Strategy,
        fields: Vec<&'static str>,
    },

    /// A field required by the strategy is empty or nil.
    #[error("{strategy} entry is missing `{field}`")]
    MissingField {
        strategy: Strategy,
        field: &'static str,
    },

    /// The hash accumulator rejected a write.
    #[error("hasher write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl HashError {
    /// True for errors caused by incomplete entry data.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::WrongPayload { .. } | Self::ConflictingPayloads { .. } | Self::MissingField { .. }
        )
    }
}
