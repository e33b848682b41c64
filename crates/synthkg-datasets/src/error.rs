use synthkg_model::ModelError;
use thiserror::Error;

/// Errors raised by dataset construction, generation, and explanation.
///
/// All of them are fail-fast: generation is a pure deterministic computation
/// over validated inputs, so nothing here is retryable.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A numeric precondition on a construction parameter was violated.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The explanation engine was handed an edge whose head/tail pattern
    /// matches no known rule, or whose id components are structurally
    /// inconsistent.
    #[error("unrecognized triple ({head}, {relation}, {tail}): {reason}")]
    UnrecognizedTriple {
        head: String,
        relation: String,
        tail: String,
        reason: String,
    },

    /// An internal consistency assertion failed (missing justifying edge,
    /// oversized random-subset request, ...).
    #[error("integrity check failed: {0}")]
    Integrity(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl DatasetError {
    pub(crate) fn unrecognized(
        head: &str,
        relation: &str,
        tail: &str,
        reason: impl Into<String>,
    ) -> Self {
        DatasetError::UnrecognizedTriple {
            head: head.to_string(),
            relation: relation.to_string(),
            tail: tail.to_string(),
            reason: reason.into(),
        }
    }
}
