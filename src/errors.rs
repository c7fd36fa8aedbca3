//! Error types for key handling, signing and signature combination.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, SchnorrError>;

/// Errors returned by construction, signing and combination routines.
///
/// Verification never produces one of these: a signature either verifies
/// or it does not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchnorrError {
    /// A private key scalar reduced to zero, or a public key is the
    /// identity or another small-order point.
    #[error("invalid key: zero scalar or small-order point")]
    InvalidKey,

    /// Same as [`SchnorrError::InvalidKey`], for nonce material.
    #[error("invalid nonce: zero scalar or small-order point")]
    InvalidNonce,

    /// A byte sequence could not be decoded into a scalar or a point.
    #[error("malformed input: cannot decode {0}")]
    MalformedInput(&'static str),

    /// Signature bytes have the wrong length, `R` is not a curve point or
    /// `S` is not a canonical scalar.
    #[error("malformed signature")]
    MalformedSignature,

    /// An aggregation or combination was asked to work on nothing.
    #[error("empty input: at least one element is required")]
    EmptyInput,

    /// Partial signatures disagree on the shared commitment `R`.
    #[error("partial signature {index} carries a different commitment R")]
    InconsistentCommitment { index: usize },

    /// The random source failed while drawing key or nonce material.
    #[error("randomness source failed: {0}")]
    Randomness(String),

    /// A signing session was configured with zero parties.
    #[error("parties quantity cannot be 0")]
    PartyCount,

    /// A signing session received a different number of items than the
    /// number of parties it was opened for.
    #[error("mismatched quantities: expected {expected}, got {got}")]
    MismatchedCount { expected: usize, got: usize },

    /// A partial signature does not satisfy the per-signatory equation.
    #[error("partial signature {index} is invalid")]
    InvalidPartialSignature { index: usize },

    /// A combined signature handed back to a signatory does not verify
    /// against the aggregate public key.
    #[error("aggregated signature does not verify")]
    InvalidSignature,
}

impl From<rand::Error> for SchnorrError {
    fn from(err: rand::Error) -> Self {
        SchnorrError::Randomness(err.to_string())
    }
}
