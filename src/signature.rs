use crate::curve::{Curve, ED25519};
use crate::errors::{Result, SchnorrError};
use crate::keys_management::{PublicKey, KEY_LENGTH};
use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::scalar::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a serialized signature: `R || S`.
pub const SIGNATURE_LENGTH: usize = 2 * KEY_LENGTH;

/// Schnorr signature structure: (R, S).
///
/// `R` is the compressed commitment point and `S` the response scalar. The
/// same type carries partial signatures, whose `R` is the session's aggregate
/// commitment and whose `S` is one signatory's share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Signature {
    r: CompressedEdwardsY,
    s: Scalar,
}

impl Signature {
    pub fn new(r: CompressedEdwardsY, s: Scalar) -> Self {
        Signature { r, s }
    }

    pub fn r(&self) -> &CompressedEdwardsY {
        &self.r
    }

    pub fn s(&self) -> &Scalar {
        &self.s
    }

    /// `R (32 bytes) || S (32 bytes, little-endian)`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..KEY_LENGTH].copy_from_slice(self.r.as_bytes());
        bytes[KEY_LENGTH..].copy_from_slice(self.s.as_bytes());
        bytes
    }

    /// Exact inverse of [`Signature::to_bytes`].
    ///
    /// Rejects a wrong length, an `R` that does not decode to a curve point
    /// and an `S` that is not reduced mod `N`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SchnorrError::MalformedSignature);
        }
        let (r_bytes, s_bytes) = bytes.split_at(KEY_LENGTH);

        let r = CompressedEdwardsY::from_slice(r_bytes)
            .map_err(|_| SchnorrError::MalformedSignature)?;
        if r.decompress().is_none() {
            return Err(SchnorrError::MalformedSignature);
        }

        let s_bytes: [u8; KEY_LENGTH] = s_bytes
            .try_into()
            .map_err(|_| SchnorrError::MalformedSignature)?;
        // The encoding is the Ed25519 one, so S is bounded by that curve's order.
        if !ED25519.is_canonical(&s_bytes) {
            return Err(SchnorrError::MalformedSignature);
        }
        let s = ED25519.reduce(s_bytes);

        Ok(Signature { r, s })
    }

    /// See [`crate::schnorr_single_signature::verify`].
    pub fn verify(&self, curve: &Curve, public_key: &PublicKey, message: &[u8]) -> bool {
        crate::schnorr_single_signature::verify(curve, public_key, message, self)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

impl TryFrom<Vec<u8>> for Signature {
    type Error = SchnorrError;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Signature::from_bytes(&bytes)
    }
}

impl From<Signature> for Vec<u8> {
    fn from(signature: Signature) -> Self {
        signature.to_bytes().to_vec()
    }
}
