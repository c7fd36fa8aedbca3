use crate::curve::Curve;
use crate::errors::{Result, SchnorrError};
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Length of a serialized scalar or point.
pub const KEY_LENGTH: usize = 32;

/// A signatory's secret scalar `D` together with the derived public key `D·B`.
///
/// The scalar lives in a [`Secret`], so it is zeroized when the key is dropped.
pub struct PrivateKey {
    pub(crate) private_key: Secret<Scalar>,
    pub(crate) public_key: PublicKey,
}

/// A curve point usable as a public key or public nonce.
///
/// Never the identity or any other small-order point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u8; 32]", into = "[u8; 32]")]
pub struct PublicKey {
    point: EdwardsPoint,
}

use std::fmt;
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Format the PrivateKey struct without including private_key
        write!(f, "PrivateKey {{ public_key: {:?} }}", self.public_key)
    }
}

impl Clone for PrivateKey {
    fn clone(&self) -> Self {
        PrivateKey {
            private_key: Secret::new(*self.private_key.expose_secret()),
            public_key: self.public_key,
        }
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        // Scalar equality is constant time.
        self.private_key.expose_secret() == other.private_key.expose_secret()
    }
}

impl Eq for PrivateKey {}

impl PrivateKey {
    pub(crate) fn from_secret(curve: &Curve, private_key: Secret<Scalar>) -> PrivateKey {
        let public_key = PublicKey::derive(curve, private_key.expose_secret());
        PrivateKey {
            private_key,
            public_key,
        }
    }

    /// Decodes a serialized private key. Same rules as [`private_key_from_scalar`].
    pub fn from_bytes(curve: &Curve, bytes: &[u8]) -> Result<PrivateKey> {
        private_key_from_scalar(curve, bytes)
    }

    /// 32-byte little-endian encoding of `D`, zeroized on drop.
    pub fn to_bytes(&self) -> Zeroizing<[u8; KEY_LENGTH]> {
        Zeroizing::new(self.private_key.expose_secret().to_bytes())
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    pub(crate) fn secret(&self) -> &Secret<Scalar> {
        &self.private_key
    }
}

/// Builds a private key from scalar bytes.
///
/// `bytes` is a 32-byte little-endian integer, reduced mod `N`. A value that
/// reduces to zero is rejected with [`SchnorrError::InvalidKey`], a wrong
/// length with [`SchnorrError::MalformedInput`].
pub fn private_key_from_scalar(curve: &Curve, bytes: &[u8]) -> Result<PrivateKey> {
    let scalar = decode_secret_scalar(curve, bytes, "private key")?;
    Ok(PrivateKey::from_secret(curve, scalar))
}

/// Draws a fresh private key from `rng`.
///
/// A sample that reduces to zero is discarded and drawn again. Failures of the
/// random source are returned as [`SchnorrError::Randomness`].
pub fn generate_key<R>(curve: &Curve, rng: &mut R) -> Result<PrivateKey>
where
    R: CryptoRng + RngCore + ?Sized,
{
    let scalar = random_nonzero_scalar(curve, rng)?;
    Ok(PrivateKey::from_secret(curve, scalar))
}

pub(crate) fn decode_secret_scalar(
    curve: &Curve,
    bytes: &[u8],
    what: &'static str,
) -> Result<Secret<Scalar>> {
    let bytes: Zeroizing<[u8; KEY_LENGTH]> = Zeroizing::new(
        bytes
            .try_into()
            .map_err(|_| SchnorrError::MalformedInput(what))?,
    );
    let scalar = Secret::new(curve.reduce(*bytes));
    if *scalar.expose_secret() == Scalar::ZERO {
        tracing::debug!("rejecting {} that reduces to zero", what);
        return Err(SchnorrError::InvalidKey);
    }
    Ok(scalar)
}

pub(crate) fn random_nonzero_scalar<R>(curve: &Curve, rng: &mut R) -> Result<Secret<Scalar>>
where
    R: CryptoRng + RngCore + ?Sized,
{
    let mut wide = Zeroizing::new([0u8; 64]);
    loop {
        rng.try_fill_bytes(&mut wide[..])?;
        let scalar = Secret::new(curve.reduce_wide(&wide));
        if *scalar.expose_secret() != Scalar::ZERO {
            return Ok(scalar);
        }
        tracing::debug!("sampled a zero scalar, drawing again");
    }
}

impl PublicKey {
    /// `scalar·B`. Callers guarantee `scalar` is nonzero, so the result has
    /// prime order.
    pub(crate) fn derive(curve: &Curve, scalar: &Scalar) -> PublicKey {
        PublicKey {
            point: curve.mul_base(scalar),
        }
    }

    pub(crate) fn from_point(point: EdwardsPoint) -> Result<PublicKey> {
        if point.is_small_order() {
            return Err(SchnorrError::InvalidKey);
        }
        Ok(PublicKey { point })
    }

    /// Decodes a 32-byte compressed Edwards-Y point.
    ///
    /// Bytes that are not a point give [`SchnorrError::MalformedInput`]; the
    /// identity and other small-order points give [`SchnorrError::InvalidKey`].
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey> {
        let point = CompressedEdwardsY::from_slice(bytes)
            .ok()
            .and_then(|compressed| compressed.decompress())
            .ok_or(SchnorrError::MalformedInput("public key"))?;
        PublicKey::from_point(point)
    }

    pub fn to_bytes(&self) -> [u8; KEY_LENGTH] {
        self.point.compress().to_bytes()
    }

    pub fn compress(&self) -> CompressedEdwardsY {
        self.point.compress()
    }

    pub fn as_point(&self) -> &EdwardsPoint {
        &self.point
    }

    /// Point sum of two public keys.
    pub fn add(&self, curve: &Curve, other: &PublicKey) -> Result<PublicKey> {
        PublicKey::from_point(curve.add(&self.point, &other.point))
    }
}

impl TryFrom<[u8; KEY_LENGTH]> for PublicKey {
    type Error = SchnorrError;

    fn try_from(bytes: [u8; KEY_LENGTH]) -> Result<Self> {
        PublicKey::from_bytes(&bytes)
    }
}

impl From<PublicKey> for [u8; KEY_LENGTH] {
    fn from(public_key: PublicKey) -> Self {
        public_key.to_bytes()
    }
}

/// Sums public keys into the aggregate public key of a signing group.
///
/// Fails with [`SchnorrError::EmptyInput`] on an empty slice and with
/// [`SchnorrError::InvalidKey`] if the shares cancel out to a small-order point.
pub fn aggregate_public_keys(curve: &Curve, public_keys: &[PublicKey]) -> Result<PublicKey> {
    let (first, rest) = public_keys.split_first().ok_or(SchnorrError::EmptyInput)?;
    let sum = rest
        .iter()
        .fold(first.point, |acc, pk| curve.add(&acc, &pk.point));
    PublicKey::from_point(sum)
}
