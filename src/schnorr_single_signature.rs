use crate::curve::Curve;
use crate::errors::Result;
use crate::keys_management::{PrivateKey, PublicKey};
use crate::rand_nonce::RandomNonce;
use crate::scalar_arith::scalar_add;
use crate::signature::Signature;
use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha512};

/// Signs a message with an explicit nonce:
/// (R,S) = (kB, k + H(R,X,m)x)
///
/// # Arguments
///
/// * `curve` - The curve parameters.
/// * `private_key` - The signer's private key `x`.
/// * `nonce` - 32 little-endian bytes of the nonce scalar `k`, reduced mod `N`.
/// * `message` - The message to be signed.
///
/// # Returns
///
/// The signature, or `InvalidNonce`/`MalformedInput` if `nonce` is zero or
/// not 32 bytes long.
///
#[tracing::instrument(name = "Signing the message with a Schnorr signature", skip_all)]
pub fn sign_from_scalar(
    curve: &Curve,
    private_key: &PrivateKey,
    nonce: &[u8],
    message: &[u8],
) -> Result<Signature> {
    let nonce = RandomNonce::from_bytes(curve, nonce)?;
    Ok(sign_with_nonce(private_key, &nonce, message))
}

/// Signs a message with a fresh nonce drawn from `rng`.
#[tracing::instrument(name = "Signing the message with a fresh nonce", skip_all)]
pub fn sign<R>(
    curve: &Curve,
    private_key: &PrivateKey,
    message: &[u8],
    rng: &mut R,
) -> Result<Signature>
where
    R: CryptoRng + RngCore + ?Sized,
{
    let nonce = RandomNonce::generate(curve, rng)?;
    Ok(sign_with_nonce(private_key, &nonce, message))
}

fn sign_with_nonce(private_key: &PrivateKey, nonce: &RandomNonce, message: &[u8]) -> Signature {
    let cap_r = nonce.public_nonce().compress();
    let e = challenge(&cap_r, &private_key.public_key().compress(), message);
    let s = scalar_add(
        nonce.r_private.expose_secret(),
        &(e * private_key.secret().expose_secret()),
    );
    Signature::new(cap_r, s)
}

/// Verifies a Schnorr signature using the following formula:
/// SB = R + H(R,X,m)X
///
/// # Arguments
///
/// * `curve` - The curve parameters.
/// * `public_key` - The public key `X` to verify against.
/// * `message` - The message that was signed.
/// * `signature` - The `(R, S)` pair.
///
/// # Returns
///
/// `true` if the signature is valid, `false` otherwise. A commitment `R`
/// that is not a curve point or has small order yields `false`.
///
#[tracing::instrument(name = "Verifying the Schnorr signature", skip_all)]
pub fn verify(curve: &Curve, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    let cap_r = match signature.r().decompress() {
        Some(point) if !point.is_small_order() => point,
        _ => {
            tracing::debug!("commitment R is not a valid point");
            return false;
        }
    };
    let e = challenge(signature.r(), &public_key.compress(), message);

    let left = curve.mul_base(signature.s());
    let right = curve.add(&cap_r, &(e * public_key.as_point()));

    left.compress() == right.compress()
}

/// [`verify`] on raw encodings. Anything that fails to decode is simply
/// an invalid signature.
pub fn verify_bytes(curve: &Curve, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    match (PublicKey::from_bytes(public_key), Signature::from_bytes(signature)) {
        (Ok(public_key), Ok(signature)) => verify(curve, &public_key, message, &signature),
        _ => false,
    }
}

/// Challenge `e = SHA-512(R || X || m) mod N`, over the compressed encodings
/// of the commitment and the public key.
pub fn challenge(cap_r: &CompressedEdwardsY, public_key: &CompressedEdwardsY, message: &[u8]) -> Scalar {
    let hash = Sha512::new()
        .chain_update(cap_r.as_bytes())
        .chain_update(public_key.as_bytes())
        .chain_update(message);
    Scalar::from_hash(hash)
}
