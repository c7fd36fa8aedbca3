use crate::curve::Curve;
use crate::errors::{Result, SchnorrError};
use crate::keys_management::{PrivateKey, PublicKey};
use crate::rand_nonce::RandomNonce;
use crate::scalar_arith::{scalar_add, scalar_sum};
use crate::schnorr_single_signature::challenge;
use crate::signature::Signature;
use secrecy::ExposeSecret;

// Computes a partial signature from serialized inputs:
// S_i = k_i + H(R,X,m)x_i
// where R and X are the session aggregates, never the local shares.
//
// Inputs:
// - message: Message m to sign
// - private_key_share: x_i, 32 bytes
// - aggregate_public_key: X = sum of all X_i, 32 bytes
// - secret_nonce_share: k_i, 32 bytes
// - aggregate_public_nonce: R = sum of all R_i, 32 bytes
//
// Returns:
// - (R, S_i); every signatory of the session returns the same R
#[tracing::instrument(name = "Computing a partial Schnorr signature", skip_all)]
pub fn partial_sign(
    curve: &Curve,
    message: &[u8],
    private_key_share: &[u8],
    aggregate_public_key: &[u8],
    secret_nonce_share: &[u8],
    aggregate_public_nonce: &[u8],
) -> Result<Signature> {
    let private_key = PrivateKey::from_bytes(curve, private_key_share)?;
    let aggregate_public_key = PublicKey::from_bytes(aggregate_public_key)
        .map_err(|_| SchnorrError::MalformedInput("aggregate public key"))?;
    let nonce = RandomNonce::from_bytes(curve, secret_nonce_share)?;
    let aggregate_public_nonce = PublicKey::from_bytes(aggregate_public_nonce)
        .map_err(|_| SchnorrError::MalformedInput("aggregate public nonce"))?;

    Ok(partial_signature(
        message,
        &private_key,
        &aggregate_public_key,
        &nonce,
        &aggregate_public_nonce,
    ))
}

// Typed counterpart of partial_sign, for callers that already hold decoded keys.
pub fn partial_signature(
    message: &[u8],
    private_key: &PrivateKey,
    aggregate_public_key: &PublicKey,
    nonce: &RandomNonce,
    aggregate_public_nonce: &PublicKey,
) -> Signature {
    let cap_r = aggregate_public_nonce.compress();
    let e = challenge(&cap_r, &aggregate_public_key.compress(), message);
    let s = scalar_add(
        nonce.r_private.expose_secret(),
        &(e * private_key.secret().expose_secret()),
    );
    Signature::new(cap_r, s)
}

// Sums partial signatures into the final signature (R, sum of S_i).
//
// All partial signatures must carry the same R; the first one that does not
// is reported as InconsistentCommitment. R must decode to a point outside the
// small-order subgroup, otherwise the result is MalformedInput.
#[tracing::instrument(name = "Combining partial Schnorr signatures", skip_all, fields(parties = partial_signatures.len()))]
pub fn combine_signatures(partial_signatures: &[Signature]) -> Result<Signature> {
    let (first, _) = partial_signatures
        .split_first()
        .ok_or(SchnorrError::EmptyInput)?;

    if let Some(index) = partial_signatures
        .iter()
        .position(|signature| signature.r() != first.r())
    {
        tracing::warn!(index, "partial signature commits to a different R");
        return Err(SchnorrError::InconsistentCommitment { index });
    }

    match first.r().decompress() {
        Some(point) if !point.is_small_order() => {}
        _ => {
            tracing::warn!("partial signatures commit to an invalid R");
            return Err(SchnorrError::MalformedInput("commitment"));
        }
    }

    let s = scalar_sum(partial_signatures.iter().map(|signature| *signature.s()));
    Ok(Signature::new(*first.r(), s))
}

// Verifies one signatory's contribution:
// S_iB = R_i + H(R,X,m)X_i
//
// Inputs:
// - public_key_share: X_i
// - public_nonce_share: R_i
// - aggregate_public_key, aggregate_public_nonce: X and R of the session
//
// Returns:
// - true if the share is consistent with the signatory's published key and nonce
pub fn verify_partial_signature(
    curve: &Curve,
    public_key_share: &PublicKey,
    public_nonce_share: &PublicKey,
    aggregate_public_key: &PublicKey,
    aggregate_public_nonce: &PublicKey,
    message: &[u8],
    partial_signature: &Signature,
) -> bool {
    if *partial_signature.r() != aggregate_public_nonce.compress() {
        return false;
    }
    let e = challenge(
        partial_signature.r(),
        &aggregate_public_key.compress(),
        message,
    );
    let left = curve.mul_base(partial_signature.s());
    let right = curve.add(
        public_nonce_share.as_point(),
        &(e * public_key_share.as_point()),
    );
    left == right
}
