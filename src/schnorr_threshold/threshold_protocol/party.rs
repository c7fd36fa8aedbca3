/// This module defines a Signatory struct representing a participant in a
/// threshold Schnorr signing session. A signatory moves through the rounds
/// of the session as a typestate: it publishes its public key, then a fresh
/// public nonce, then its partial signature, and finally accepts the
/// combined signature.
use super::protocol_messages::*;
use crate::curve::Curve;
use crate::errors::{Result, SchnorrError};
use crate::keys_management::{generate_key, PrivateKey, PublicKey};
use crate::rand_nonce::RandomNonce;
use crate::schnorr_single_signature::verify;
use crate::schnorr_threshold::threshold_math::partial_signature;
use crate::signature::Signature;
use rand::{CryptoRng, RngCore};
use std::borrow::Cow;
use std::fmt;

/// Signatory struct, which manages the role of a participant in the session.
pub struct Signatory<'a, S: SignatoryState> {
    curve: &'a Curve,
    keys: PrivateKey,
    message: Cow<'a, [u8]>,
    state: S,
}

/// Represents the possible states of a Signatory.
pub trait SignatoryState {}

/// The public key has been published; waiting for the aggregate public key.
pub struct AwaitingAggregatedPublicKey;

/// A nonce has been drawn and its public part published; waiting for the
/// aggregate nonce.
pub struct AwaitingAggregatedNonce {
    aggregated_public_key: PublicKey,
    nonce: RandomNonce,
}

/// The partial signature has been published. The secret nonce is gone.
pub struct AwaitingAggregatedSignature {
    aggregated_public_key: PublicKey,
    aggregated_nonce: PublicKey,
}

/// The combined signature has been received and checked.
pub struct SignatoryFinalized {
    aggregated_public_key: PublicKey,
    signature: Signature,
}

impl SignatoryState for AwaitingAggregatedPublicKey {}
impl SignatoryState for AwaitingAggregatedNonce {}
impl SignatoryState for AwaitingAggregatedSignature {}
impl SignatoryState for SignatoryFinalized {}

impl<S: SignatoryState> fmt::Debug for Signatory<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signatory")
            .field("public_key", &self.keys.public_key())
            .field("message_len", &self.message.len())
            .finish()
    }
}

impl<S: SignatoryState> Signatory<'_, S> {
    pub fn public_key(&self) -> PublicKey {
        self.keys.public_key()
    }
}

impl<'a> Signatory<'a, AwaitingAggregatedPublicKey> {
    /// Create a new Signatory with a freshly generated private key share.
    ///
    /// # Arguments
    ///
    /// * `curve` - The curve parameters of the session.
    /// * `message` - The message to be signed.
    /// * `rng` - Cryptographically secure randomness for the key share.
    ///
    /// Returns the Signatory and the message announcing its public key.
    pub fn new<R>(
        curve: &'a Curve,
        message: impl Into<Cow<'a, [u8]>>,
        rng: &mut R,
    ) -> Result<(Self, PublicKeyMessage)>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let keys = generate_key(curve, rng)?;
        Ok(Signatory::from_private_key(curve, keys, message))
    }

    /// Create a new Signatory from an existing private key share.
    pub fn from_private_key(
        curve: &'a Curve,
        keys: PrivateKey,
        message: impl Into<Cow<'a, [u8]>>,
    ) -> (Self, PublicKeyMessage) {
        let public_key = keys.public_key();
        (
            Signatory {
                curve,
                keys,
                message: message.into(),
                state: AwaitingAggregatedPublicKey,
            },
            PublicKeyMessage { public_key },
        )
    }

    /// Draw a fresh nonce for this session.
    ///
    /// Returns the Signatory waiting for the aggregate nonce and the message
    /// announcing its public nonce.
    pub fn generate_nonce<R>(
        self,
        aggregated_public_key: AggregatedPublicKeyMessage,
        rng: &mut R,
    ) -> Result<(Signatory<'a, AwaitingAggregatedNonce>, PublicNonceMessage)>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let nonce = RandomNonce::generate(self.curve, rng)?;
        let public_nonce = nonce.public_nonce();
        Ok((
            Signatory {
                curve: self.curve,
                keys: self.keys,
                message: self.message,
                state: AwaitingAggregatedNonce {
                    aggregated_public_key: aggregated_public_key.public_key,
                    nonce,
                },
            },
            PublicNonceMessage { public_nonce },
        ))
    }
}

impl<'a> Signatory<'a, AwaitingAggregatedNonce> {
    /// Compute this signatory's partial signature against the session aggregates.
    ///
    /// Consumes the secret nonce, so a signatory can sign at most once.
    #[tracing::instrument(name = "Signatory computing its partial signature", skip_all)]
    pub fn partial_sign(
        self,
        aggregated_nonce: AggregatedNonceMessage,
    ) -> (
        Signatory<'a, AwaitingAggregatedSignature>,
        PartialSignatureMessage,
    ) {
        let AwaitingAggregatedNonce {
            aggregated_public_key,
            nonce,
        } = self.state;
        let partial_signature = partial_signature(
            &self.message,
            &self.keys,
            &aggregated_public_key,
            &nonce,
            &aggregated_nonce.public_nonce,
        );
        (
            Signatory {
                curve: self.curve,
                keys: self.keys,
                message: self.message,
                state: AwaitingAggregatedSignature {
                    aggregated_public_key,
                    aggregated_nonce: aggregated_nonce.public_nonce,
                },
            },
            PartialSignatureMessage { partial_signature },
        )
    }
}

impl<'a> Signatory<'a, AwaitingAggregatedSignature> {
    /// Accept the combined signature after checking it against the
    /// aggregate public key and the agreed commitment.
    pub fn set_aggregated_signature(
        self,
        aggregated_signature: AggregatedSignatureMessage,
    ) -> Result<Signatory<'a, SignatoryFinalized>> {
        let signature = aggregated_signature.signature;
        let state = &self.state;
        if *signature.r() != state.aggregated_nonce.compress()
            || !verify(
                self.curve,
                &state.aggregated_public_key,
                &self.message,
                &signature,
            )
        {
            return Err(SchnorrError::InvalidSignature);
        }
        Ok(Signatory {
            curve: self.curve,
            keys: self.keys,
            message: self.message,
            state: SignatoryFinalized {
                aggregated_public_key: self.state.aggregated_public_key,
                signature,
            },
        })
    }
}

impl Signatory<'_, SignatoryFinalized> {
    pub fn signature(&self) -> Signature {
        self.state.signature
    }

    pub fn aggregated_public_key(&self) -> PublicKey {
        self.state.aggregated_public_key
    }
}
