/// This module defines an Aggregator struct for collecting the public values
/// of a threshold Schnorr signing session. It sums public keys and public
/// nonces into the session aggregates, checks every partial signature
/// against its signatory's published key and nonce, and combines them
/// into the final signature.
use super::protocol_messages::*;
use crate::curve::Curve;
use crate::errors::{Result, SchnorrError};
use crate::keys_management::{aggregate_public_keys, PublicKey};
use crate::rand_nonce::aggregate_public_nonces;
use crate::schnorr_single_signature::verify;
use crate::schnorr_threshold::threshold_math::{combine_signatures, verify_partial_signature};
use crate::signature::Signature;
use std::fmt::{Debug, Formatter};

/// Aggregator struct, which manages the aggregation process.
pub struct Aggregator<'a, S: AggregationState> {
    curve: &'a Curve,
    parties_quantity: usize,
    message: &'a [u8],
    state: S,
}

impl<S: AggregationState> Debug for Aggregator<'_, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("curve", &self.curve.name())
            .field("parties_quantity", &self.parties_quantity)
            .field("message", &hex::encode(self.message))
            .finish()
    }
}

/// Represents the possible states of the Aggregator.
pub trait AggregationState {}

/// State when waiting for public keys from signatories.
pub struct AwaitingPublicKeys;

/// State when waiting for public nonces from signatories.
pub struct AwaitingPublicNonces {
    public_keys: Vec<PublicKey>,
    aggregated_public_key: PublicKey,
}

/// State when waiting for partial signatures from signatories.
pub struct AwaitingPartialSignatures {
    public_keys: Vec<PublicKey>,
    aggregated_public_key: PublicKey,
    public_nonces: Vec<PublicKey>,
    aggregated_nonce: PublicKey,
}

/// State when the aggregation process is finalized.
pub struct AggregationFinalized {
    aggregated_public_key: PublicKey,
    signature: Signature,
}

impl AggregationState for AwaitingPublicKeys {}
impl AggregationState for AwaitingPublicNonces {}
impl AggregationState for AwaitingPartialSignatures {}
impl AggregationState for AggregationFinalized {}

impl<'a, S: AggregationState> Aggregator<'a, S> {
    fn expect_count(&self, got: usize) -> Result<()> {
        if got != self.parties_quantity {
            return Err(SchnorrError::MismatchedCount {
                expected: self.parties_quantity,
                got,
            });
        }
        Ok(())
    }

    fn advance<T: AggregationState>(self, state: T) -> Aggregator<'a, T> {
        Aggregator {
            curve: self.curve,
            parties_quantity: self.parties_quantity,
            message: self.message,
            state,
        }
    }
}

impl<'a> Aggregator<'a, AwaitingPublicKeys> {
    /// Create a new Aggregator instance.
    ///
    /// # Arguments
    ///
    /// * `curve` - The curve parameters of the session.
    /// * `parties_quantity` - The number of signatories involved.
    /// * `message` - The message being signed.
    ///
    /// Returns an error if `parties_quantity` is 0.
    pub fn new(curve: &'a Curve, parties_quantity: usize, message: &'a [u8]) -> Result<Self> {
        if parties_quantity == 0 {
            return Err(SchnorrError::PartyCount);
        }
        Ok(Aggregator {
            curve,
            parties_quantity,
            message,
            state: AwaitingPublicKeys,
        })
    }

    /// Sum the signatories' public keys into the aggregate public key.
    ///
    /// The keys are kept in the order received; later rounds expect nonces
    /// and partial signatures in the same order.
    #[tracing::instrument(name = "Aggregating public keys", skip_all, fields(parties = public_keys.len()))]
    pub fn aggregate_public_keys(
        self,
        public_keys: Vec<PublicKeyMessage>,
    ) -> Result<(
        Aggregator<'a, AwaitingPublicNonces>,
        AggregatedPublicKeyMessage,
    )> {
        self.expect_count(public_keys.len())?;
        let public_keys: Vec<PublicKey> = public_keys.iter().map(|m| m.public_key).collect();
        let aggregated_public_key = aggregate_public_keys(self.curve, &public_keys)?;

        Ok((
            self.advance(AwaitingPublicNonces {
                public_keys,
                aggregated_public_key,
            }),
            AggregatedPublicKeyMessage {
                public_key: aggregated_public_key,
            },
        ))
    }
}

impl<'a> Aggregator<'a, AwaitingPublicNonces> {
    /// Sum the signatories' public nonces into the session commitment.
    #[tracing::instrument(name = "Aggregating public nonces", skip_all, fields(parties = nonces.len()))]
    pub fn aggregate_nonces(
        self,
        nonces: Vec<PublicNonceMessage>,
    ) -> Result<(
        Aggregator<'a, AwaitingPartialSignatures>,
        AggregatedNonceMessage,
    )> {
        self.expect_count(nonces.len())?;
        let public_nonces: Vec<PublicKey> = nonces.iter().map(|m| m.public_nonce).collect();
        let aggregated_nonce = aggregate_public_nonces(self.curve, &public_nonces)?;

        let AwaitingPublicNonces {
            public_keys,
            aggregated_public_key,
        } = self.state;
        let aggregator = Aggregator {
            curve: self.curve,
            parties_quantity: self.parties_quantity,
            message: self.message,
            state: AwaitingPartialSignatures {
                public_keys,
                aggregated_public_key,
                public_nonces,
                aggregated_nonce,
            },
        };
        Ok((
            aggregator,
            AggregatedNonceMessage {
                public_nonce: aggregated_nonce,
            },
        ))
    }
}

impl<'a> Aggregator<'a, AwaitingPartialSignatures> {
    /// Check every partial signature, then combine them.
    ///
    /// Fails with `InvalidPartialSignature { index }` naming the first
    /// signatory whose share does not match its published key and nonce.
    #[tracing::instrument(name = "Aggregating partial signatures", skip_all, fields(parties = partial_signatures.len()))]
    pub fn aggregate_signatures(
        self,
        partial_signatures: Vec<PartialSignatureMessage>,
    ) -> Result<(
        Aggregator<'a, AggregationFinalized>,
        AggregatedSignatureMessage,
    )> {
        self.expect_count(partial_signatures.len())?;
        let state = &self.state;

        let mut verified = Vec::with_capacity(partial_signatures.len());
        for (index, message) in partial_signatures.iter().enumerate() {
            if !verify_partial_signature(
                self.curve,
                &state.public_keys[index],
                &state.public_nonces[index],
                &state.aggregated_public_key,
                &state.aggregated_nonce,
                self.message,
                &message.partial_signature,
            ) {
                tracing::warn!(index, "rejecting invalid partial signature");
                return Err(SchnorrError::InvalidPartialSignature { index });
            }
            verified.push(message.partial_signature);
        }
        let signature = combine_signatures(&verified)?;
        let aggregated_public_key = state.aggregated_public_key;

        Ok((
            self.advance(AggregationFinalized {
                aggregated_public_key,
                signature,
            }),
            AggregatedSignatureMessage { signature },
        ))
    }
}

impl Aggregator<'_, AggregationFinalized> {
    /// Get the aggregated signature.
    pub fn signature(&self) -> Signature {
        self.state.signature
    }

    pub fn aggregated_public_key(&self) -> PublicKey {
        self.state.aggregated_public_key
    }

    /// Verify the aggregated signature against the aggregate public key.
    pub fn verify(&self) -> bool {
        verify(
            self.curve,
            &self.state.aggregated_public_key,
            self.message,
            &self.state.signature,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ED25519;
    use crate::schnorr_threshold::threshold_protocol::party::Signatory;
    use crate::scalar_arith::scalar_add;
    use curve25519_dalek::scalar::Scalar;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const MESSAGE: &[u8] = b"Hello World";

    // Runs a whole session with `n` signatories, returning the aggregator's
    // signature and the signature each signatory ended up accepting.
    fn run_session(n: usize, seed: u64) -> (Signature, Vec<Signature>, PublicKey) {
        let mut rng = StdRng::seed_from_u64(seed);

        let (signatories, pk_messages): (Vec<_>, Vec<_>) = (0..n)
            .map(|_| Signatory::new(&ED25519, MESSAGE, &mut rng).unwrap())
            .unzip();
        let aggregator = Aggregator::new(&ED25519, n, MESSAGE).unwrap();
        let (aggregator, agg_pk) = aggregator.aggregate_public_keys(pk_messages).unwrap();

        let (signatories, nonce_messages): (Vec<_>, Vec<_>) = signatories
            .into_iter()
            .map(|s| s.generate_nonce(agg_pk, &mut rng).unwrap())
            .unzip();
        let (aggregator, agg_nonce) = aggregator.aggregate_nonces(nonce_messages).unwrap();

        let (signatories, partials): (Vec<_>, Vec<_>) = signatories
            .into_iter()
            .map(|s| s.partial_sign(agg_nonce))
            .unzip();
        let (aggregator, agg_sig) = aggregator.aggregate_signatures(partials).unwrap();
        assert!(aggregator.verify());

        let accepted = signatories
            .into_iter()
            .map(|s| s.set_aggregated_signature(agg_sig).unwrap().signature())
            .collect();
        (aggregator.signature(), accepted, aggregator.aggregated_public_key())
    }

    #[test]
    fn test_single_party_session() {
        let (signature, accepted, public_key) = run_session(1, 1);
        assert_eq!(accepted, vec![signature]);
        assert!(verify(&ED25519, &public_key, MESSAGE, &signature));
    }

    #[test]
    fn test_multiple_party_session() {
        for n in 2..=10 {
            let (signature, accepted, public_key) = run_session(n, n as u64);
            assert!(accepted.iter().all(|s| *s == signature));
            assert!(verify(&ED25519, &public_key, MESSAGE, &signature));
        }
    }

    #[test]
    fn zero_parties_is_rejected() {
        assert_eq!(
            Aggregator::new(&ED25519, 0, MESSAGE).unwrap_err(),
            SchnorrError::PartyCount
        );
    }

    #[test]
    fn mismatched_quantity_is_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        let (_, pk_message) = Signatory::new(&ED25519, MESSAGE, &mut rng).unwrap();
        let aggregator = Aggregator::new(&ED25519, 2, MESSAGE).unwrap();
        assert_eq!(
            aggregator.aggregate_public_keys(vec![pk_message]).unwrap_err(),
            SchnorrError::MismatchedCount {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn forged_partial_signature_is_identified() {
        let mut rng = StdRng::seed_from_u64(4);
        let (signatories, pk_messages): (Vec<_>, Vec<_>) = (0..3)
            .map(|_| Signatory::new(&ED25519, MESSAGE, &mut rng).unwrap())
            .unzip();
        let aggregator = Aggregator::new(&ED25519, 3, MESSAGE).unwrap();
        let (aggregator, agg_pk) = aggregator.aggregate_public_keys(pk_messages).unwrap();
        let (signatories, nonce_messages): (Vec<_>, Vec<_>) = signatories
            .into_iter()
            .map(|s| s.generate_nonce(agg_pk, &mut rng).unwrap())
            .unzip();
        let (aggregator, agg_nonce) = aggregator.aggregate_nonces(nonce_messages).unwrap();
        let mut partials: Vec<PartialSignatureMessage> = signatories
            .into_iter()
            .map(|s| s.partial_sign(agg_nonce).1)
            .collect();

        let forged = partials[1].partial_signature;
        partials[1].partial_signature =
            Signature::new(*forged.r(), scalar_add(forged.s(), &Scalar::ONE));

        assert_eq!(
            aggregator.aggregate_signatures(partials).unwrap_err(),
            SchnorrError::InvalidPartialSignature { index: 1 }
        );
    }

    #[test]
    fn signatory_rejects_a_bad_aggregated_signature() {
        let mut rng = StdRng::seed_from_u64(5);
        let (signatory, pk_message) = Signatory::new(&ED25519, MESSAGE, &mut rng).unwrap();
        let aggregator = Aggregator::new(&ED25519, 1, MESSAGE).unwrap();
        let (_, agg_pk) = aggregator.aggregate_public_keys(vec![pk_message]).unwrap();
        let (signatory, nonce_message) = signatory.generate_nonce(agg_pk, &mut rng).unwrap();
        let agg_nonce = AggregatedNonceMessage {
            public_nonce: nonce_message.public_nonce,
        };
        let (signatory, partial) = signatory.partial_sign(agg_nonce);

        let good = partial.partial_signature;
        let bad = Signature::new(*good.r(), scalar_add(good.s(), &Scalar::ONE));
        assert_eq!(
            signatory
                .set_aggregated_signature(AggregatedSignatureMessage { signature: bad })
                .unwrap_err(),
            SchnorrError::InvalidSignature
        );
    }

    #[test]
    fn partial_signing_runs_in_parallel() {
        let mut rng = StdRng::seed_from_u64(6);
        let n = 4;
        let (signatories, pk_messages): (Vec<_>, Vec<_>) = (0..n)
            .map(|_| Signatory::new(&ED25519, MESSAGE, &mut rng).unwrap())
            .unzip();
        let aggregator = Aggregator::new(&ED25519, n, MESSAGE).unwrap();
        let (aggregator, agg_pk) = aggregator.aggregate_public_keys(pk_messages).unwrap();
        let (signatories, nonce_messages): (Vec<_>, Vec<_>) = signatories
            .into_iter()
            .map(|s| s.generate_nonce(agg_pk, &mut rng).unwrap())
            .unzip();
        let (aggregator, agg_nonce) = aggregator.aggregate_nonces(nonce_messages).unwrap();

        let partials: Vec<PartialSignatureMessage> = std::thread::scope(|scope| {
            let handles: Vec<_> = signatories
                .into_iter()
                .map(|s| scope.spawn(move || s.partial_sign(agg_nonce).1))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let (aggregator, _) = aggregator.aggregate_signatures(partials).unwrap();
        assert!(aggregator.verify());
    }

    #[test]
    fn messages_survive_serialization() {
        let mut rng = StdRng::seed_from_u64(7);
        let (signatory, pk_message) = Signatory::new(&ED25519, MESSAGE, &mut rng).unwrap();
        let json = serde_json::to_string(&pk_message).unwrap();
        let decoded: PublicKeyMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, pk_message);
        assert_eq!(decoded.public_key, signatory.public_key());

        let aggregator = Aggregator::new(&ED25519, 1, MESSAGE).unwrap();
        let (aggregator, agg_pk) = aggregator.aggregate_public_keys(vec![decoded]).unwrap();
        let (signatory, nonce_message) = signatory.generate_nonce(agg_pk, &mut rng).unwrap();
        let (_, agg_nonce) = aggregator.aggregate_nonces(vec![nonce_message]).unwrap();
        let (_, partial) = signatory.partial_sign(agg_nonce);

        let json = serde_json::to_string(&partial).unwrap();
        let decoded: PartialSignatureMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, partial);
    }
}
