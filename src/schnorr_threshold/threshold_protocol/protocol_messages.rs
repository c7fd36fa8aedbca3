// The messages exchanged between signatories and the aggregator during one
// signing session. Only public values ever appear here.
use crate::keys_management::PublicKey;
use crate::signature::Signature;
use serde::{Deserialize, Serialize};

/// Round 1, signatory to aggregator: the signatory's public key share.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct PublicKeyMessage {
    pub public_key: PublicKey,
}

/// Round 1, aggregator to signatories: the sum of all public key shares.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct AggregatedPublicKeyMessage {
    pub public_key: PublicKey,
}

/// Round 2, signatory to aggregator: the signatory's public nonce.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct PublicNonceMessage {
    pub public_nonce: PublicKey,
}

/// Round 2, aggregator to signatories: the sum of all public nonces.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct AggregatedNonceMessage {
    pub public_nonce: PublicKey,
}

/// Round 3, signatory to aggregator: a partial signature.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartialSignatureMessage {
    pub partial_signature: Signature,
}

/// Final result, aggregator to signatories.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct AggregatedSignatureMessage {
    pub signature: Signature,
}
