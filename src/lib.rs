//! # Threshold Schnorr Signature Library
//!
//! This Rust library implements Schnorr signatures over the twisted Edwards form of
//! curve25519, signed either by a single party or jointly by a group of signatories,
//! based on the curve25519_dalek library.
//!
//! ## Overview of Schnorr Signatures
//!
//! - Key Pair Generation: a signer draws a private scalar x and publishes X = x * B, where B is the
//!   base point of the curve.
//! - Signing: (R, S) = (kB, k + H(R, X, m)x) where k is a fresh random nonce.
//! - Verification: SB = R + H(R, X, m)X
//!
//! `H` is SHA-512 over the compressed encodings of `R` and `X` followed by the message,
//! reduced modulo the group order `N`.
//!
//! ## Threshold Signing
//!
//! n signatories hold private key shares x1, …, xn and draw nonce shares k1, …, kn.
//!
//! 1. Every signatory publishes Xi = xi * B. The aggregate public key is X = sum(Xi).
//! 2. Every signatory publishes Ri = ki * B. The aggregate nonce is R = sum(Ri).
//! 3. Each signatory computes Si = ki + H(R, X, m) * xi, using the aggregates, not its own shares.
//! 4. The partial signatures are combined into (R, S) with S = sum(Si).
//!
//! The combined signature is exactly the signature that sum(xi) would produce with nonce sum(ki),
//! so it verifies as an ordinary Schnorr signature against X. No signatory ever holds either sum.
//!
//! ## Usage
//!
//! ```
//! use rand::rngs::OsRng;
//! use threshold_schnorr::{
//!     aggregate_public_keys, aggregate_public_nonces, combine_signatures, generate_key,
//!     partial_sign, verify, RandomNonce, ED25519,
//! };
//!
//! let message = b"Hello World";
//! let keys = [generate_key(&ED25519, &mut OsRng)?, generate_key(&ED25519, &mut OsRng)?];
//! let nonces = [RandomNonce::generate(&ED25519, &mut OsRng)?, RandomNonce::generate(&ED25519, &mut OsRng)?];
//!
//! let public_keys: Vec<_> = keys.iter().map(|k| k.public_key()).collect();
//! let public_nonces: Vec<_> = nonces.iter().map(|k| k.public_nonce()).collect();
//! let aggregate_key = aggregate_public_keys(&ED25519, &public_keys)?;
//! let aggregate_nonce = aggregate_public_nonces(&ED25519, &public_nonces)?;
//!
//! let partials = keys
//!     .iter()
//!     .zip(&nonces)
//!     .map(|(key, nonce)| {
//!         partial_sign(
//!             &ED25519,
//!             message,
//!             &key.to_bytes()[..],
//!             &aggregate_key.to_bytes(),
//!             &nonce.to_bytes()[..],
//!             &aggregate_nonce.to_bytes(),
//!         )
//!     })
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let signature = combine_signatures(&partials)?;
//! assert!(verify(&ED25519, &aggregate_key, message, &signature));
//! # Ok::<(), threshold_schnorr::SchnorrError>(())
//! ```
//!
//! For a typestate walk through the three rounds see [`party::Signatory`] and
//! [`aggregator::Aggregator`].

pub mod curve;
pub mod errors;
pub mod keys_management;
pub mod rand_nonce;
pub mod scalar_arith;
pub mod schnorr_single_signature;
pub mod schnorr_threshold;
pub mod signature;

#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use crate::curve::{Curve, ED25519};
pub use crate::errors::{Result, SchnorrError};
pub use crate::keys_management::{
    aggregate_public_keys, generate_key, private_key_from_scalar, PrivateKey, PublicKey,
};
pub use crate::rand_nonce::{aggregate_public_nonces, RandomNonce};
pub use crate::schnorr_single_signature::{sign, sign_from_scalar, verify, verify_bytes};
pub use crate::schnorr_threshold::threshold_math::{
    combine_signatures, partial_sign, partial_signature, verify_partial_signature,
};
pub use crate::schnorr_threshold::threshold_protocol::aggregator;
pub use crate::schnorr_threshold::threshold_protocol::party;
pub use crate::schnorr_threshold::threshold_protocol::protocol_messages;
pub use crate::signature::Signature;
