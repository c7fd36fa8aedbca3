use crate::curve::Curve;
use crate::errors::{Result, SchnorrError};
use crate::keys_management::{
    aggregate_public_keys, decode_secret_scalar, random_nonzero_scalar, PublicKey, KEY_LENGTH,
};
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};
use secrecy::{ExposeSecret, Secret};
use zeroize::Zeroizing;

/// A one-time signing nonce `k` and its commitment `k·B`.
///
/// Must be fresh for every signing session; reusing it across two messages
/// reveals the private key.
pub struct RandomNonce {
    pub(crate) r_public: PublicKey,
    pub(crate) r_private: Secret<Scalar>,
}

use std::fmt;
impl fmt::Debug for RandomNonce {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Format the RandomNonce struct without including r_private
        write!(f, "RandomNonce {{ r_public: {:?} }}", self.r_public)
    }
}

impl Clone for RandomNonce {
    fn clone(&self) -> Self {
        RandomNonce {
            r_public: self.r_public,
            r_private: Secret::new(*self.r_private.expose_secret()),
        }
    }
}

impl RandomNonce {
    fn from_secret(curve: &Curve, r_private: Secret<Scalar>) -> RandomNonce {
        let r_public = PublicKey::derive(curve, r_private.expose_secret());
        RandomNonce {
            r_public,
            r_private,
        }
    }

    pub fn generate<R>(curve: &Curve, rng: &mut R) -> Result<RandomNonce>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let r_private = random_nonzero_scalar(curve, rng)?;
        Ok(RandomNonce::from_secret(curve, r_private))
    }

    /// Builds a nonce from 32 little-endian scalar bytes, reduced mod `N`.
    ///
    /// Zero gives [`SchnorrError::InvalidNonce`].
    pub fn from_bytes(curve: &Curve, bytes: &[u8]) -> Result<RandomNonce> {
        let r_private = decode_secret_scalar(curve, bytes, "secret nonce").map_err(|err| match err {
            SchnorrError::InvalidKey => SchnorrError::InvalidNonce,
            other => other,
        })?;
        Ok(RandomNonce::from_secret(curve, r_private))
    }

    pub fn to_bytes(&self) -> Zeroizing<[u8; KEY_LENGTH]> {
        Zeroizing::new(self.r_private.expose_secret().to_bytes())
    }

    pub fn public_nonce(&self) -> PublicKey {
        self.r_public
    }
}

/// Sums public nonces into the aggregate commitment of a signing session.
pub fn aggregate_public_nonces(curve: &Curve, public_nonces: &[PublicKey]) -> Result<PublicKey> {
    aggregate_public_keys(curve, public_nonces).map_err(|err| match err {
        SchnorrError::InvalidKey => SchnorrError::InvalidNonce,
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ED25519;
    use crate::keys_management::tests::ZeroFirstRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn nonce_round_trip() {
        let mut rng = StdRng::seed_from_u64(1);
        let nonce = RandomNonce::generate(&ED25519, &mut rng).unwrap();
        let restored = RandomNonce::from_bytes(&ED25519, &nonce.to_bytes()[..]).unwrap();
        assert_eq!(restored.public_nonce(), nonce.public_nonce());
        assert_eq!(*restored.to_bytes(), *nonce.to_bytes());
    }

    #[test]
    fn fresh_nonces_differ() {
        let mut rng = StdRng::seed_from_u64(2);
        let a = RandomNonce::generate(&ED25519, &mut rng).unwrap();
        let b = RandomNonce::generate(&ED25519, &mut rng).unwrap();
        assert_ne!(a.public_nonce(), b.public_nonce());
    }

    #[test]
    fn zero_sample_is_drawn_again() {
        let mut rng = ZeroFirstRng::default();
        let nonce = RandomNonce::generate(&ED25519, &mut rng).unwrap();
        assert_eq!(rng.draws, 2);
        assert_eq!(
            *nonce.to_bytes(),
            ED25519.reduce_wide(&[1u8; 64]).to_bytes()
        );
    }

    #[test]
    fn zero_nonce_is_invalid_nonce() {
        assert_eq!(
            RandomNonce::from_bytes(&ED25519, &[0u8; 32]).unwrap_err(),
            SchnorrError::InvalidNonce
        );
        assert_eq!(
            RandomNonce::from_bytes(&ED25519, &[0u8; 12]).unwrap_err(),
            SchnorrError::MalformedInput("secret nonce")
        );
    }

    #[test]
    fn debug_output_hides_secret() {
        let mut rng = StdRng::seed_from_u64(3);
        let nonce = RandomNonce::generate(&ED25519, &mut rng).unwrap();
        let printed = format!("{:?}", nonce);
        assert!(printed.starts_with("RandomNonce { r_public"));
        assert!(!printed.contains("r_private"));
    }

    #[test]
    fn aggregate_nonce_errors() {
        assert_eq!(
            aggregate_public_nonces(&ED25519, &[]).unwrap_err(),
            SchnorrError::EmptyInput
        );
    }
}
