//! Curve parameters.
//!
//! The protocol runs over the twisted Edwards form of curve25519,
//! `-x^2 + y^2 = 1 + d x^2 y^2` over `GF(2^255 - 19)`, restricted to the
//! prime-order subgroup generated by the Ed25519 base point. The parameter
//! set is an immutable value: build it once (or use [`ED25519`]) and pass a
//! reference to every operation that needs it.

use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;
use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::scalar::Scalar;

/// Order `N` of the base point, little-endian:
/// `2^252 + 27742317777372353535851937790883648493`.
pub(crate) const ED25519_ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

/// The "25519" parameter set.
pub static ED25519: Curve = Curve::ed25519();

/// A twisted Edwards curve instance: base point and group order.
#[derive(Clone, Copy, Debug)]
pub struct Curve {
    name: &'static str,
    basepoint: EdwardsPoint,
    order: [u8; 32],
}

impl Curve {
    pub const fn ed25519() -> Curve {
        Curve {
            name: "ed25519",
            basepoint: ED25519_BASEPOINT_POINT,
            order: ED25519_ORDER,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn basepoint(&self) -> &EdwardsPoint {
        &self.basepoint
    }

    /// Scalar multiplication of the base point. Constant time in `scalar`.
    pub fn mul_base(&self, scalar: &Scalar) -> EdwardsPoint {
        scalar * self.basepoint
    }

    /// Point addition.
    pub fn add(&self, p: &EdwardsPoint, q: &EdwardsPoint) -> EdwardsPoint {
        p + q
    }

    /// Interprets 32 little-endian bytes as an integer and reduces it mod `N`.
    pub fn reduce(&self, bytes: [u8; 32]) -> Scalar {
        Scalar::from_bytes_mod_order(bytes)
    }

    /// Reduces a 512-bit little-endian integer mod `N`, used for uniform
    /// sampling from random bytes.
    pub fn reduce_wide(&self, bytes: &[u8; 64]) -> Scalar {
        Scalar::from_bytes_mod_order_wide(bytes)
    }

    /// Whether `bytes` encode an integer strictly below `N`.
    ///
    /// Variable time: only for public values such as a signature's `S`.
    pub fn is_canonical(&self, bytes: &[u8; 32]) -> bool {
        for (byte, bound) in bytes.iter().rev().zip(self.order.iter().rev()) {
            if byte != bound {
                return byte < bound;
            }
        }
        false
    }
}

impl Default for Curve {
    fn default() -> Self {
        Curve::ed25519()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::traits::IsIdentity;

    #[test]
    fn order_reduces_to_zero() {
        let curve = ED25519;
        assert_eq!(curve.reduce(ED25519_ORDER), Scalar::ZERO);
        assert!(!curve.is_canonical(&ED25519_ORDER));
        assert!(!curve.is_canonical(&[0xff; 32]));
    }

    #[test]
    fn order_minus_one_is_canonical() {
        let curve = ED25519;
        let mut bytes = ED25519_ORDER;
        bytes[0] -= 1;
        assert!(curve.is_canonical(&bytes));
        assert_eq!(curve.reduce(bytes), -Scalar::ONE);
    }

    #[test]
    fn canonical_check_agrees_with_scalar_decoding() {
        let curve = ED25519;
        let mut above = ED25519_ORDER;
        above[1] += 1;
        let mut below_high_byte = ED25519_ORDER;
        below_high_byte[31] -= 1;
        for bytes in [[0u8; 32], [7u8; 32], above, below_high_byte, Scalar::ONE.to_bytes()] {
            let decoded: Option<Scalar> = Scalar::from_canonical_bytes(bytes).into();
            assert_eq!(curve.is_canonical(&bytes), decoded.is_some());
        }
    }

    #[test]
    fn basepoint_lies_in_prime_order_subgroup() {
        let curve = ED25519;
        assert!(curve.basepoint().is_torsion_free());
        assert!(!curve.basepoint().is_small_order());
        assert!(curve.mul_base(&Scalar::ZERO).is_identity());
    }

    #[test]
    fn mul_base_matches_precomputed_table() {
        let curve = ED25519;
        let scalar = curve.reduce([7u8; 32]);
        assert_eq!(curve.mul_base(&scalar), EdwardsPoint::mul_base(&scalar));
        assert_eq!(curve.mul_base(&Scalar::ONE), ED25519_BASEPOINT_POINT);
    }

    #[test]
    fn add_agrees_with_scalar_addition() {
        let curve = ED25519;
        let a = curve.reduce([3u8; 32]);
        let b = curve.reduce([5u8; 32]);
        let sum = curve.add(&curve.mul_base(&a), &curve.mul_base(&b));
        assert_eq!(sum, curve.mul_base(&(a + b)));
    }
}
