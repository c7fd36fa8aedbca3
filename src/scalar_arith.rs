//! Scalar arithmetic modulo the curve order `N`.
//!
//! `Scalar` values are always reduced, and the underlying `curve25519-dalek`
//! arithmetic has no branches or table lookups that depend on operand
//! values, so these helpers are safe to use on key and nonce shares.

use curve25519_dalek::scalar::Scalar;
use std::borrow::Borrow;

/// `(a + b) mod N`.
pub fn scalar_add(a: &Scalar, b: &Scalar) -> Scalar {
    a + b
}

/// Sum of all `scalars` modulo `N`. The empty sum is zero.
pub fn scalar_sum<I>(scalars: I) -> Scalar
where
    I: IntoIterator,
    I::Item: Borrow<Scalar>,
{
    scalars
        .into_iter()
        .fold(Scalar::ZERO, |acc, s| scalar_add(&acc, s.borrow()))
}
