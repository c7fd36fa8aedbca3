#![no_main]

use libfuzzer_sys::fuzz_target;

use rand::rngs::StdRng;
use rand::SeedableRng;
use threshold_schnorr::aggregator::Aggregator;
use threshold_schnorr::party::Signatory;
use threshold_schnorr::{generate_key, private_key_from_scalar, SchnorrError, ED25519};

fuzz_target!(|data: &[u8]| {
    // Message to be signed
    let message_to_sign = b"Hello world";

    // Randomness source
    let mut seeded_rng = StdRng::seed_from_u64(123);

    let fuzzed_key = match private_key_from_scalar(&ED25519, data) {
        Ok(key) => key,
        Err(SchnorrError::MalformedInput(_)) | Err(SchnorrError::InvalidKey) => return,
        Err(err) => panic!("unexpected error {err}"),
    };
    let other_key = generate_key(&ED25519, &mut seeded_rng).expect("Error");

    // The first round of public keys aggregation
    let (party_a, pk_a) = Signatory::from_private_key(&ED25519, fuzzed_key, &message_to_sign[..]);
    let (party_b, pk_b) = Signatory::from_private_key(&ED25519, other_key, &message_to_sign[..]);
    let aggregator = Aggregator::new(&ED25519, 2, message_to_sign).expect("Error");
    let (aggregator, aggregated_public_key) = match aggregator.aggregate_public_keys(vec![pk_a, pk_b]) {
        Ok(result) => result,
        // The fuzzed key can be the exact negation of the other one.
        Err(SchnorrError::InvalidKey) => return,
        Err(err) => panic!("unexpected error {err}"),
    };

    // The second round of public nonces aggregation
    let (party_a, nonce_a) = party_a
        .generate_nonce(aggregated_public_key, &mut seeded_rng)
        .expect("Error");
    let (party_b, nonce_b) = party_b
        .generate_nonce(aggregated_public_key, &mut seeded_rng)
        .expect("Error");
    let (aggregator, agg_nonce_message) = aggregator
        .aggregate_nonces(vec![nonce_a, nonce_b])
        .expect("Error");

    // The third round of signatures aggregation
    let (_party_a, part_sig_a) = party_a.partial_sign(agg_nonce_message);
    let (_party_b, part_sig_b) = party_b.partial_sign(agg_nonce_message);
    let (aggregator, _agg_sig_message) = aggregator
        .aggregate_signatures(vec![part_sig_a, part_sig_b])
        .expect("Error");

    assert!(aggregator.verify());
});
