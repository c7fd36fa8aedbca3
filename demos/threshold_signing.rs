use rand_core::OsRng;
use threshold_schnorr::aggregator::Aggregator;
use threshold_schnorr::party::Signatory;
use threshold_schnorr::telemetry::{get_subscriber, init_subscriber};
use threshold_schnorr::{SchnorrError, ED25519};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = get_subscriber("threshold_signing".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    // Message to be signed
    let message_to_sign = b"Hello World";
    let parties = 3;

    // Randomness source
    let mut csprng = OsRng;

    // The first round of public keys aggregation
    let (signatories, pub_key_messages): (Vec<_>, Vec<_>) = (0..parties)
        .map(|_| Signatory::new(&ED25519, &message_to_sign[..], &mut csprng))
        .collect::<Result<Vec<_>, SchnorrError>>()?
        .into_iter()
        .unzip();
    let aggregator = Aggregator::new(&ED25519, parties, message_to_sign)?;
    let (aggregator, aggregated_public_key) = aggregator.aggregate_public_keys(pub_key_messages)?;

    // The second round of public nonces aggregation
    let (signatories, nonce_messages): (Vec<_>, Vec<_>) = signatories
        .into_iter()
        .map(|signatory| signatory.generate_nonce(aggregated_public_key, &mut csprng))
        .collect::<Result<Vec<_>, SchnorrError>>()?
        .into_iter()
        .unzip();
    let (aggregator, agg_nonce_message) = aggregator.aggregate_nonces(nonce_messages)?;

    // The third round of signatures aggregation
    let (_signatories, part_sig_messages): (Vec<_>, Vec<_>) = signatories
        .into_iter()
        .map(|signatory| signatory.partial_sign(agg_nonce_message))
        .unzip();
    let (aggregator, agg_sig_message) = aggregator.aggregate_signatures(part_sig_messages)?;

    let result = aggregator.verify();
    println!("Signature: {}", agg_sig_message.signature);
    println!("Verification result: {:?}", result);
    assert!(result);
    Ok(())
}
