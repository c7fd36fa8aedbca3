use rand_core::OsRng;
use threshold_schnorr::{generate_key, sign, verify, ED25519};

fn main() -> Result<(), threshold_schnorr::SchnorrError> {
    let mut csprng = OsRng;
    // Create participant keys
    let keys = generate_key(&ED25519, &mut csprng)?;

    // Message to be signed
    let message = b"Hello World";

    // Signature generation
    let signature = sign(&ED25519, &keys, message, &mut csprng)?;

    // Verification of the signature
    let result = verify(&ED25519, &keys.public_key(), message, &signature);

    println!("Verification result: {:?}", result);
    assert!(result);
    Ok(())
}
