//! Test vector generator for hypersig verification.
//!
//! Generates a key pair with a small lifetime, signs a fixed message, and
//! writes the complete verification input (public key, epoch, message,
//! signature) as postcard bytes. Consumers can deserialize the vector and
//! re-run verification without touching key generation.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use hypersig::signature::instantiations_sha::SIGWinternitzLifetime2W4;
use hypersig::{SignatureScheme, MESSAGE_LENGTH};

type Scheme = SIGWinternitzLifetime2W4;

/// Complete input for one verification, in serialization order.
#[derive(Serialize, Deserialize)]
struct VerifyInput {
    public_key: <Scheme as SignatureScheme>::PublicKey,
    epoch: u32,
    message: [u8; MESSAGE_LENGTH],
    signature: <Scheme as SignatureScheme>::Signature,
}

fn generate_input() -> VerifyInput {
    let mut rng = rand::rng();

    let (pk, sk) = Scheme::key_gen(&mut rng, 0, 4);

    let message: [u8; MESSAGE_LENGTH] = [
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
        0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e,
        0x1f, 0x20,
    ];
    let epoch = 0u32;

    let signature =
        Scheme::sign(&mut rng, &sk, epoch, &message).expect("signing cannot fail for Winternitz");
    assert!(
        Scheme::verify(&pk, epoch, &message, &signature),
        "generated signature must verify"
    );

    VerifyInput {
        public_key: pk,
        epoch,
        message,
        signature,
    }
}

fn write_vector<P: AsRef<Path>>(path: P, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(bytes)
}

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/input.bin".to_string());

    println!("=== hypersig Test Vector Generator ===");
    println!("Scheme: SHA3 Winternitz w=4, lifetime 4\n");

    let input = generate_input();
    let serialized = postcard::to_allocvec(&input).expect("serialization failed");

    write_vector(&output_path, &serialized).expect("failed to write test vector");

    println!("Generated VerifyInput:");
    println!("  - Epoch: {}", input.epoch);
    println!("  - Message length: {} bytes", input.message.len());
    println!(
        "  - Merkle path depth: {} levels",
        input.signature.path.co_path.len()
    );
    println!("  - Hash chains: {} chains", input.signature.hashes.len());
    println!("\nSerialized size: {} bytes", serialized.len());
    println!("Test vector written to {output_path}");

    // roundtrip: deserialize and verify again
    let decoded: VerifyInput =
        postcard::from_bytes(&serialized).expect("roundtrip deserialization failed");
    assert!(
        Scheme::verify(
            &decoded.public_key,
            decoded.epoch,
            &decoded.message,
            &decoded.signature
        ),
        "roundtrip verification failed"
    );
    println!("Roundtrip verification passed");
}
