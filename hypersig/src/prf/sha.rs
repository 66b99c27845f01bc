//! SHA3-based PRF with byte-array outputs.

use rand::Rng;
use sha3::{Digest, Sha3_256};

use crate::{PRF_DOMAIN_SEP, PRF_KEY_LENGTH};

use super::Pseudorandom;

/// PRF mapping (key, epoch, index) to `OUTPUT_LEN` bytes via SHA3-256.
///
/// `OUTPUT_LEN` must match the domain length of the tweakable hash the
/// scheme pairs this PRF with.
pub struct ShaPrf<const OUTPUT_LEN: usize>;

impl<const OUTPUT_LEN: usize> Pseudorandom for ShaPrf<OUTPUT_LEN> {
    type Key = [u8; PRF_KEY_LENGTH];
    type Output = [u8; OUTPUT_LEN];

    fn key_gen<R: Rng>(rng: &mut R) -> Self::Key {
        let mut key = [0u8; PRF_KEY_LENGTH];
        rng.fill(&mut key[..]);
        key
    }

    fn apply(key: &Self::Key, epoch: u32, index: u64) -> Self::Output {
        let mut hasher = Sha3_256::new();
        hasher.update(PRF_DOMAIN_SEP);
        hasher.update(key);
        hasher.update(epoch.to_be_bytes());
        hasher.update(index.to_be_bytes());
        let digest = hasher.finalize();

        let mut output = [0u8; OUTPUT_LEN];
        output.copy_from_slice(&digest[..OUTPUT_LEN]);
        output
    }

    fn internal_consistency_check() {
        assert!(
            OUTPUT_LEN <= 32,
            "SHA PRF: output length exceeds SHA3-256 digest size"
        );
    }
}
