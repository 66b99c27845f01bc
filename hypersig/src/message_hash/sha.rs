//! SHA3-based message hash producing fixed-width bit chunks.

use rand::Rng;
use sha3::{Digest, Sha3_256};

use crate::{MESSAGE_LENGTH, TWEAK_SEPARATOR_FOR_MESSAGE_HASH};

use super::{bytes_to_chunks, MessageHash};

/// Message hash built from SHA3-256.
///
/// Hashes `randomness || parameter || separator || epoch || message`,
/// truncates the digest to `NUM_CHUNKS * CHUNK_SIZE / 8` bytes, and splits
/// the result into `CHUNK_SIZE`-bit chunks.
pub struct ShaMessageHash<
    const PARAMETER_LEN: usize,
    const RAND_LEN: usize,
    const NUM_CHUNKS: usize,
    const CHUNK_SIZE: usize,
>;

impl<
        const PARAMETER_LEN: usize,
        const RAND_LEN: usize,
        const NUM_CHUNKS: usize,
        const CHUNK_SIZE: usize,
    > MessageHash for ShaMessageHash<PARAMETER_LEN, RAND_LEN, NUM_CHUNKS, CHUNK_SIZE>
{
    type Parameter = [u8; PARAMETER_LEN];
    type Randomness = [u8; RAND_LEN];

    const DIMENSION: usize = NUM_CHUNKS;
    const BASE: usize = 1 << CHUNK_SIZE;

    fn rand<R: Rng>(rng: &mut R) -> Self::Randomness {
        let mut randomness = [0u8; RAND_LEN];
        rng.fill(&mut randomness[..]);
        randomness
    }

    fn apply(
        parameter: &Self::Parameter,
        epoch: u32,
        randomness: &Self::Randomness,
        message: &[u8; MESSAGE_LENGTH],
    ) -> Vec<u8> {
        let mut hasher = Sha3_256::new();
        hasher.update(randomness);
        hasher.update(parameter);
        hasher.update([TWEAK_SEPARATOR_FOR_MESSAGE_HASH]);
        hasher.update(epoch.to_be_bytes());
        hasher.update(message);
        let digest = hasher.finalize();

        let num_bytes = NUM_CHUNKS * CHUNK_SIZE / 8;
        bytes_to_chunks(&digest[..num_bytes], CHUNK_SIZE)
    }

    fn internal_consistency_check() {
        assert!(
            matches!(CHUNK_SIZE, 1 | 2 | 4 | 8),
            "SHA message hash: chunk size must be 1, 2, 4, or 8"
        );
        assert!(
            (NUM_CHUNKS * CHUNK_SIZE) % 8 == 0,
            "SHA message hash: output must span whole bytes"
        );
        assert!(
            NUM_CHUNKS * CHUNK_SIZE / 8 <= 32,
            "SHA message hash: output exceeds SHA3-256 digest size"
        );
        assert!(
            NUM_CHUNKS <= 256,
            "SHA message hash: at most 256 chunks are supported"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestMh = ShaMessageHash<18, 23, 36, 4>;

    #[test]
    fn test_output_shape() {
        let parameter = [1u8; 18];
        let randomness = [2u8; 23];
        let message = [3u8; MESSAGE_LENGTH];

        let chunks = TestMh::apply(&parameter, 0, &randomness, &message);
        assert_eq!(chunks.len(), TestMh::DIMENSION);
        assert!(chunks.iter().all(|&c| (c as usize) < TestMh::BASE));
    }

    #[test]
    fn test_epoch_binding() {
        let parameter = [1u8; 18];
        let randomness = [2u8; 23];
        let message = [3u8; MESSAGE_LENGTH];

        let a = TestMh::apply(&parameter, 0, &randomness, &message);
        let b = TestMh::apply(&parameter, 1, &randomness, &message);
        assert_ne!(a, b);
    }

    #[test]
    fn test_randomness_changes_output() {
        let parameter = [1u8; 18];
        let message = [3u8; MESSAGE_LENGTH];

        let a = TestMh::apply(&parameter, 0, &[2u8; 23], &message);
        let b = TestMh::apply(&parameter, 0, &[4u8; 23], &message);
        assert_ne!(a, b);
    }

    #[test]
    fn test_consistency_check_passes_for_presets() {
        ShaMessageHash::<18, 23, 144, 1>::internal_consistency_check();
        ShaMessageHash::<18, 23, 72, 2>::internal_consistency_check();
        ShaMessageHash::<18, 23, 36, 4>::internal_consistency_check();
        ShaMessageHash::<18, 23, 18, 8>::internal_consistency_check();
    }
}
