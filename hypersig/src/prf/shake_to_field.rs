//! SHAKE128-based PRF with BabyBear field-element outputs, for the
//! algebraic tweakable hash instantiations.

use rand::Rng;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake128;

use crate::babybear::BabyBear;
use crate::{PRF_DOMAIN_SEP, PRF_KEY_LENGTH};

use super::Pseudorandom;

/// Number of XOF bytes consumed per output field element.
const PRF_BYTES_PER_FE: usize = 8;

/// PRF mapping (key, epoch, index) to `OUTPUT_LEN_FE` BabyBear elements.
///
/// Each element is taken from 8 XOF bytes interpreted as a big-endian
/// integer and reduced mod p; the bias from the reduction is negligible at
/// 64 input bits per 31-bit element.
pub struct ShakePrfToField<const OUTPUT_LEN_FE: usize>;

impl<const OUTPUT_LEN_FE: usize> Pseudorandom for ShakePrfToField<OUTPUT_LEN_FE> {
    type Key = [u8; PRF_KEY_LENGTH];
    type Output = [BabyBear; OUTPUT_LEN_FE];

    fn key_gen<R: Rng>(rng: &mut R) -> Self::Key {
        let mut key = [0u8; PRF_KEY_LENGTH];
        rng.fill(&mut key[..]);
        key
    }

    fn apply(key: &Self::Key, epoch: u32, index: u64) -> Self::Output {
        let mut hasher = Shake128::default();
        hasher.update(&PRF_DOMAIN_SEP);
        hasher.update(key);
        hasher.update(&epoch.to_be_bytes());
        hasher.update(&index.to_be_bytes());
        let mut reader = hasher.finalize_xof();

        let mut output = [BabyBear::ZERO; OUTPUT_LEN_FE];
        for elem in &mut output {
            let mut chunk = [0u8; PRF_BYTES_PER_FE];
            reader.read(&mut chunk);
            *elem = BabyBear::from_u64(u64::from_be_bytes(chunk));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::babybear::P;

    #[test]
    fn test_deterministic() {
        let key = [3u8; PRF_KEY_LENGTH];
        assert_eq!(
            ShakePrfToField::<7>::apply(&key, 1, 2),
            ShakePrfToField::<7>::apply(&key, 1, 2)
        );
    }

    #[test]
    fn test_outputs_are_canonical() {
        let key = [0xabu8; PRF_KEY_LENGTH];
        for index in 0..32 {
            let out = ShakePrfToField::<8>::apply(&key, 9, index);
            assert!(out.iter().all(|fe| fe.value() < P));
        }
    }

    #[test]
    fn test_epoch_and_index_separation() {
        let key = [3u8; PRF_KEY_LENGTH];
        let base = ShakePrfToField::<7>::apply(&key, 1, 2);
        assert_ne!(base, ShakePrfToField::<7>::apply(&key, 2, 2));
        assert_ne!(base, ShakePrfToField::<7>::apply(&key, 1, 3));
    }
}
