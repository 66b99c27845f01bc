//! SHA3-based tweakable hash with byte-array parameters and domains.

use rand::Rng;
use sha3::{Digest, Sha3_256};

use crate::{TWEAK_SEPARATOR_FOR_CHAIN_HASH, TWEAK_SEPARATOR_FOR_TREE_HASH};

use super::TweakableHash;

/// Tweak for the SHA3 tweakable hash, serialized into a short byte string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaTweak {
    Tree { level: u8, pos_in_level: u32 },
    Chain { epoch: u32, chain_index: u8, pos_in_chain: u8 },
}

impl ShaTweak {
    /// Byte-exact encoding: 6 bytes for tree tweaks, 7 for chain tweaks,
    /// each starting with its separator so the spaces cannot overlap.
    pub fn to_bytes(self) -> Vec<u8> {
        match self {
            Self::Tree { level, pos_in_level } => {
                let mut bytes = Vec::with_capacity(6);
                bytes.push(TWEAK_SEPARATOR_FOR_TREE_HASH);
                bytes.push(level);
                bytes.extend_from_slice(&pos_in_level.to_be_bytes());
                bytes
            }
            Self::Chain {
                epoch,
                chain_index,
                pos_in_chain,
            } => {
                let mut bytes = Vec::with_capacity(7);
                bytes.push(TWEAK_SEPARATOR_FOR_CHAIN_HASH);
                bytes.extend_from_slice(&epoch.to_be_bytes());
                bytes.push(chain_index);
                bytes.push(pos_in_chain);
                bytes
            }
        }
    }
}

/// Tweakable hash built from SHA3-256.
///
/// Hashes `parameter || tweak || message` and truncates the digest to
/// `HASH_LEN` bytes.
pub struct ShaTweakHash<const PARAMETER_LEN: usize, const HASH_LEN: usize>;

impl<const PARAMETER_LEN: usize, const HASH_LEN: usize> TweakableHash
    for ShaTweakHash<PARAMETER_LEN, HASH_LEN>
{
    type Parameter = [u8; PARAMETER_LEN];
    type Tweak = ShaTweak;
    type Domain = [u8; HASH_LEN];

    fn rand_parameter<R: Rng>(rng: &mut R) -> Self::Parameter {
        let mut parameter = [0u8; PARAMETER_LEN];
        rng.fill(&mut parameter[..]);
        parameter
    }

    fn rand_domain<R: Rng>(rng: &mut R) -> Self::Domain {
        let mut domain = [0u8; HASH_LEN];
        rng.fill(&mut domain[..]);
        domain
    }

    fn tree_tweak(level: u8, pos_in_level: u32) -> Self::Tweak {
        ShaTweak::Tree { level, pos_in_level }
    }

    fn chain_tweak(epoch: u32, chain_index: u8, pos_in_chain: u8) -> Self::Tweak {
        ShaTweak::Chain {
            epoch,
            chain_index,
            pos_in_chain,
        }
    }

    fn apply(
        parameter: &Self::Parameter,
        tweak: &Self::Tweak,
        message: &[Self::Domain],
    ) -> Self::Domain {
        let mut hasher = Sha3_256::new();
        hasher.update(parameter);
        hasher.update(tweak.to_bytes());
        for part in message {
            hasher.update(part);
        }
        let digest = hasher.finalize();

        let mut output = [0u8; HASH_LEN];
        output.copy_from_slice(&digest[..HASH_LEN]);
        output
    }

    fn internal_consistency_check() {
        assert!(
            HASH_LEN <= 32,
            "SHA tweak hash: hash length exceeds SHA3-256 digest size"
        );
        assert!(HASH_LEN > 0, "SHA tweak hash: hash length must be positive");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestTh = ShaTweakHash<18, 26>;

    #[test]
    fn test_tree_tweak_encoding() {
        let tweak = ShaTweak::Tree {
            level: 3,
            pos_in_level: 0x01020304,
        };
        assert_eq!(tweak.to_bytes(), vec![0x01, 3, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_chain_tweak_encoding() {
        let tweak = ShaTweak::Chain {
            epoch: 0xAABBCCDD,
            chain_index: 7,
            pos_in_chain: 200,
        };
        assert_eq!(tweak.to_bytes(), vec![0x00, 0xAA, 0xBB, 0xCC, 0xDD, 7, 200]);
    }

    #[test]
    fn test_tweak_spaces_are_disjoint() {
        // a tree tweak and a chain tweak can never encode to the same bytes:
        // the leading separator differs
        let tree = ShaTweak::Tree {
            level: 0,
            pos_in_level: 0,
        };
        let chain = ShaTweak::Chain {
            epoch: 0,
            chain_index: 0,
            pos_in_chain: 0,
        };
        assert_ne!(tree.to_bytes()[0], chain.to_bytes()[0]);
    }

    #[test]
    fn test_apply_output_length_and_determinism() {
        let parameter = [1u8; 18];
        let message = [[2u8; 26], [3u8; 26]];
        let tweak = TestTh::tree_tweak(1, 0);

        let a = TestTh::apply(&parameter, &tweak, &message);
        let b = TestTh::apply(&parameter, &tweak, &message);
        assert_eq!(a, b);
        assert_eq!(a.len(), 26);
    }

    #[test]
    fn test_apply_separates_tweaks() {
        let parameter = [1u8; 18];
        let message = [[2u8; 26]];

        let a = TestTh::apply(&parameter, &TestTh::tree_tweak(0, 5), &message);
        let b = TestTh::apply(&parameter, &TestTh::tree_tweak(0, 6), &message);
        let c = TestTh::apply(&parameter, &TestTh::chain_tweak(0, 0, 5), &message);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
