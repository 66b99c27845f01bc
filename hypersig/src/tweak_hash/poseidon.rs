//! Poseidon2-based tweakable hash over BabyBear field elements.
//!
//! Uses the width-16 permutation for chain steps (one message), the
//! width-24 permutation for inner tree nodes (two messages), and the
//! width-24 sponge for leaf commitments over all chain ends of an epoch.

use rand::Rng;

use crate::babybear::{BabyBear, P};
use crate::poseidon2::{compress_16, compress_24, sponge_24, WIDTH_16, WIDTH_24};
use crate::{TWEAK_SEPARATOR_FOR_CHAIN_HASH, TWEAK_SEPARATOR_FOR_TREE_HASH};

use super::TweakableHash;

/// Tweak for the Poseidon tweakable hash.
///
/// Tweaks are packed into one integer and decomposed base p, so the whole
/// tweak space injects into a fixed number of field elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoseidonTweak {
    Tree { level: u8, pos_in_level: u32 },
    Chain { epoch: u32, chain_index: u8, pos_in_chain: u8 },
}

impl PoseidonTweak {
    /// Base-p decomposition of the packed tweak integer, least significant
    /// digit first.
    pub fn to_field_elements<const TWEAK_LEN: usize>(self) -> [BabyBear; TWEAK_LEN] {
        let mut acc: u128 = match self {
            Self::Tree { level, pos_in_level } => {
                ((level as u128) << 40)
                    | ((pos_in_level as u128) << 8)
                    | (TWEAK_SEPARATOR_FOR_TREE_HASH as u128)
            }
            Self::Chain {
                epoch,
                chain_index,
                pos_in_chain,
            } => {
                ((epoch as u128) << 24)
                    | ((chain_index as u128) << 16)
                    | ((pos_in_chain as u128) << 8)
                    | (TWEAK_SEPARATOR_FOR_CHAIN_HASH as u128)
            }
        };

        let mut out = [BabyBear::ZERO; TWEAK_LEN];
        for digit in &mut out {
            *digit = BabyBear::new((acc % P as u128) as u32);
            acc /= P as u128;
        }
        debug_assert_eq!(acc, 0, "tweak does not fit into TWEAK_LEN field elements");
        out
    }
}

/// Tweakable hash built from the Poseidon2-style permutation.
///
/// `NUM_CHAINS` is the number of chain ends committed into one leaf; it
/// bounds the sponge input and the chain index space.
pub struct PoseidonTweakHash<
    const PARAMETER_LEN: usize,
    const HASH_LEN: usize,
    const TWEAK_LEN: usize,
    const CAPACITY: usize,
    const NUM_CHAINS: usize,
>;

impl<
        const PARAMETER_LEN: usize,
        const HASH_LEN: usize,
        const TWEAK_LEN: usize,
        const CAPACITY: usize,
        const NUM_CHAINS: usize,
    > TweakableHash for PoseidonTweakHash<PARAMETER_LEN, HASH_LEN, TWEAK_LEN, CAPACITY, NUM_CHAINS>
{
    type Parameter = [BabyBear; PARAMETER_LEN];
    type Tweak = PoseidonTweak;
    type Domain = [BabyBear; HASH_LEN];

    fn rand_parameter<R: Rng>(rng: &mut R) -> Self::Parameter {
        let mut parameter = [BabyBear::ZERO; PARAMETER_LEN];
        for elem in &mut parameter {
            *elem = BabyBear::new(rng.random_range(0..P));
        }
        parameter
    }

    fn rand_domain<R: Rng>(rng: &mut R) -> Self::Domain {
        let mut domain = [BabyBear::ZERO; HASH_LEN];
        for elem in &mut domain {
            *elem = BabyBear::new(rng.random_range(0..P));
        }
        domain
    }

    fn tree_tweak(level: u8, pos_in_level: u32) -> Self::Tweak {
        PoseidonTweak::Tree { level, pos_in_level }
    }

    fn chain_tweak(epoch: u32, chain_index: u8, pos_in_chain: u8) -> Self::Tweak {
        PoseidonTweak::Chain {
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
        let tweak_fe = tweak.to_field_elements::<TWEAK_LEN>();

        let mut input =
            Vec::with_capacity(PARAMETER_LEN + TWEAK_LEN + message.len() * HASH_LEN);
        input.extend_from_slice(parameter);
        input.extend_from_slice(&tweak_fe);
        for part in message {
            input.extend_from_slice(part);
        }

        match message.len() {
            1 => compress_16(&input),
            2 => compress_24(&input),
            _ => {
                let domain_sep = [
                    BabyBear::new(PARAMETER_LEN as u32),
                    BabyBear::new(TWEAK_LEN as u32),
                    BabyBear::new(message.len() as u32),
                    BabyBear::new(HASH_LEN as u32),
                ];
                sponge_24(CAPACITY, &domain_sep, &input)
            }
        }
    }

    fn internal_consistency_check() {
        assert!(
            PARAMETER_LEN + TWEAK_LEN + HASH_LEN <= WIDTH_16,
            "Poseidon tweak hash: chain-step input exceeds width 16"
        );
        assert!(
            PARAMETER_LEN + TWEAK_LEN + 2 * HASH_LEN <= WIDTH_24,
            "Poseidon tweak hash: tree-node input exceeds width 24"
        );
        assert!(
            CAPACITY >= 4 && CAPACITY < WIDTH_24,
            "Poseidon tweak hash: capacity out of range"
        );
        assert!(
            HASH_LEN <= WIDTH_24 - CAPACITY,
            "Poseidon tweak hash: output does not fit into the sponge rate"
        );
        assert!(
            NUM_CHAINS <= 256,
            "Poseidon tweak hash: chain index must fit in one byte"
        );
        // 40-bit tree tweaks and 56-bit chain tweaks must inject into the
        // tweak elements
        assert!(
            (P as u128).pow(TWEAK_LEN as u32) > 1u128 << 56,
            "Poseidon tweak hash: tweak space does not fit into TWEAK_LEN elements"
        );
    }
}
