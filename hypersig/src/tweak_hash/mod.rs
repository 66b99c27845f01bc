//! Tweakable hash functions and the hash-chain walker built on them.
//!
//! A tweakable hash takes a public parameter, a tweak, and a message. The
//! tweak is an address used for domain separation: distinct tweaks behave
//! as independent hash functions. The trait fixes how tweaks for chain
//! steps and Merkle tree positions are derived, so that every user of an
//! implementation agrees on the address layout.

use core::fmt::Debug;

use rand::Rng;
use serde::{de::DeserializeOwned, Serialize};

pub mod poseidon;
pub mod sha;

/// A tweakable hash function over lists of domain elements.
///
/// `apply` must be collision-resistant as a function of the whole triple
/// (parameter, tweak, message). Implementations support message lists of
/// length one (chain steps), two (inner tree nodes), and longer (leaf
/// commitments over all chain ends of an epoch).
pub trait TweakableHash {
    type Parameter: Copy + PartialEq + Debug + Serialize + DeserializeOwned;
    type Tweak;
    type Domain: Copy + PartialEq + Debug + Serialize + DeserializeOwned;

    /// Sample a random public parameter.
    fn rand_parameter<R: Rng>(rng: &mut R) -> Self::Parameter;

    /// Sample a random domain element, used as tree padding.
    fn rand_domain<R: Rng>(rng: &mut R) -> Self::Domain;

    /// Tweak addressing a Merkle tree node. Level 0 is the leaf level.
    fn tree_tweak(level: u8, pos_in_level: u32) -> Self::Tweak;

    /// Tweak addressing one step of one hash chain.
    fn chain_tweak(epoch: u32, chain_index: u8, pos_in_chain: u8) -> Self::Tweak;

    /// Hash a list of domain elements under the given parameter and tweak.
    fn apply(
        parameter: &Self::Parameter,
        tweak: &Self::Tweak,
        message: &[Self::Domain],
    ) -> Self::Domain;

    /// Validate implementation parameters. Panics on misconfiguration;
    /// never called on the signing or verification paths.
    fn internal_consistency_check() {}
}

/// Walk a hash chain.
///
/// The chain is specific to an epoch and a chain index; every step hashes
/// the current element under a tweak carrying its position. Starting from
/// `start` at `start_pos_in_chain`, walking two steps maps A to C via B.
/// Zero steps return `start` unchanged. A full chain has `BASE` positions
/// and therefore `BASE - 1` hash applications.
pub fn chain<TH: TweakableHash>(
    parameter: &TH::Parameter,
    epoch: u32,
    chain_index: u8,
    start_pos_in_chain: u8,
    steps: usize,
    start: &TH::Domain,
) -> TH::Domain {
    let mut current = *start;

    for j in 0..steps {
        let tweak = TH::chain_tweak(epoch, chain_index, start_pos_in_chain + j as u8 + 1);
        current = TH::apply(parameter, &tweak, &[current]);
    }

    current
}
