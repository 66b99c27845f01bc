//! Pseudorandom functions deriving per-(epoch, chain) secrets from a
//! master key.
//!
//! All chain starting points of a key pair are derived on demand from one
//! master key, so the secret key stays small and signing never touches
//! per-chain state.

use core::fmt::Debug;

use rand::Rng;
use serde::{de::DeserializeOwned, Serialize};

pub mod sha;
pub mod shake_to_field;

/// A pseudorandom function with a fixed master key.
///
/// `apply` must be indistinguishable from uniform over the output type for
/// a uniformly drawn key. The input ordering is fixed by the protocol:
/// domain separator, then key, then epoch (4 bytes, big-endian), then chain
/// index (8 bytes, big-endian).
pub trait Pseudorandom {
    type Key: Copy + PartialEq + Debug + Serialize + DeserializeOwned;
    type Output;

    /// Sample a fresh master key.
    fn key_gen<R: Rng>(rng: &mut R) -> Self::Key;

    /// Derive the secret for one (epoch, chain index) pair.
    fn apply(key: &Self::Key, epoch: u32, index: u64) -> Self::Output;

    /// Validate implementation parameters. Panics on misconfiguration;
    /// never called on the signing or verification paths.
    fn internal_consistency_check() {}
}
