//! Incomparable encodings: mapping messages to digit vectors such that no
//! valid codeword pointwise dominates another.
//!
//! Incomparability is what makes one-time chain signatures safe: a forger
//! who sees the chain elements for codeword `x` can only derive elements
//! for codewords `y` with `y[i] >= x[i]` everywhere, and no such valid
//! codeword exists.

use core::fmt::Debug;

use rand::Rng;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::MESSAGE_LENGTH;

pub mod target_sum;
pub mod winternitz;

/// Reasons an encoding attempt can fail. Failures are expected and drive
/// the rejection-sampling loop in the signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The digit sum of the candidate codeword missed the target sum.
    #[error("digit sum of the codeword does not match the target sum")]
    SumMismatch,
}

/// An encoding of messages into mutually incomparable digit vectors.
///
/// `encode` returns `DIMENSION` digits in `[0, BASE)`. Encodings may be
/// randomized and may fail; the signer retries with fresh randomness up to
/// `MAX_TRIES` times.
pub trait IncomparableEncoding {
    type Parameter: Copy + PartialEq + Debug + Serialize + DeserializeOwned;
    type Randomness: Copy + PartialEq + Debug + Serialize + DeserializeOwned;

    /// Number of digits in a codeword.
    const DIMENSION: usize;
    /// Exclusive upper bound on each digit.
    const BASE: usize;
    /// How often the signer may retry with fresh randomness.
    const MAX_TRIES: usize;

    /// Sample encoding randomness.
    fn rand<R: Rng>(rng: &mut R) -> Self::Randomness;

    /// Encode a message into a codeword.
    fn encode(
        parameter: &Self::Parameter,
        message: &[u8; MESSAGE_LENGTH],
        randomness: &Self::Randomness,
        epoch: u32,
    ) -> Result<Vec<u8>, EncodingError>;

    /// Validate implementation parameters. Panics on misconfiguration;
    /// never called on the signing or verification paths.
    fn internal_consistency_check() {}
}
