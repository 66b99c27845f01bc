//! Message hashes mapping (parameter, epoch, randomness, message) to a
//! vector of small digits, the raw material for incomparable encodings.

use core::fmt::Debug;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rand::Rng;
use serde::{de::DeserializeOwned, Serialize};

use crate::babybear::{BabyBear, P};
use crate::{MESSAGE_LENGTH, TWEAK_SEPARATOR_FOR_MESSAGE_HASH};

pub mod poseidon;
pub mod sha;
pub mod top_level_poseidon;

/// Number of field elements a 32-byte message decomposes into.
pub const MSG_LEN_FE: usize = 9;

/// A keyed message hash with digit-vector output.
///
/// `apply` returns `DIMENSION` digits, each in `[0, BASE)`. The randomness
/// is sampled fresh per signing attempt and travels inside the signature.
pub trait MessageHash {
    type Parameter: Copy + PartialEq + Debug + Serialize + DeserializeOwned;
    type Randomness: Copy + PartialEq + Debug + Serialize + DeserializeOwned;

    /// Number of digits returned by `apply`.
    const DIMENSION: usize;
    /// Exclusive upper bound on each digit.
    const BASE: usize;

    /// Sample hashing randomness.
    fn rand<R: Rng>(rng: &mut R) -> Self::Randomness;

    /// Hash a message into `DIMENSION` digits in `[0, BASE)`.
    fn apply(
        parameter: &Self::Parameter,
        epoch: u32,
        randomness: &Self::Randomness,
        message: &[u8; MESSAGE_LENGTH],
    ) -> Vec<u8>;

    /// Validate implementation parameters. Panics on misconfiguration;
    /// never called on the signing or verification paths.
    fn internal_consistency_check() {}
}

/// Extract the `chunk_index`-th chunk (least significant first) of
/// `chunk_size` bits from a byte.
#[inline]
pub fn isolate_chunk_from_byte(byte: u8, chunk_index: usize, chunk_size: usize) -> u8 {
    debug_assert!(matches!(chunk_size, 1 | 2 | 4 | 8));
    debug_assert!(chunk_index < 8 / chunk_size);
    let shift = chunk_index * chunk_size;
    let mask = ((1u16 << chunk_size) - 1) as u8;
    (byte >> shift) & mask
}

/// Split bytes into `chunk_size`-bit chunks, least significant bits of
/// each byte first.
pub fn bytes_to_chunks(data: &[u8], chunk_size: usize) -> Vec<u8> {
    let chunks_per_byte = 8 / chunk_size;
    let mut out = Vec::with_capacity(data.len() * chunks_per_byte);
    for &byte in data {
        for index in 0..chunks_per_byte {
            out.push(isolate_chunk_from_byte(byte, index, chunk_size));
        }
    }
    out
}

/// Decompose a message into [`MSG_LEN_FE`] field elements: the 32 bytes are
/// read as one big-endian integer and split into base-p digits, least
/// significant first. The decomposition is injective since
/// p^9 > 2^256.
pub(crate) fn message_to_field_elements(message: &[u8; MESSAGE_LENGTH]) -> [BabyBear; MSG_LEN_FE] {
    let mut acc = BigUint::from_bytes_be(message);
    let modulus = BigUint::from(P);

    let mut out = [BabyBear::ZERO; MSG_LEN_FE];
    for digit in &mut out {
        let rem = &acc % &modulus;
        *digit = BabyBear::new(rem.to_u32().unwrap_or(0));
        acc /= &modulus;
    }
    out
}

/// Field-element tweak for message hashing: `(epoch << 8) | separator`,
/// base-p decomposed.
pub(crate) fn message_hash_tweak<const TWEAK_LEN: usize>(epoch: u32) -> [BabyBear; TWEAK_LEN] {
    let mut acc = ((epoch as u64) << 8) | (TWEAK_SEPARATOR_FOR_MESSAGE_HASH as u64);
    let mut out = [BabyBear::ZERO; TWEAK_LEN];
    for digit in &mut out {
        *digit = BabyBear::from_u64(acc % P as u64);
        acc /= P as u64;
    }
    out
}

/// Recompose field elements into the integer they encode, treating them as
/// base-p digits, least significant first.
pub(crate) fn field_elements_to_biguint(elements: &[BabyBear]) -> BigUint {
    let modulus = BigUint::from(P);
    let mut acc = BigUint::from(0u32);
    for element in elements.iter().rev() {
        acc = acc * &modulus + BigUint::from(element.value());
    }
    acc
}
