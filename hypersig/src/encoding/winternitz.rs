//! Basic Winternitz encoding: message digits plus checksum digits.

use core::marker::PhantomData;

use rand::Rng;

use crate::message_hash::MessageHash;
use crate::MESSAGE_LENGTH;

use super::{EncodingError, IncomparableEncoding};

/// Winternitz encoding over a message hash.
///
/// The codeword is the message-hash digit vector followed by
/// `NUM_CHECKSUM_CHAINS` digits of the checksum `sum(BASE - 1 - x_i)`.
/// If `x` pointwise dominated a distinct `x'`, the message part would force
/// the checksum of `x` to be at most that of `x'` while the checksum part
/// forces the opposite, so no two valid codewords are comparable.
pub struct WinternitzEncoding<MH, const CHUNK_SIZE: usize, const NUM_CHECKSUM_CHAINS: usize>(
    PhantomData<MH>,
);

/// Decompose the checksum of `chunks` into `num_digits` base-`base` digits,
/// least significant first. Residual bits beyond the last digit are
/// discarded; the consistency check guarantees there are none.
pub(crate) fn checksum_digits(chunks: &[u8], base: usize, num_digits: usize) -> Vec<u8> {
    let mut sum: u64 = chunks.iter().map(|&x| (base - 1 - x as usize) as u64).sum();

    let mut digits = Vec::with_capacity(num_digits);
    for _ in 0..num_digits {
        digits.push((sum % base as u64) as u8);
        sum /= base as u64;
    }
    digits
}

impl<MH: MessageHash, const CHUNK_SIZE: usize, const NUM_CHECKSUM_CHAINS: usize>
    IncomparableEncoding for WinternitzEncoding<MH, CHUNK_SIZE, NUM_CHECKSUM_CHAINS>
{
    type Parameter = MH::Parameter;
    type Randomness = MH::Randomness;

    const DIMENSION: usize = MH::DIMENSION + NUM_CHECKSUM_CHAINS;
    const BASE: usize = 1 << CHUNK_SIZE;
    // deterministic given the message hash output, so retrying is pointless
    const MAX_TRIES: usize = 1;

    fn rand<R: Rng>(rng: &mut R) -> Self::Randomness {
        MH::rand(rng)
    }

    fn encode(
        parameter: &Self::Parameter,
        message: &[u8; MESSAGE_LENGTH],
        randomness: &Self::Randomness,
        epoch: u32,
    ) -> Result<Vec<u8>, EncodingError> {
        let mut chunks = MH::apply(parameter, epoch, randomness, message);
        let checksum = checksum_digits(&chunks, Self::BASE, NUM_CHECKSUM_CHAINS);
        chunks.extend_from_slice(&checksum);
        Ok(chunks)
    }

    fn internal_consistency_check() {
        MH::internal_consistency_check();
        assert!(
            matches!(CHUNK_SIZE, 1 | 2 | 4 | 8),
            "Winternitz encoding: chunk size must be 1, 2, 4, or 8"
        );
        assert!(
            MH::BASE == 1 << CHUNK_SIZE,
            "Winternitz encoding: message hash base does not match the chunk size"
        );
        assert!(
            Self::DIMENSION <= 256,
            "Winternitz encoding: dimension must be at most 2^8"
        );
        // every possible checksum value must fit into the checksum digits
        let base = Self::BASE as u128;
        let max_checksum = (MH::DIMENSION * (Self::BASE - 1)) as u128;
        assert!(
            base.pow(NUM_CHECKSUM_CHAINS as u32) > max_checksum,
            "Winternitz encoding: checksum digits cannot represent the maximum checksum"
        );
    }
}
