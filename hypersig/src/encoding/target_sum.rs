//! Target-sum encoding: rejection-sampled codewords with a fixed digit sum.

use core::marker::PhantomData;

use rand::Rng;

use crate::message_hash::MessageHash;
use crate::MESSAGE_LENGTH;

use super::{EncodingError, IncomparableEncoding};

/// Target-sum encoding over a message hash.
///
/// A candidate codeword is accepted only if its digits sum to exactly
/// `TARGET_SUM`. Two distinct codewords with equal digit sums can never be
/// pointwise comparable, so no checksum digits are needed; the price is a
/// retry loop at signing time.
pub struct TargetSumEncoding<MH, const TARGET_SUM: usize>(PhantomData<MH>);

impl<MH: MessageHash, const TARGET_SUM: usize> IncomparableEncoding
    for TargetSumEncoding<MH, TARGET_SUM>
{
    type Parameter = MH::Parameter;
    type Randomness = MH::Randomness;

    const DIMENSION: usize = MH::DIMENSION;
    const BASE: usize = MH::BASE;
    const MAX_TRIES: usize = 100_000;

    fn rand<R: Rng>(rng: &mut R) -> Self::Randomness {
        MH::rand(rng)
    }

    fn encode(
        parameter: &Self::Parameter,
        message: &[u8; MESSAGE_LENGTH],
        randomness: &Self::Randomness,
        epoch: u32,
    ) -> Result<Vec<u8>, EncodingError> {
        let chunks = MH::apply(parameter, epoch, randomness, message);
        let sum: usize = chunks.iter().map(|&x| x as usize).sum();
        if sum != TARGET_SUM {
            return Err(EncodingError::SumMismatch);
        }
        Ok(chunks)
    }

    fn internal_consistency_check() {
        MH::internal_consistency_check();
        assert!(
            TARGET_SUM <= MH::DIMENSION * (MH::BASE - 1),
            "target-sum encoding: target exceeds the maximum digit sum"
        );
        assert!(TARGET_SUM > 0, "target-sum encoding: target must be positive");
        assert!(
            Self::DIMENSION <= 256,
            "target-sum encoding: dimension must be at most 2^8"
        );
        assert!(
            Self::BASE <= 256,
            "target-sum encoding: base must be at most 2^8"
        );
    }
}
