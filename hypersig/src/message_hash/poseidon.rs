//! Poseidon2-based message hash producing base-B digits.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rand::Rng;

use crate::babybear::{BabyBear, P};
use crate::poseidon2::{compress_24, WIDTH_24};
use crate::MESSAGE_LENGTH;

use super::{
    field_elements_to_biguint, message_hash_tweak, message_to_field_elements, MessageHash,
    MSG_LEN_FE,
};

/// Message hash built from the width-24 Poseidon2 compression.
///
/// The compression output of `MSG_HASH_LEN` field elements is read as one
/// base-p integer and decomposed into `NUM_CHUNKS` base-`CHUNK_BASE`
/// digits.
pub struct PoseidonMessageHash<
    const PARAMETER_LEN: usize,
    const RAND_LEN: usize,
    const MSG_HASH_LEN: usize,
    const NUM_CHUNKS: usize,
    const CHUNK_BASE: usize,
    const TWEAK_LEN: usize,
>;

impl<
        const PARAMETER_LEN: usize,
        const RAND_LEN: usize,
        const MSG_HASH_LEN: usize,
        const NUM_CHUNKS: usize,
        const CHUNK_BASE: usize,
        const TWEAK_LEN: usize,
    > MessageHash
    for PoseidonMessageHash<PARAMETER_LEN, RAND_LEN, MSG_HASH_LEN, NUM_CHUNKS, CHUNK_BASE, TWEAK_LEN>
{
    type Parameter = [BabyBear; PARAMETER_LEN];
    type Randomness = [BabyBear; RAND_LEN];

    const DIMENSION: usize = NUM_CHUNKS;
    const BASE: usize = CHUNK_BASE;

    fn rand<R: Rng>(rng: &mut R) -> Self::Randomness {
        let mut randomness = [BabyBear::ZERO; RAND_LEN];
        for elem in &mut randomness {
            *elem = BabyBear::new(rng.random_range(0..P));
        }
        randomness
    }

    fn apply(
        parameter: &Self::Parameter,
        epoch: u32,
        randomness: &Self::Randomness,
        message: &[u8; MESSAGE_LENGTH],
    ) -> Vec<u8> {
        let tweak_fe = message_hash_tweak::<TWEAK_LEN>(epoch);
        let msg_fe = message_to_field_elements(message);

        let mut input = Vec::with_capacity(RAND_LEN + PARAMETER_LEN + TWEAK_LEN + MSG_LEN_FE);
        input.extend_from_slice(randomness);
        input.extend_from_slice(parameter);
        input.extend_from_slice(&tweak_fe);
        input.extend_from_slice(&msg_fe);

        let hash: [BabyBear; MSG_HASH_LEN] = compress_24(&input);

        let mut acc = field_elements_to_biguint(&hash);
        let base = BigUint::from(CHUNK_BASE);
        let mut chunks = Vec::with_capacity(NUM_CHUNKS);
        for _ in 0..NUM_CHUNKS {
            let rem = &acc % &base;
            chunks.push(rem.to_u8().unwrap_or(0));
            acc /= &base;
        }
        chunks
    }

    fn internal_consistency_check() {
        assert!(
            RAND_LEN + PARAMETER_LEN + TWEAK_LEN + MSG_LEN_FE <= WIDTH_24,
            "Poseidon message hash: input exceeds width 24"
        );
        assert!(
            MSG_HASH_LEN <= WIDTH_24,
            "Poseidon message hash: output exceeds width 24"
        );
        assert!(
            CHUNK_BASE <= 256,
            "Poseidon message hash: chunk base must fit in one byte"
        );
        assert!(
            NUM_CHUNKS <= 256,
            "Poseidon message hash: at most 256 chunks are supported"
        );
    }
}
