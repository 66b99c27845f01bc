//! Poseidon2-based message hash mapping into the top layers of a
//! hypercube.
//!
//! Instead of decomposing the hash output digit by digit, this variant
//! ranks it into the lattice points of {0..BASE-1}^DIMENSION whose
//! complements lie on layers 0..=FINAL_LAYER, then returns the complement
//! vertex. Accepted codewords therefore sit near the top of the hypercube:
//! their digit sums fall within FINAL_LAYER of the maximum.

use num_bigint::BigUint;
use num_traits::One;
use rand::Rng;

use crate::babybear::{BabyBear, P};
use crate::hypercube::{find_layer, map_to_vertex, total_size_up_to_layer, MAX_DIMENSION};
use crate::poseidon2::{compress_24, WIDTH_24};
use crate::MESSAGE_LENGTH;

use super::{
    field_elements_to_biguint, message_hash_tweak, message_to_field_elements, MessageHash,
    MSG_LEN_FE,
};

/// Hypercube-mapped Poseidon message hash.
///
/// Each of the `POS_INVOCATIONS` permutation calls contributes
/// `POS_OUTPUT_LEN_PER_INV` field elements; the inputs differ in one
/// trailing invocation-index element.
pub struct TopLevelPoseidonMessageHash<
    const NUM_CHUNKS: usize,
    const CHUNK_BASE: usize,
    const FINAL_LAYER: usize,
    const PARAMETER_LEN: usize,
    const RAND_LEN: usize,
    const TWEAK_LEN: usize,
    const POS_OUTPUT_LEN_PER_INV: usize,
    const POS_INVOCATIONS: usize,
>;

impl<
        const NUM_CHUNKS: usize,
        const CHUNK_BASE: usize,
        const FINAL_LAYER: usize,
        const PARAMETER_LEN: usize,
        const RAND_LEN: usize,
        const TWEAK_LEN: usize,
        const POS_OUTPUT_LEN_PER_INV: usize,
        const POS_INVOCATIONS: usize,
    > MessageHash
    for TopLevelPoseidonMessageHash<
        NUM_CHUNKS,
        CHUNK_BASE,
        FINAL_LAYER,
        PARAMETER_LEN,
        RAND_LEN,
        TWEAK_LEN,
        POS_OUTPUT_LEN_PER_INV,
        POS_INVOCATIONS,
    >
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

        let mut outputs = Vec::with_capacity(POS_INVOCATIONS * POS_OUTPUT_LEN_PER_INV);
        for invocation in 0..POS_INVOCATIONS {
            let mut input =
                Vec::with_capacity(RAND_LEN + PARAMETER_LEN + TWEAK_LEN + MSG_LEN_FE + 1);
            input.extend_from_slice(randomness);
            input.extend_from_slice(parameter);
            input.extend_from_slice(&tweak_fe);
            input.extend_from_slice(&msg_fe);
            input.push(BabyBear::new(invocation as u32));

            let out: [BabyBear; POS_OUTPUT_LEN_PER_INV] = compress_24(&input);
            outputs.extend_from_slice(&out);
        }

        let acc = field_elements_to_biguint(&outputs);
        let total = total_size_up_to_layer(CHUNK_BASE, NUM_CHUNKS, FINAL_LAYER);
        let index = acc % total;

        let (layer, offset) = find_layer(CHUNK_BASE, NUM_CHUNKS, &index);
        let vertex = map_to_vertex(CHUNK_BASE, NUM_CHUNKS, layer, &offset);

        // complement: the codeword lives near the top of the hypercube
        vertex
            .into_iter()
            .map(|digit| (CHUNK_BASE - 1) as u8 - digit)
            .collect()
    }

    fn internal_consistency_check() {
        assert!(
            NUM_CHUNKS <= MAX_DIMENSION,
            "top-level message hash: dimension exceeds hypercube table"
        );
        assert!(
            CHUNK_BASE >= 2 && CHUNK_BASE <= 256,
            "top-level message hash: chunk base out of range"
        );
        assert!(
            FINAL_LAYER <= NUM_CHUNKS * (CHUNK_BASE - 1),
            "top-level message hash: final layer out of range"
        );
        assert!(
            RAND_LEN + PARAMETER_LEN + TWEAK_LEN + MSG_LEN_FE + 1 <= WIDTH_24,
            "top-level message hash: input exceeds width 24"
        );
        assert!(
            POS_OUTPUT_LEN_PER_INV <= WIDTH_24,
            "top-level message hash: per-invocation output exceeds width 24"
        );
        assert!(
            POS_INVOCATIONS >= 1,
            "top-level message hash: at least one invocation required"
        );

        // the combined output must cover the lattice point count with slack,
        // otherwise the modular reduction is visibly biased
        let output_space = (0..POS_INVOCATIONS * POS_OUTPUT_LEN_PER_INV)
            .fold(BigUint::one(), |acc, _| acc * P);
        let lattice = total_size_up_to_layer(CHUNK_BASE, NUM_CHUNKS, FINAL_LAYER);
        assert!(
            output_space > &lattice * &lattice,
            "top-level message hash: output space too small for the lattice"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestMh = TopLevelPoseidonMessageHash<64, 8, 77, 5, 6, 2, 15, 1>;

    #[test]
    fn test_output_shape_and_layer_bound() {
        let parameter = [BabyBear::new(1); 5];
        let randomness = [BabyBear::new(2); 6];

        for seed in 0..16u8 {
            let message = [seed; MESSAGE_LENGTH];
            let chunks = TestMh::apply(&parameter, 0, &randomness, &message);
            assert_eq!(chunks.len(), 64);
            assert!(chunks.iter().all(|&c| (c as usize) < 8));

            // complement layer within FINAL_LAYER of the top
            let sum: usize = chunks.iter().map(|&c| c as usize).sum();
            assert!(sum >= 64 * 7 - 77);
            assert!(sum <= 64 * 7);
        }
    }

    #[test]
    fn test_randomness_changes_output() {
        let parameter = [BabyBear::new(1); 5];
        let message = [9u8; MESSAGE_LENGTH];

        let a = TestMh::apply(&parameter, 0, &[BabyBear::new(2); 6], &message);
        let b = TestMh::apply(&parameter, 0, &[BabyBear::new(3); 6], &message);
        assert_ne!(a, b);
    }

    #[test]
    fn test_multi_invocation_differs_from_single() {
        type OneInv = TopLevelPoseidonMessageHash<64, 8, 77, 5, 6, 2, 8, 1>;
        type TwoInv = TopLevelPoseidonMessageHash<64, 8, 77, 5, 6, 2, 8, 2>;

        let parameter = [BabyBear::new(1); 5];
        let randomness = [BabyBear::new(2); 6];
        let message = [9u8; MESSAGE_LENGTH];

        let a = OneInv::apply(&parameter, 0, &randomness, &message);
        let b = TwoInv::apply(&parameter, 0, &randomness, &message);
        assert_ne!(a, b);
    }

    #[test]
    fn test_consistency_check_passes_for_presets() {
        TestMh::internal_consistency_check();
        TopLevelPoseidonMessageHash::<64, 8, 77, 5, 7, 2, 15, 1>::internal_consistency_check();
        TopLevelPoseidonMessageHash::<48, 10, 112, 5, 7, 2, 15, 1>::internal_consistency_check();
        TopLevelPoseidonMessageHash::<32, 26, 231, 5, 7, 2, 15, 1>::internal_consistency_check();
    }
}
