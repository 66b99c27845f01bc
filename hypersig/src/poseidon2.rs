//! Poseidon2-style permutation over BabyBear.
//!
//! Provides the symmetric core for the algebraic hash instantiations:
//! a width-16 permutation for single-message compression, a width-24
//! permutation for pair compression, and a width-24 sponge for hashing
//! longer inputs (leaf commitments over many chain ends).
//!
//! The round constants here are generated from a fixed integer sequence;
//! any conforming permutation over the field can be substituted without
//! changing the surrounding protocol.

use crate::babybear::{BabyBear, P};

/// Permutation width for single-message compression.
pub const WIDTH_16: usize = 16;
/// Permutation width for pair compression and the sponge.
pub const WIDTH_24: usize = 24;

/// Number of full (external) rounds.
const FULL_ROUNDS: usize = 8;
/// Number of partial (internal) rounds for width 16.
const PARTIAL_ROUNDS_16: usize = 13;
/// Number of partial (internal) rounds for width 24.
const PARTIAL_ROUNDS_24: usize = 21;

/// S-box: x^7, the canonical Poseidon2 degree for BabyBear.
#[inline]
fn sbox(x: BabyBear) -> BabyBear {
    let x2 = x * x;
    let x3 = x2 * x;
    let x4 = x2 * x2;
    x4 * x3
}

/// Round constant for a given (round, position, width) triple.
#[inline]
fn round_constant(round: usize, pos: usize, width: usize) -> BabyBear {
    let seed = ((round * width + pos) as u32).wrapping_mul(0x9E37_79B9);
    BabyBear::new(seed % P)
}

/// 4x4 MDS-style mix used by the external linear layer.
fn m4_multiply(state: &mut [BabyBear; 4]) {
    let t0 = state[0] + state[1];
    let t1 = state[2] + state[3];
    let t2 = state[1] + state[1] + t1;
    let t3 = state[3] + state[3] + t0;

    state[3] = t0 + t1 + t1 + t1 + state[3];
    state[1] = t0 + t0 + t0 + t1 + state[1];
    state[0] = t2 + t3;
    state[2] = t2 + t2 + t3;
}

/// External linear layer: per-chunk M4 mix plus cross-chunk column sums.
fn external_linear_layer<const WIDTH: usize>(state: &mut [BabyBear; WIDTH]) {
    let num_chunks = WIDTH / 4;

    for chunk_idx in 0..num_chunks {
        let offset = chunk_idx * 4;
        let mut chunk = [
            state[offset],
            state[offset + 1],
            state[offset + 2],
            state[offset + 3],
        ];
        m4_multiply(&mut chunk);
        state[offset..offset + 4].copy_from_slice(&chunk);
    }

    if num_chunks > 1 {
        let mut sums = [BabyBear::ZERO; 4];
        for chunk_idx in 0..num_chunks {
            let offset = chunk_idx * 4;
            for j in 0..4 {
                sums[j] += state[offset + j];
            }
        }
        for chunk_idx in 0..num_chunks {
            let offset = chunk_idx * 4;
            for j in 0..4 {
                state[offset + j] += sums[j];
            }
        }
    }
}

/// Internal linear layer: cheap full diffusion for partial rounds.
fn internal_linear_layer<const WIDTH: usize>(state: &mut [BabyBear; WIDTH]) {
    let sum = state
        .iter()
        .fold(BabyBear::ZERO, |acc, &x| acc + x);
    for elem in state.iter_mut() {
        *elem += sum;
    }
}

fn permute<const WIDTH: usize>(state: &mut [BabyBear; WIDTH], partial_rounds: usize) {
    let half_full = FULL_ROUNDS / 2;

    external_linear_layer(state);

    for round in 0..half_full {
        for (i, elem) in state.iter_mut().enumerate() {
            *elem = sbox(*elem + round_constant(round, i, WIDTH));
        }
        external_linear_layer(state);
    }

    for round in 0..partial_rounds {
        state[0] = sbox(state[0] + round_constant(half_full + round, 0, WIDTH));
        internal_linear_layer(state);
    }

    for round in 0..half_full {
        for (i, elem) in state.iter_mut().enumerate() {
            *elem = sbox(*elem + round_constant(half_full + partial_rounds + round, i, WIDTH));
        }
        external_linear_layer(state);
    }
}

/// Width-16 permutation.
pub fn permute_16(state: &mut [BabyBear; WIDTH_16]) {
    permute(state, PARTIAL_ROUNDS_16);
}

/// Width-24 permutation.
pub fn permute_24(state: &mut [BabyBear; WIDTH_24]) {
    permute(state, PARTIAL_ROUNDS_24);
}

/// Width-16 compression with feed-forward. Input is zero-padded to the
/// width; the first `OUT_LEN` state elements form the output.
pub fn compress_16<const OUT_LEN: usize>(input: &[BabyBear]) -> [BabyBear; OUT_LEN] {
    compress::<WIDTH_16, OUT_LEN>(input, permute_16)
}

/// Width-24 compression with feed-forward.
pub fn compress_24<const OUT_LEN: usize>(input: &[BabyBear]) -> [BabyBear; OUT_LEN] {
    compress::<WIDTH_24, OUT_LEN>(input, permute_24)
}

fn compress<const WIDTH: usize, const OUT_LEN: usize>(
    input: &[BabyBear],
    permutation: fn(&mut [BabyBear; WIDTH]),
) -> [BabyBear; OUT_LEN] {
    debug_assert!(input.len() <= WIDTH);
    debug_assert!(OUT_LEN <= WIDTH);

    let mut padded = [BabyBear::ZERO; WIDTH];
    let copy_len = input.len().min(WIDTH);
    padded[..copy_len].copy_from_slice(&input[..copy_len]);

    let mut state = padded;
    permutation(&mut state);

    // feed-forward
    for i in 0..copy_len {
        state[i] += padded[i];
    }

    let mut output = [BabyBear::ZERO; OUT_LEN];
    output.copy_from_slice(&state[..OUT_LEN]);
    output
}

/// Width-24 sponge for inputs longer than one permutation call.
///
/// `capacity` elements are reserved; the leading capacity cells are seeded
/// with `domain_sep` so that different shapes of input cannot collide.
pub fn sponge_24<const OUT_LEN: usize>(
    capacity: usize,
    domain_sep: &[BabyBear],
    input: &[BabyBear],
) -> [BabyBear; OUT_LEN] {
    debug_assert!(capacity < WIDTH_24);
    debug_assert!(domain_sep.len() <= capacity);
    debug_assert!(OUT_LEN <= WIDTH_24 - capacity);

    let rate = WIDTH_24 - capacity;

    let mut state = [BabyBear::ZERO; WIDTH_24];
    state[rate..rate + domain_sep.len()].copy_from_slice(domain_sep);

    let mut offset = 0;
    while offset < input.len() {
        let chunk_len = rate.min(input.len() - offset);
        for i in 0..chunk_len {
            state[i] += input[offset + i];
        }
        permute_24(&mut state);
        offset += chunk_len;
    }

    let mut output = [BabyBear::ZERO; OUT_LEN];
    output.copy_from_slice(&state[..OUT_LEN]);
    output
}
