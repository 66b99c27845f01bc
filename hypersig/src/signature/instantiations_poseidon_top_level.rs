//! Top-level Poseidon instantiations: target-sum encodings whose message
//! hash maps directly into the top layers of a hypercube.
//!
//! The lifetime-2^32 presets carry one extra randomness element and a
//! wider hash to keep their security margins at the longer lifetime.

use crate::encoding::target_sum::TargetSumEncoding;
use crate::message_hash::top_level_poseidon::TopLevelPoseidonMessageHash;
use crate::prf::shake_to_field::ShakePrfToField;
use crate::tweak_hash::poseidon::PoseidonTweakHash;

use super::generalized_xmss::GeneralizedXmss;

const PARAMETER_LEN: usize = 5;
const TWEAK_LEN: usize = 2;
const CAPACITY: usize = 9;
const POS_OUTPUT_LEN_PER_INV: usize = 15;
const POS_INVOCATIONS: usize = 1;

type MhLifetime18Dim64Base8 =
    TopLevelPoseidonMessageHash<64, 8, 77, PARAMETER_LEN, 6, TWEAK_LEN, POS_OUTPUT_LEN_PER_INV, POS_INVOCATIONS>;
type MhLifetime32Dim64Base8 =
    TopLevelPoseidonMessageHash<64, 8, 77, PARAMETER_LEN, 7, TWEAK_LEN, POS_OUTPUT_LEN_PER_INV, POS_INVOCATIONS>;
type MhLifetime32Dim48Base10 =
    TopLevelPoseidonMessageHash<48, 10, 112, PARAMETER_LEN, 7, TWEAK_LEN, POS_OUTPUT_LEN_PER_INV, POS_INVOCATIONS>;
type MhLifetime32Dim32Base26 =
    TopLevelPoseidonMessageHash<32, 26, 231, PARAMETER_LEN, 7, TWEAK_LEN, POS_OUTPUT_LEN_PER_INV, POS_INVOCATIONS>;

type ThLifetime18Dim64 = PoseidonTweakHash<PARAMETER_LEN, 7, TWEAK_LEN, CAPACITY, 64>;
type ThLifetime32Dim64 = PoseidonTweakHash<PARAMETER_LEN, 8, TWEAK_LEN, CAPACITY, 64>;
type ThLifetime32Dim48 = PoseidonTweakHash<PARAMETER_LEN, 8, TWEAK_LEN, CAPACITY, 48>;
type ThLifetime32Dim32 = PoseidonTweakHash<PARAMETER_LEN, 8, TWEAK_LEN, CAPACITY, 32>;

pub type SIGTopLevelTargetSumLifetime18Dim64Base8 = GeneralizedXmss<
    ShakePrfToField<7>,
    TargetSumEncoding<MhLifetime18Dim64Base8, 375>,
    ThLifetime18Dim64,
    18,
>;

pub type SIGTopLevelTargetSumLifetime32Dim64Base8 = GeneralizedXmss<
    ShakePrfToField<8>,
    TargetSumEncoding<MhLifetime32Dim64Base8, 375>,
    ThLifetime32Dim64,
    32,
>;

pub type SIGTopLevelTargetSumLifetime32Dim48Base10 = GeneralizedXmss<
    ShakePrfToField<8>,
    TargetSumEncoding<MhLifetime32Dim48Base10, 326>,
    ThLifetime32Dim48,
    32,
>;

pub type SIGTopLevelTargetSumLifetime32Dim32Base26 = GeneralizedXmss<
    ShakePrfToField<8>,
    TargetSumEncoding<MhLifetime32Dim32Base26, 579>,
    ThLifetime32Dim32,
    32,
>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::IncomparableEncoding;
    use crate::signature::SignatureScheme;
    use rand::Rng;

    type SmallDim64Base8 = GeneralizedXmss<
        ShakePrfToField<7>,
        TargetSumEncoding<MhLifetime18Dim64Base8, 375>,
        ThLifetime18Dim64,
        2,
    >;

    #[test]
    fn test_sign_and_verify() {
        let mut rng = rand::rng();
        let (pk, sk) = SmallDim64Base8::key_gen(&mut rng, 0, 4);

        let message: [u8; 32] = rng.random();
        let sig = SmallDim64Base8::sign(&mut rng, &sk, 0, &message).unwrap();
        assert!(SmallDim64Base8::verify(&pk, 0, &message, &sig));
        assert!(!SmallDim64Base8::verify(&pk, 1, &message, &sig));
        assert!(!SmallDim64Base8::verify(&pk, 0, &[0u8; 32], &sig));
    }

    #[test]
    fn test_codeword_sum_is_the_target() {
        let mut rng = rand::rng();
        let (pk, sk) = SmallDim64Base8::key_gen(&mut rng, 0, 2);

        let message: [u8; 32] = rng.random();
        let sig = SmallDim64Base8::sign(&mut rng, &sk, 1, &message).unwrap();

        let codeword = TargetSumEncoding::<MhLifetime18Dim64Base8, 375>::encode(
            &pk.parameter,
            &message,
            &sig.rho,
            1,
        )
        .unwrap();
        let sum: usize = codeword.iter().map(|&x| x as usize).sum();
        assert_eq!(sum, 375);
    }

    #[test]
    fn test_consistency_checks_pass() {
        SIGTopLevelTargetSumLifetime18Dim64Base8::internal_consistency_check();
        SIGTopLevelTargetSumLifetime32Dim64Base8::internal_consistency_check();
        SIGTopLevelTargetSumLifetime32Dim48Base10::internal_consistency_check();
        SIGTopLevelTargetSumLifetime32Dim32Base26::internal_consistency_check();
    }
}
