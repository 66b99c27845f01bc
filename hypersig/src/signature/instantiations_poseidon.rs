//! Poseidon2-based scheme instantiations over BabyBear for lifetimes 2^18
//! and 2^20.
//!
//! Domains are field-element arrays: seven elements for chunk sizes up to
//! four, eight for chunk size eight.

use crate::encoding::target_sum::TargetSumEncoding;
use crate::encoding::winternitz::WinternitzEncoding;
use crate::message_hash::poseidon::PoseidonMessageHash;
use crate::prf::shake_to_field::ShakePrfToField;
use crate::tweak_hash::poseidon::PoseidonTweakHash;

use super::generalized_xmss::GeneralizedXmss;

const PARAMETER_LEN: usize = 5;
const RAND_LEN: usize = 6;
const MSG_HASH_LEN: usize = 5;
const TWEAK_LEN: usize = 2;
const CAPACITY: usize = 9;

type MhW1 = PoseidonMessageHash<PARAMETER_LEN, RAND_LEN, MSG_HASH_LEN, 155, 2, TWEAK_LEN>;
type MhW2 = PoseidonMessageHash<PARAMETER_LEN, RAND_LEN, MSG_HASH_LEN, 78, 4, TWEAK_LEN>;
type MhW4 = PoseidonMessageHash<PARAMETER_LEN, RAND_LEN, MSG_HASH_LEN, 39, 16, TWEAK_LEN>;
type MhW8 = PoseidonMessageHash<PARAMETER_LEN, RAND_LEN, MSG_HASH_LEN, 20, 256, TWEAK_LEN>;

type WinternitzW1 = WinternitzEncoding<MhW1, 1, 8>;
type WinternitzW2 = WinternitzEncoding<MhW2, 2, 4>;
type WinternitzW4 = WinternitzEncoding<MhW4, 4, 3>;
type WinternitzW8 = WinternitzEncoding<MhW8, 8, 2>;

// tweak hashes sized for the total chain count of each encoding
type ThWinternitzW1 = PoseidonTweakHash<PARAMETER_LEN, 7, TWEAK_LEN, CAPACITY, 163>;
type ThWinternitzW2 = PoseidonTweakHash<PARAMETER_LEN, 7, TWEAK_LEN, CAPACITY, 82>;
type ThWinternitzW4 = PoseidonTweakHash<PARAMETER_LEN, 7, TWEAK_LEN, CAPACITY, 42>;
type ThWinternitzW8 = PoseidonTweakHash<PARAMETER_LEN, 8, TWEAK_LEN, CAPACITY, 22>;

type ThTargetSumW1 = PoseidonTweakHash<PARAMETER_LEN, 7, TWEAK_LEN, CAPACITY, 155>;
type ThTargetSumW2 = PoseidonTweakHash<PARAMETER_LEN, 7, TWEAK_LEN, CAPACITY, 78>;
type ThTargetSumW4 = PoseidonTweakHash<PARAMETER_LEN, 7, TWEAK_LEN, CAPACITY, 39>;
type ThTargetSumW8 = PoseidonTweakHash<PARAMETER_LEN, 8, TWEAK_LEN, CAPACITY, 20>;

type Prf7 = ShakePrfToField<7>;
type Prf8 = ShakePrfToField<8>;

// Winternitz, lifetime 2^18
pub type SIGWinternitzLifetime18W1 = GeneralizedXmss<Prf7, WinternitzW1, ThWinternitzW1, 18>;
pub type SIGWinternitzLifetime18W2 = GeneralizedXmss<Prf7, WinternitzW2, ThWinternitzW2, 18>;
pub type SIGWinternitzLifetime18W4 = GeneralizedXmss<Prf7, WinternitzW4, ThWinternitzW4, 18>;
pub type SIGWinternitzLifetime18W8 = GeneralizedXmss<Prf8, WinternitzW8, ThWinternitzW8, 18>;

// Winternitz, lifetime 2^20
pub type SIGWinternitzLifetime20W1 = GeneralizedXmss<Prf7, WinternitzW1, ThWinternitzW1, 20>;
pub type SIGWinternitzLifetime20W2 = GeneralizedXmss<Prf7, WinternitzW2, ThWinternitzW2, 20>;
pub type SIGWinternitzLifetime20W4 = GeneralizedXmss<Prf7, WinternitzW4, ThWinternitzW4, 20>;
pub type SIGWinternitzLifetime20W8 = GeneralizedXmss<Prf8, WinternitzW8, ThWinternitzW8, 20>;

// Target-sum, lifetime 2^18
pub type SIGTargetSumLifetime18W1NoOff =
    GeneralizedXmss<Prf7, TargetSumEncoding<MhW1, 78>, ThTargetSumW1, 18>;
pub type SIGTargetSumLifetime18W1Off10 =
    GeneralizedXmss<Prf7, TargetSumEncoding<MhW1, 86>, ThTargetSumW1, 18>;
pub type SIGTargetSumLifetime18W2NoOff =
    GeneralizedXmss<Prf7, TargetSumEncoding<MhW2, 117>, ThTargetSumW2, 18>;
pub type SIGTargetSumLifetime18W2Off10 =
    GeneralizedXmss<Prf7, TargetSumEncoding<MhW2, 129>, ThTargetSumW2, 18>;
pub type SIGTargetSumLifetime18W4NoOff =
    GeneralizedXmss<Prf7, TargetSumEncoding<MhW4, 293>, ThTargetSumW4, 18>;
pub type SIGTargetSumLifetime18W4Off10 =
    GeneralizedXmss<Prf7, TargetSumEncoding<MhW4, 322>, ThTargetSumW4, 18>;
pub type SIGTargetSumLifetime18W8NoOff =
    GeneralizedXmss<Prf8, TargetSumEncoding<MhW8, 2550>, ThTargetSumW8, 18>;
pub type SIGTargetSumLifetime18W8Off10 =
    GeneralizedXmss<Prf8, TargetSumEncoding<MhW8, 2805>, ThTargetSumW8, 18>;

// Target-sum, lifetime 2^20
pub type SIGTargetSumLifetime20W1NoOff =
    GeneralizedXmss<Prf7, TargetSumEncoding<MhW1, 78>, ThTargetSumW1, 20>;
pub type SIGTargetSumLifetime20W2NoOff =
    GeneralizedXmss<Prf7, TargetSumEncoding<MhW2, 117>, ThTargetSumW2, 20>;
pub type SIGTargetSumLifetime20W4NoOff =
    GeneralizedXmss<Prf7, TargetSumEncoding<MhW4, 293>, ThTargetSumW4, 20>;
pub type SIGTargetSumLifetime20W8NoOff =
    GeneralizedXmss<Prf8, TargetSumEncoding<MhW8, 2550>, ThTargetSumW8, 20>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::IncomparableEncoding;
    use crate::signature::SignatureScheme;
    use rand::Rng;

    type SmallWinternitzW4 = GeneralizedXmss<Prf7, WinternitzW4, ThWinternitzW4, 2>;
    type SmallWinternitzW8 = GeneralizedXmss<Prf8, WinternitzW8, ThWinternitzW8, 2>;
    type SmallTargetSumW2 =
        GeneralizedXmss<Prf7, TargetSumEncoding<MhW2, 117>, ThTargetSumW2, 2>;

    #[test]
    fn test_winternitz_sign_and_verify() {
        let mut rng = rand::rng();
        let (pk, sk) = SmallWinternitzW4::key_gen(&mut rng, 0, 4);

        let message = [3u8; 32];
        let sig = SmallWinternitzW4::sign(&mut rng, &sk, 0, &message).unwrap();
        assert!(SmallWinternitzW4::verify(&pk, 0, &message, &sig));
        assert!(!SmallWinternitzW4::verify(&pk, 1, &message, &sig));
        assert!(!SmallWinternitzW4::verify(&pk, 0, &[4u8; 32], &sig));
    }

    #[test]
    fn test_winternitz_w8_field_domain() {
        let mut rng = rand::rng();
        let (pk, sk) = SmallWinternitzW8::key_gen(&mut rng, 2, 2);

        let message = [0xEEu8; 32];
        let sig = SmallWinternitzW8::sign(&mut rng, &sk, 3, &message).unwrap();
        assert!(SmallWinternitzW8::verify(&pk, 3, &message, &sig));
        assert_eq!(sig.hashes.len(), WinternitzW8::DIMENSION);
    }

    #[test]
    fn test_target_sum_sign_and_verify() {
        let mut rng = rand::rng();
        let (pk, sk) = SmallTargetSumW2::key_gen(&mut rng, 0, 4);

        let message: [u8; 32] = rng.random();
        let sig = SmallTargetSumW2::sign(&mut rng, &sk, 1, &message).unwrap();
        assert!(SmallTargetSumW2::verify(&pk, 1, &message, &sig));

        let codeword =
            TargetSumEncoding::<MhW2, 117>::encode(&pk.parameter, &message, &sig.rho, 1).unwrap();
        let sum: usize = codeword.iter().map(|&x| x as usize).sum();
        assert_eq!(sum, 117);
    }

    #[test]
    fn test_consistency_checks_pass() {
        SIGWinternitzLifetime18W1::internal_consistency_check();
        SIGWinternitzLifetime18W2::internal_consistency_check();
        SIGWinternitzLifetime18W4::internal_consistency_check();
        SIGWinternitzLifetime18W8::internal_consistency_check();
        SIGTargetSumLifetime18W1NoOff::internal_consistency_check();
        SIGTargetSumLifetime18W2NoOff::internal_consistency_check();
        SIGTargetSumLifetime18W4NoOff::internal_consistency_check();
        SIGTargetSumLifetime18W8NoOff::internal_consistency_check();
        SIGWinternitzLifetime20W1::internal_consistency_check();
        SIGTargetSumLifetime20W8NoOff::internal_consistency_check();
    }
}
