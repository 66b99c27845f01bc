//! SHA3-based scheme instantiations for lifetimes 2^18 and 2^20.
//!
//! Hash output lengths grow slightly with the chunk size to compensate for
//! the larger number of hash invocations per chain.

use crate::encoding::target_sum::TargetSumEncoding;
use crate::encoding::winternitz::WinternitzEncoding;
use crate::message_hash::sha::ShaMessageHash;
use crate::prf::sha::ShaPrf;
use crate::tweak_hash::sha::ShaTweakHash;

use super::generalized_xmss::GeneralizedXmss;

const PARAMETER_LEN: usize = 18;
const RAND_LEN: usize = 23;

type MhW1 = ShaMessageHash<PARAMETER_LEN, RAND_LEN, 144, 1>;
type MhW2 = ShaMessageHash<PARAMETER_LEN, RAND_LEN, 72, 2>;
type MhW4 = ShaMessageHash<PARAMETER_LEN, RAND_LEN, 36, 4>;
type MhW8 = ShaMessageHash<PARAMETER_LEN, RAND_LEN, 18, 8>;

type ThW1 = ShaTweakHash<PARAMETER_LEN, 25>;
type ThW2 = ShaTweakHash<PARAMETER_LEN, 26>;
type ThW4 = ShaTweakHash<PARAMETER_LEN, 26>;
type ThW8 = ShaTweakHash<PARAMETER_LEN, 28>;

type PrfW1 = ShaPrf<25>;
type PrfW2 = ShaPrf<26>;
type PrfW4 = ShaPrf<26>;
type PrfW8 = ShaPrf<28>;

type WinternitzW1 = WinternitzEncoding<MhW1, 1, 8>;
type WinternitzW2 = WinternitzEncoding<MhW2, 2, 4>;
type WinternitzW4 = WinternitzEncoding<MhW4, 4, 3>;
type WinternitzW8 = WinternitzEncoding<MhW8, 8, 2>;

// Winternitz, lifetime 2^18
pub type SIGWinternitzLifetime18W1 = GeneralizedXmss<PrfW1, WinternitzW1, ThW1, 18>;
pub type SIGWinternitzLifetime18W2 = GeneralizedXmss<PrfW2, WinternitzW2, ThW2, 18>;
pub type SIGWinternitzLifetime18W4 = GeneralizedXmss<PrfW4, WinternitzW4, ThW4, 18>;
pub type SIGWinternitzLifetime18W8 = GeneralizedXmss<PrfW8, WinternitzW8, ThW8, 18>;

// Winternitz, lifetime 2^20
pub type SIGWinternitzLifetime20W1 = GeneralizedXmss<PrfW1, WinternitzW1, ThW1, 20>;
pub type SIGWinternitzLifetime20W2 = GeneralizedXmss<PrfW2, WinternitzW2, ThW2, 20>;
pub type SIGWinternitzLifetime20W4 = GeneralizedXmss<PrfW4, WinternitzW4, ThW4, 20>;
pub type SIGWinternitzLifetime20W8 = GeneralizedXmss<PrfW8, WinternitzW8, ThW8, 20>;

// Target-sum, lifetime 2^18. The target equals the expected digit sum;
// the Off10 variants shift it up by ten percent, trading signing retries
// for shorter verification.
pub type SIGTargetSumLifetime18W1NoOff =
    GeneralizedXmss<PrfW1, TargetSumEncoding<MhW1, 72>, ThW1, 18>;
pub type SIGTargetSumLifetime18W1Off10 =
    GeneralizedXmss<PrfW1, TargetSumEncoding<MhW1, 80>, ThW1, 18>;
pub type SIGTargetSumLifetime18W2NoOff =
    GeneralizedXmss<PrfW2, TargetSumEncoding<MhW2, 108>, ThW2, 18>;
pub type SIGTargetSumLifetime18W2Off10 =
    GeneralizedXmss<PrfW2, TargetSumEncoding<MhW2, 119>, ThW2, 18>;
pub type SIGTargetSumLifetime18W4NoOff =
    GeneralizedXmss<PrfW4, TargetSumEncoding<MhW4, 270>, ThW4, 18>;
pub type SIGTargetSumLifetime18W4Off10 =
    GeneralizedXmss<PrfW4, TargetSumEncoding<MhW4, 297>, ThW4, 18>;
pub type SIGTargetSumLifetime18W8NoOff =
    GeneralizedXmss<PrfW8, TargetSumEncoding<MhW8, 2295>, ThW8, 18>;
pub type SIGTargetSumLifetime18W8Off10 =
    GeneralizedXmss<PrfW8, TargetSumEncoding<MhW8, 2525>, ThW8, 18>;

// Target-sum, lifetime 2^20
pub type SIGTargetSumLifetime20W1NoOff =
    GeneralizedXmss<PrfW1, TargetSumEncoding<MhW1, 72>, ThW1, 20>;
pub type SIGTargetSumLifetime20W2NoOff =
    GeneralizedXmss<PrfW2, TargetSumEncoding<MhW2, 108>, ThW2, 20>;
pub type SIGTargetSumLifetime20W4NoOff =
    GeneralizedXmss<PrfW4, TargetSumEncoding<MhW4, 270>, ThW4, 20>;
pub type SIGTargetSumLifetime20W8NoOff =
    GeneralizedXmss<PrfW8, TargetSumEncoding<MhW8, 2295>, ThW8, 20>;

// Small lifetimes for test vectors and demos. Lifetime 2^2 means four
// epochs; key generation is instant.
pub type SIGWinternitzLifetime2W4 = GeneralizedXmss<PrfW4, WinternitzW4, ThW4, 2>;
pub type SIGTargetSumLifetime2W2 = GeneralizedXmss<PrfW2, TargetSumEncoding<MhW2, 108>, ThW2, 2>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::IncomparableEncoding;
    use crate::signature::{SignatureScheme, SigningError};
    use rand::Rng;

    type SmallW1 = GeneralizedXmss<PrfW1, WinternitzW1, ThW1, 2>;
    type SmallW8 = GeneralizedXmss<PrfW8, WinternitzW8, ThW8, 2>;

    #[test]
    fn test_winternitz_w4_sign_and_verify() {
        let mut rng = rand::rng();
        let (pk, sk) = SIGWinternitzLifetime2W4::key_gen(&mut rng, 0, 4);

        let message = [0u8; 32];
        let sig = SIGWinternitzLifetime2W4::sign(&mut rng, &sk, 0, &message).unwrap();
        assert!(SIGWinternitzLifetime2W4::verify(&pk, 0, &message, &sig));
    }

    #[test]
    fn test_signature_is_epoch_bound() {
        let mut rng = rand::rng();
        let (pk, sk) = SIGWinternitzLifetime2W4::key_gen(&mut rng, 0, 4);

        let message = [0u8; 32];
        let sig = SIGWinternitzLifetime2W4::sign(&mut rng, &sk, 0, &message).unwrap();
        assert!(!SIGWinternitzLifetime2W4::verify(&pk, 1, &message, &sig));
        assert!(!SIGWinternitzLifetime2W4::verify(&pk, 3, &message, &sig));
        // epoch beyond the lifetime is rejected outright
        assert!(!SIGWinternitzLifetime2W4::verify(&pk, 4, &message, &sig));
    }

    #[test]
    fn test_signature_is_message_bound() {
        let mut rng = rand::rng();
        let (pk, sk) = SIGWinternitzLifetime2W4::key_gen(&mut rng, 0, 4);

        let sig = SIGWinternitzLifetime2W4::sign(&mut rng, &sk, 2, &[7u8; 32]).unwrap();
        assert!(SIGWinternitzLifetime2W4::verify(&pk, 2, &[7u8; 32], &sig));
        assert!(!SIGWinternitzLifetime2W4::verify(&pk, 2, &[8u8; 32], &sig));
    }

    #[test]
    fn test_all_chunk_sizes_round_trip() {
        let mut rng = rand::rng();
        let message = [0x42u8; 32];

        let (pk, sk) = SmallW1::key_gen(&mut rng, 0, 4);
        let sig = SmallW1::sign(&mut rng, &sk, 1, &message).unwrap();
        assert!(SmallW1::verify(&pk, 1, &message, &sig));

        let (pk, sk) = SmallW8::key_gen(&mut rng, 0, 4);
        let sig = SmallW8::sign(&mut rng, &sk, 1, &message).unwrap();
        assert!(SmallW8::verify(&pk, 1, &message, &sig));
    }

    #[test]
    fn test_partially_active_key() {
        let mut rng = rand::rng();
        // only epochs 1 and 2 of the four are active
        let (pk, sk) = SIGWinternitzLifetime2W4::key_gen(&mut rng, 1, 2);

        let message = [9u8; 32];
        for epoch in [1u32, 2] {
            let sig = SIGWinternitzLifetime2W4::sign(&mut rng, &sk, epoch, &message).unwrap();
            assert!(SIGWinternitzLifetime2W4::verify(&pk, epoch, &message, &sig));
        }
    }

    #[test]
    #[should_panic(expected = "not active")]
    fn test_sign_outside_active_range_panics() {
        let mut rng = rand::rng();
        let (_pk, sk) = SIGWinternitzLifetime2W4::key_gen(&mut rng, 1, 2);
        let _ = SIGWinternitzLifetime2W4::sign(&mut rng, &sk, 0, &[0u8; 32]);
    }

    #[test]
    fn test_wrong_message_length_is_an_error() {
        let mut rng = rand::rng();
        let (pk, sk) = SIGWinternitzLifetime2W4::key_gen(&mut rng, 0, 4);

        let result = SIGWinternitzLifetime2W4::sign(&mut rng, &sk, 0, &[0u8; 31]);
        assert_eq!(result.err(), Some(SigningError::InvalidMessageLength));

        let sig = SIGWinternitzLifetime2W4::sign(&mut rng, &sk, 0, &[0u8; 32]).unwrap();
        assert!(!SIGWinternitzLifetime2W4::verify(&pk, 0, &[0u8; 33], &sig));
    }

    #[test]
    fn test_target_sum_digits_hit_the_target() {
        let mut rng = rand::rng();
        let (pk, sk) = SIGTargetSumLifetime2W2::key_gen(&mut rng, 0, 4);

        let message: [u8; 32] = rng.random();
        let sig = SIGTargetSumLifetime2W2::sign(&mut rng, &sk, 0, &message).unwrap();
        assert!(SIGTargetSumLifetime2W2::verify(&pk, 0, &message, &sig));

        // re-encode with the signature randomness: the accepted codeword
        // sums to exactly the target
        let codeword =
            TargetSumEncoding::<MhW2, 108>::encode(&pk.parameter, &message, &sig.rho, 0).unwrap();
        let sum: usize = codeword.iter().map(|&x| x as usize).sum();
        assert_eq!(sum, 108);
    }

    #[test]
    fn test_unsatisfiable_target_sum_is_unlucky() {
        // 72 digits below 4 can never sum to 10000, so signing exhausts
        // its retry budget
        type Unsatisfiable =
            GeneralizedXmss<PrfW2, TargetSumEncoding<MhW2, 10_000>, ThW2, 2>;

        let mut rng = rand::rng();
        let (_pk, sk) = Unsatisfiable::key_gen(&mut rng, 0, 1);
        let result = Unsatisfiable::sign(&mut rng, &sk, 0, &[0u8; 32]);
        assert!(matches!(result, Err(SigningError::UnluckyFailure(_))));
    }

    #[test]
    fn test_path_length_matches_lifetime() {
        let mut rng = rand::rng();
        let (_pk, sk) = SIGWinternitzLifetime2W4::key_gen(&mut rng, 0, 4);
        let sig = SIGWinternitzLifetime2W4::sign(&mut rng, &sk, 3, &[1u8; 32]).unwrap();
        assert_eq!(sig.path.co_path.len(), 2);
        assert_eq!(sig.hashes.len(), WinternitzW4::DIMENSION);
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
        SIGTargetSumLifetime18W8Off10::internal_consistency_check();
        SIGWinternitzLifetime20W4::internal_consistency_check();
        SIGTargetSumLifetime20W4NoOff::internal_consistency_check();
    }
}
