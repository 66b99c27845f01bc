//! Synchronized signature schemes over discrete epochs.
//!
//! A key pair supports a fixed lifetime of epochs and at most one
//! signature per epoch. Choosing epochs and never signing twice in the
//! same one is the caller's responsibility: the scheme neither detects nor
//! prevents reuse, and reuse voids its security.

use rand::Rng;
use thiserror::Error;

pub mod generalized_xmss;
pub mod instantiations_poseidon;
pub mod instantiations_poseidon_top_level;
pub mod instantiations_sha;

/// Errors surfaced by signing. Verification never errors; it returns
/// `false` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SigningError {
    /// The message does not have the fixed protocol length of 32 bytes.
    /// Not retryable.
    #[error("message must be exactly 32 bytes long")]
    InvalidMessageLength,

    /// Rejection sampling found no valid encoding within the retry budget.
    /// Retrying with a different RNG seed may succeed; the key is fine.
    #[error("no valid encoding found after {0} attempts")]
    UnluckyFailure(usize),
}

/// A stateful, synchronized signature scheme.
///
/// Keys are generated for a contiguous range of active epochs within the
/// scheme lifetime. Signing is pure with respect to the secret key.
pub trait SignatureScheme {
    type PublicKey;
    type SecretKey;
    type Signature;

    /// Total number of epochs supported by one key. Always a power of two.
    const LIFETIME: u64;

    /// Generate a key pair active for epochs
    /// `activation_epoch..activation_epoch + num_active_epochs`.
    fn key_gen<R: Rng>(
        rng: &mut R,
        activation_epoch: u32,
        num_active_epochs: u32,
    ) -> (Self::PublicKey, Self::SecretKey);

    /// Sign a 32-byte message for an epoch the key is active in.
    ///
    /// Panics if `epoch` lies outside the key's active range.
    fn sign<R: Rng>(
        rng: &mut R,
        sk: &Self::SecretKey,
        epoch: u32,
        message: &[u8],
    ) -> Result<Self::Signature, SigningError>;

    /// Check a signature. All internal failures collapse to `false`.
    fn verify(pk: &Self::PublicKey, epoch: u32, message: &[u8], sig: &Self::Signature) -> bool;

    /// Validate scheme parameters. Panics on misconfiguration; never
    /// called on the signing or verification paths.
    fn internal_consistency_check() {}
}
