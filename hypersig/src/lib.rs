//! Stateful hash-based signatures in the Generalized XMSS family.
//!
//! A key pair is bound to a lifetime of 2^D discrete epochs and may sign
//! at most once per epoch. Security rests entirely on symmetric
//! primitives: messages are mapped to mutually incomparable digit vectors,
//! digits select positions in tweakable hash chains, and a sparse Merkle
//! tree authenticates one chain-tip commitment per active epoch.
//!
//! The scheme ([`signature::generalized_xmss::GeneralizedXmss`]) is
//! generic over a PRF, an incomparable encoding, and a tweakable hash;
//! ready-made SHA3 and Poseidon2/BabyBear instantiations live in the
//! `signature::instantiations_*` modules.
//!
//! Epoch discipline is the caller's job: signing the same epoch twice with
//! one key is a protocol violation the scheme does not detect.

pub mod babybear;
pub mod encoding;
pub mod hypercube;
pub mod merkle;
pub mod message_hash;
pub mod poseidon2;
pub mod prf;
pub mod signature;
pub mod tweak_hash;

pub use signature::{SignatureScheme, SigningError};

// Re-export all protocol constants from the shared constants crate
pub use hypersig_constants::*;
