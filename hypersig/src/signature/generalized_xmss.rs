//! The Generalized XMSS signature scheme, generic over its PRF,
//! incomparable encoding, and tweakable hash.
//!
//! One epoch owns one set of hash chains. Key generation walks every chain
//! to its tip, commits the tips into one leaf per epoch, and authenticates
//! the leaves of the active range with a sparse Merkle tree. A signature
//! reveals the chain element at the position given by each codeword digit;
//! the verifier walks the remaining steps and recomputes the leaf.

use core::marker::PhantomData;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::encoding::IncomparableEncoding;
use crate::merkle::{hash_tree_verify, HashTreeOpening, SparseHashTree};
use crate::prf::Pseudorandom;
use crate::tweak_hash::{chain, TweakableHash};
use crate::MESSAGE_LENGTH;

use super::{SignatureScheme, SigningError};

/// Signature: authentication path, encoding randomness, and one chain
/// element per codeword digit.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct GeneralizedXmssSignature<IE: IncomparableEncoding, TH: TweakableHash> {
    pub path: HashTreeOpening<TH>,
    pub rho: IE::Randomness,
    pub hashes: Vec<TH::Domain>,
}

impl<IE: IncomparableEncoding, TH: TweakableHash> Clone for GeneralizedXmssSignature<IE, TH> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            rho: self.rho,
            hashes: self.hashes.clone(),
        }
    }
}

/// Public key: Merkle root and the hash parameter every operation is bound
/// to.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct GeneralizedXmssPublicKey<TH: TweakableHash> {
    pub root: TH::Domain,
    pub parameter: TH::Parameter,
}

impl<TH: TweakableHash> Clone for GeneralizedXmssPublicKey<TH> {
    fn clone(&self) -> Self {
        Self {
            root: self.root,
            parameter: self.parameter,
        }
    }
}

/// Secret key: PRF master key and the full tree over the active epochs.
///
/// The tree is immutable after key generation; signing only reads it.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct GeneralizedXmssSecretKey<PRF: Pseudorandom, TH: TweakableHash> {
    prf_key: PRF::Key,
    tree: SparseHashTree<TH>,
    parameter: TH::Parameter,
    activation_epoch: u32,
    num_active_epochs: u32,
}

impl<PRF: Pseudorandom, TH: TweakableHash> Clone for GeneralizedXmssSecretKey<PRF, TH> {
    fn clone(&self) -> Self {
        Self {
            prf_key: self.prf_key,
            tree: self.tree.clone(),
            parameter: self.parameter,
            activation_epoch: self.activation_epoch,
            num_active_epochs: self.num_active_epochs,
        }
    }
}

impl<PRF: Pseudorandom, TH: TweakableHash> GeneralizedXmssSecretKey<PRF, TH> {
    /// First epoch this key can sign for.
    pub fn activation_epoch(&self) -> u32 {
        self.activation_epoch
    }

    /// Number of consecutive epochs this key can sign for.
    pub fn num_active_epochs(&self) -> u32 {
        self.num_active_epochs
    }
}

/// Generalized XMSS over a PRF, an incomparable encoding, and a tweakable
/// hash, with lifetime `2^LOG_LIFETIME`.
///
/// The three components are resolved at compile time, so the chain-walking
/// inner loops carry no dynamic dispatch.
pub struct GeneralizedXmss<PRF, IE, TH, const LOG_LIFETIME: usize>(PhantomData<(PRF, IE, TH)>);

impl<PRF, IE, TH, const LOG_LIFETIME: usize> SignatureScheme
    for GeneralizedXmss<PRF, IE, TH, LOG_LIFETIME>
where
    PRF: Pseudorandom<Output = TH::Domain>,
    IE: IncomparableEncoding<Parameter = TH::Parameter>,
    TH: TweakableHash,
{
    type PublicKey = GeneralizedXmssPublicKey<TH>;
    type SecretKey = GeneralizedXmssSecretKey<PRF, TH>;
    type Signature = GeneralizedXmssSignature<IE, TH>;

    const LIFETIME: u64 = 1 << LOG_LIFETIME;

    fn key_gen<R: Rng>(
        rng: &mut R,
        activation_epoch: u32,
        num_active_epochs: u32,
    ) -> (Self::PublicKey, Self::SecretKey) {
        assert!(num_active_epochs >= 1, "key gen: no active epochs");
        assert!(
            activation_epoch as u64 + num_active_epochs as u64 <= Self::LIFETIME,
            "key gen: active range exceeds the lifetime"
        );

        let parameter = TH::rand_parameter(rng);
        let prf_key = PRF::key_gen(rng);

        let chain_length = IE::BASE;
        let num_chains = IE::DIMENSION;

        // one leaf per active epoch, committing all chain tips
        let epoch_range = activation_epoch as u64..activation_epoch as u64 + num_active_epochs as u64;
        let leaves: Vec<TH::Domain> = epoch_range
            .map(|epoch| {
                let epoch = epoch as u32;
                let ends: Vec<TH::Domain> = (0..num_chains)
                    .map(|index| {
                        let start = PRF::apply(&prf_key, epoch, index as u64);
                        chain::<TH>(&parameter, epoch, index as u8, 0, chain_length - 1, &start)
                    })
                    .collect();
                TH::apply(&parameter, &TH::tree_tweak(0, epoch), &ends)
            })
            .collect();

        let tree =
            SparseHashTree::<TH>::new(rng, LOG_LIFETIME, activation_epoch, &parameter, &leaves);
        let root = tree.root();

        let pk = GeneralizedXmssPublicKey { root, parameter };
        let sk = GeneralizedXmssSecretKey {
            prf_key,
            tree,
            parameter,
            activation_epoch,
            num_active_epochs,
        };
        (pk, sk)
    }

    fn sign<R: Rng>(
        rng: &mut R,
        sk: &Self::SecretKey,
        epoch: u32,
        message: &[u8],
    ) -> Result<Self::Signature, SigningError> {
        let message: &[u8; MESSAGE_LENGTH] = message
            .try_into()
            .map_err(|_| SigningError::InvalidMessageLength)?;

        let active_end = sk.activation_epoch as u64 + sk.num_active_epochs as u64;
        assert!(
            epoch >= sk.activation_epoch && (epoch as u64) < active_end,
            "signing: key is not active in this epoch"
        );

        // rejection sampling: retry with fresh randomness until the
        // encoding accepts
        let mut encoding = None;
        for _ in 0..IE::MAX_TRIES {
            let rho = IE::rand(rng);
            if let Ok(codeword) = IE::encode(&sk.parameter, message, &rho, epoch) {
                encoding = Some((rho, codeword));
                break;
            }
        }
        let (rho, codeword) = encoding.ok_or(SigningError::UnluckyFailure(IE::MAX_TRIES))?;

        // reveal the chain element at each codeword position
        let hashes = codeword
            .iter()
            .enumerate()
            .map(|(index, &position)| {
                let start = PRF::apply(&sk.prf_key, epoch, index as u64);
                chain::<TH>(
                    &sk.parameter,
                    epoch,
                    index as u8,
                    0,
                    position as usize,
                    &start,
                )
            })
            .collect();

        Ok(GeneralizedXmssSignature {
            path: sk.tree.path(epoch),
            rho,
            hashes,
        })
    }

    fn verify(pk: &Self::PublicKey, epoch: u32, message: &[u8], sig: &Self::Signature) -> bool {
        let Ok(message) = <&[u8; MESSAGE_LENGTH]>::try_from(message) else {
            return false;
        };
        if epoch as u64 >= Self::LIFETIME {
            return false;
        }

        let Ok(codeword) = IE::encode(&pk.parameter, message, &sig.rho, epoch) else {
            return false;
        };
        if codeword.len() != IE::DIMENSION || sig.hashes.len() != IE::DIMENSION {
            return false;
        }
        if sig.path.co_path.len() != LOG_LIFETIME {
            return false;
        }

        // walk every chain the remaining steps to its tip
        let mut ends = Vec::with_capacity(IE::DIMENSION);
        for (index, (&position, start)) in codeword.iter().zip(sig.hashes.iter()).enumerate() {
            if position as usize >= IE::BASE {
                return false;
            }
            let steps = IE::BASE - 1 - position as usize;
            ends.push(chain::<TH>(
                &pk.parameter,
                epoch,
                index as u8,
                position,
                steps,
                start,
            ));
        }

        let leaf = TH::apply(&pk.parameter, &TH::tree_tweak(0, epoch), &ends);
        hash_tree_verify::<TH>(&pk.parameter, &pk.root, epoch, &leaf, &sig.path)
    }

    fn internal_consistency_check() {
        PRF::internal_consistency_check();
        IE::internal_consistency_check();
        TH::internal_consistency_check();
        assert!(
            LOG_LIFETIME >= 1 && LOG_LIFETIME <= 32,
            "scheme: lifetime must be between 2^1 and 2^32"
        );
        assert!(IE::BASE <= 256, "scheme: encoding base must fit in u8");
        assert!(
            IE::DIMENSION <= 256,
            "scheme: encoding dimension must fit in u8"
        );
        assert!(IE::MAX_TRIES >= 1, "scheme: at least one encoding attempt");
    }
}
