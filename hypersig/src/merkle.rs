//! Sparse Merkle trees over a tweakable hash.
//!
//! A key pair only activates a contiguous range of epochs, so the tree is
//! built over that range alone. Each stored layer records its starting
//! index and is padded with fresh random domain elements so that every
//! occupied position has a sibling; random padding is indistinguishable
//! from a real leaf commitment, so an authentication path does not reveal
//! which epochs are active.
//!
//! Layers hold nodes by value in a flat vector. Authentication paths walk
//! bottom-up with arithmetic indices, so no parent pointers are needed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tweak_hash::TweakableHash;

/// One layer of the tree: nodes starting at `start_index` within the full
/// (mostly absent) layer. `start_index` is always even after padding.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct HashTreeLayer<TH: TweakableHash> {
    pub(crate) start_index: u32,
    pub(crate) nodes: Vec<TH::Domain>,
}

impl<TH: TweakableHash> Clone for HashTreeLayer<TH> {
    fn clone(&self) -> Self {
        Self {
            start_index: self.start_index,
            nodes: self.nodes.clone(),
        }
    }
}

impl<TH: TweakableHash> HashTreeLayer<TH> {
    /// Pad the layer so the start index is even and the node count is even:
    /// then every node has its sibling present.
    fn padded<R: Rng>(mut self, rng: &mut R) -> Self {
        if self.start_index % 2 == 1 {
            self.nodes.insert(0, TH::rand_domain(rng));
            self.start_index -= 1;
        }
        let end_index = self.start_index + self.nodes.len() as u32 - 1;
        if end_index % 2 == 0 {
            self.nodes.push(TH::rand_domain(rng));
        }
        self
    }
}

/// Merkle tree over the leaves of a contiguous epoch range.
///
/// All `depth + 1` layers are kept, bottom to top, so path queries never
/// recompute hashes.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SparseHashTree<TH: TweakableHash> {
    depth: usize,
    layers: Vec<HashTreeLayer<TH>>,
}

impl<TH: TweakableHash> Clone for SparseHashTree<TH> {
    fn clone(&self) -> Self {
        Self {
            depth: self.depth,
            layers: self.layers.clone(),
        }
    }
}

/// Authentication path: one sibling per level, bottom to top.
///
/// The opening carries no leaf range on purpose: revealing the start index
/// of the bottom layer would leak which epochs a key activates.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct HashTreeOpening<TH: TweakableHash> {
    pub co_path: Vec<TH::Domain>,
}

impl<TH: TweakableHash> Clone for HashTreeOpening<TH> {
    fn clone(&self) -> Self {
        Self {
            co_path: self.co_path.clone(),
        }
    }
}

impl<TH: TweakableHash> SparseHashTree<TH> {
    /// Build a tree of the given depth over `leaves`, which occupy
    /// positions `start_index..start_index + leaves.len()` of the bottom
    /// layer.
    pub fn new<R: Rng>(
        rng: &mut R,
        depth: usize,
        start_index: u32,
        parameter: &TH::Parameter,
        leaves: &[TH::Domain],
    ) -> Self {
        assert!(depth >= 1 && depth <= 32, "tree depth must be in 1..=32");
        assert!(!leaves.is_empty(), "tree must cover at least one leaf");
        assert!(
            start_index as u64 + leaves.len() as u64 <= 1u64 << depth,
            "leaves exceed the bottom layer of the tree"
        );

        let mut layers = Vec::with_capacity(depth + 1);
        let mut current = HashTreeLayer::<TH> {
            start_index,
            nodes: leaves.to_vec(),
        };

        for level in 0..depth {
            let padded = current.padded(rng);
            let parent_start = padded.start_index / 2;
            let parents = padded
                .nodes
                .chunks_exact(2)
                .enumerate()
                .map(|(offset, pair)| {
                    let tweak = TH::tree_tweak((level + 1) as u8, parent_start + offset as u32);
                    TH::apply(parameter, &tweak, pair)
                })
                .collect();
            layers.push(padded);
            current = HashTreeLayer {
                start_index: parent_start,
                nodes: parents,
            };
        }

        debug_assert_eq!(current.nodes.len(), 1);
        layers.push(current);

        Self { depth, layers }
    }

    /// The root node.
    pub fn root(&self) -> TH::Domain {
        self.layers[self.depth].nodes[0]
    }

    /// Authentication path for the leaf at `position`, which must be
    /// covered by the bottom layer.
    pub fn path(&self, position: u32) -> HashTreeOpening<TH> {
        let bottom = &self.layers[0];
        assert!(
            position >= bottom.start_index
                && position < bottom.start_index + bottom.nodes.len() as u32,
            "position not covered by the tree"
        );

        let mut pos = position;
        let co_path = self.layers[..self.depth]
            .iter()
            .map(|layer| {
                let sibling = (pos ^ 1) - layer.start_index;
                let node = layer.nodes[sibling as usize];
                pos >>= 1;
                node
            })
            .collect();

        HashTreeOpening { co_path }
    }
}

/// Recompute the root from a leaf and its authentication path and compare.
///
/// The leaf must sit at `position` of the bottom layer; `position` must lie
/// below `2^depth` for the claimed depth.
pub fn hash_tree_verify<TH: TweakableHash>(
    parameter: &TH::Parameter,
    root: &TH::Domain,
    position: u32,
    leaf: &TH::Domain,
    opening: &HashTreeOpening<TH>,
) -> bool {
    let depth = opening.co_path.len();
    if depth == 0 || depth > 32 {
        return false;
    }
    if (position as u64) >> depth != 0 {
        return false;
    }

    let mut current = *leaf;
    let mut pos = position;
    for (level, sibling) in opening.co_path.iter().enumerate() {
        let children = if pos & 1 == 0 {
            [current, *sibling]
        } else {
            [*sibling, current]
        };
        pos >>= 1;
        let tweak = TH::tree_tweak((level + 1) as u8, pos);
        current = TH::apply(parameter, &tweak, &children);
    }

    current == *root
}
