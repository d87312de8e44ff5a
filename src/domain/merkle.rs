//! Fixed-depth MiMC7 Merkle tree over the anonymity set.
//!
//! The tree height matches the membership circuit's fixed depth, so
//! authentication paths always have `TREE_DEPTH` elements regardless of how
//! many members the set actually has; unused leaves are zero.

use ark_bn254::Fr;
use ark_ff::Zero;
use serde::{Deserialize, Serialize};

use crate::crypto::field::fr_dec_vec;
use crate::crypto::mimc::Mimc7;
use crate::domain::keys::PublicKey;

/// Tree height, fixed to match the circuit.
pub const TREE_DEPTH: usize = 10;

/// Maximum number of anonymity-set members (2^TREE_DEPTH).
pub const MAX_MEMBERS: usize = 1 << TREE_DEPTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MerkleError {
    #[error("anonymity set has {0} members, tree capacity is {MAX_MEMBERS}")]
    SetTooLarge(usize),
}

/// Hash a public key into its leaf: `multi_hash([x, y], 0)`.
pub fn leaf_hash(mimc: &Mimc7, key: &PublicKey) -> Fr {
    mimc.multi_hash(&[key.x(), key.y()], Fr::zero())
}

/// Authentication path for one leaf, always `TREE_DEPTH` long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePath {
    /// Sibling hashes from leaf level to the root.
    #[serde(with = "fr_dec_vec")]
    pub elements: Vec<Fr>,
    /// 0 = current node is the left child, 1 = right child, per level.
    pub indices: Vec<u8>,
    /// Position of the leaf in the ordered anonymity set.
    pub leaf_index: usize,
}

impl MerklePath {
    /// Recompute the root from a leaf and compare.
    ///
    /// A path whose element or index list is not exactly `TREE_DEPTH` long
    /// (possible on deserialized paths) never verifies.
    pub fn verify(&self, mimc: &Mimc7, root: Fr, leaf: Fr) -> bool {
        if self.elements.len() != TREE_DEPTH || self.indices.len() != TREE_DEPTH {
            return false;
        }
        let mut current = leaf;
        for (sibling, side) in self.elements.iter().zip(&self.indices) {
            current = if *side == 0 {
                mimc.multi_hash(&[current, *sibling], Fr::zero())
            } else {
                mimc.multi_hash(&[*sibling, current], Fr::zero())
            };
        }
        current == root
    }
}

/// Fixed-depth binary Merkle tree built over an ordered set of public keys.
pub struct AnonymityTree {
    /// All levels, leaves (level 0) through the root (level TREE_DEPTH).
    levels: Vec<Vec<Fr>>,
    leaf_count: usize,
}

impl AnonymityTree {
    /// Build the tree over the ordered anonymity set, padding empty leaves
    /// with zero.
    pub fn build(mimc: &Mimc7, members: &[PublicKey]) -> Result<Self, MerkleError> {
        if members.len() > MAX_MEMBERS {
            return Err(MerkleError::SetTooLarge(members.len()));
        }

        let mut leaves = vec![Fr::zero(); MAX_MEMBERS];
        for (i, member) in members.iter().enumerate() {
            leaves[i] = leaf_hash(mimc, member);
        }

        let mut levels = Vec::with_capacity(TREE_DEPTH + 1);
        levels.push(leaves);
        for level in 1..=TREE_DEPTH {
            let below = &levels[level - 1];
            let mut nodes = Vec::with_capacity(below.len() / 2);
            for pair in below.chunks(2) {
                nodes.push(mimc.multi_hash(&[pair[0], pair[1]], Fr::zero()));
            }
            levels.push(nodes);
        }

        Ok(Self {
            levels,
            leaf_count: members.len(),
        })
    }

    pub fn root(&self) -> Fr {
        self.levels[TREE_DEPTH][0]
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// The leaf hash at a given member index.
    pub fn leaf(&self, index: usize) -> Option<Fr> {
        (index < self.leaf_count).then(|| self.levels[0][index])
    }

    /// Authentication path for the member at `leaf_index`.
    pub fn path(&self, leaf_index: usize) -> Option<MerklePath> {
        if leaf_index >= self.leaf_count {
            return None;
        }

        let mut elements = Vec::with_capacity(TREE_DEPTH);
        let mut indices = Vec::with_capacity(TREE_DEPTH);
        let mut position = leaf_index;
        for level in 0..TREE_DEPTH {
            let sibling = position ^ 1;
            elements.push(self.levels[level][sibling]);
            indices.push((position & 1) as u8);
            position >>= 1;
        }

        Some(MerklePath {
            elements,
            indices,
            leaf_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::keys::Keypair;

    use super::*;

    fn members(n: usize) -> Vec<PublicKey> {
        (0..n).map(|_| Keypair::generate().public).collect()
    }

    #[test]
    fn path_has_fixed_depth_and_verifies() {
        let mimc = Mimc7::new();
        let set = members(6);
        let tree = AnonymityTree::build(&mimc, &set).unwrap();

        for (i, member) in set.iter().enumerate() {
            let path = tree.path(i).unwrap();
            assert_eq!(path.elements.len(), TREE_DEPTH);
            assert_eq!(path.indices.len(), TREE_DEPTH);
            assert!(path.verify(&mimc, tree.root(), leaf_hash(&mimc, member)));
        }
    }

    #[test]
    fn path_fails_against_wrong_leaf() {
        let mimc = Mimc7::new();
        let set = members(4);
        let tree = AnonymityTree::build(&mimc, &set).unwrap();

        let path = tree.path(0).unwrap();
        let outsider = Keypair::generate().public;
        assert!(!path.verify(&mimc, tree.root(), leaf_hash(&mimc, &outsider)));
    }

    #[test]
    fn truncated_path_never_verifies() {
        let mimc = Mimc7::new();
        let set = members(4);
        let tree = AnonymityTree::build(&mimc, &set).unwrap();
        let leaf = leaf_hash(&mimc, &set[0]);

        let mut path = tree.path(0).unwrap();
        path.indices.pop();
        assert!(!path.verify(&mimc, tree.root(), leaf));

        // An empty path must not make a leaf "verify" against itself.
        let empty = MerklePath {
            elements: vec![],
            indices: vec![],
            leaf_index: 0,
        };
        assert!(!empty.verify(&mimc, leaf, leaf));
    }

    #[test]
    fn root_depends_on_membership() {
        let mimc = Mimc7::new();
        let a = AnonymityTree::build(&mimc, &members(3)).unwrap();
        let b = AnonymityTree::build(&mimc, &members(3)).unwrap();
        assert_ne!(a.root(), b.root());
    }

    #[test]
    fn root_deterministic_for_same_set() {
        let mimc = Mimc7::new();
        let set = members(5);
        let a = AnonymityTree::build(&mimc, &set).unwrap();
        let b = AnonymityTree::build(&mimc, &set).unwrap();
        assert_eq!(a.root(), b.root());
    }

    #[test]
    fn out_of_range_index_has_no_path() {
        let mimc = Mimc7::new();
        let tree = AnonymityTree::build(&mimc, &members(2)).unwrap();
        assert!(tree.path(2).is_none());
    }
}
