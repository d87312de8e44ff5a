//! Circuit-input assembly for the anonymity-set membership proof.
//!
//! Given the operator key, the signer's keypair, the ordered anonymity set,
//! and the already-encrypted submission, this builds the Merkle tree,
//! locates the signer's leaf, and produces the structured payload the
//! external prover consumes. Pure and deterministic for a fixed set
//! ordering.

use ark_bn254::Fr;
use serde::Serialize;

use crate::crypto::field::{fr_dec, fr_to_decimal};
use crate::crypto::mimc::Mimc7;
use crate::domain::ciphertext::Ciphertext;
use crate::domain::keys::{Keypair, PublicKey};
use crate::domain::merkle::{AnonymityTree, MerkleError, MerklePath};
use crate::domain::pool::PoolId;
use crate::domain::proof::PublicSignals;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WitnessError {
    #[error("signer public key is not a member of the anonymity set")]
    NotInAnonymitySet,
    #[error(transparent)]
    Merkle(#[from] MerkleError),
}

/// The structured input handed to the external prover.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitInput {
    pub operator_pubkey: PublicKey,
    pub signer_pubkey: PublicKey,
    /// The circuit-formatted (clamped) private scalar.
    #[serde(with = "fr_dec")]
    pub signer_scalar: Fr,
    #[serde(with = "fr_dec")]
    pub merkle_root: Fr,
    pub merkle_path: MerklePath,
    pub ciphertext: Ciphertext,
    pub pool_id: PoolId,
}

impl CircuitInput {
    /// Assemble the circuit input.
    ///
    /// Builds the anonymity tree, finds the signer's leaf by position in the
    /// ordered set, and computes its authentication path. Fails with
    /// [`WitnessError::NotInAnonymitySet`] when the signer's public key has
    /// no matching leaf.
    pub fn build(
        mimc: &Mimc7,
        operator_pubkey: PublicKey,
        signer: &Keypair,
        anonymity_set: &[PublicKey],
        pool_id: PoolId,
        ciphertext: Ciphertext,
    ) -> Result<Self, WitnessError> {
        let leaf_index = anonymity_set
            .iter()
            .position(|key| key == &signer.public)
            .ok_or(WitnessError::NotInAnonymitySet)?;

        let tree = AnonymityTree::build(mimc, anonymity_set)?;
        let merkle_path = tree
            .path(leaf_index)
            .ok_or(WitnessError::NotInAnonymitySet)?;

        Ok(Self {
            operator_pubkey,
            signer_pubkey: signer.public,
            signer_scalar: signer.private.format_for_circuit(),
            merkle_root: tree.root(),
            merkle_path,
            ciphertext,
            pool_id,
        })
    }

    /// The public signals a correct proof over this input exposes.
    pub fn public_signals(&self) -> PublicSignals {
        PublicSignals::from_parts(&self.signer_pubkey, self.merkle_root, self.pool_id)
    }

    /// The flat snarkjs-style payload the prover binary reads.
    pub fn prover_input(&self) -> ProverInput {
        ProverInput::from(self)
    }
}

/// Flattened prover input with snarkjs-style field names.
#[derive(Debug, Clone, Serialize)]
pub struct ProverInput {
    #[serde(rename = "operatorPubKey")]
    operator_pubkey: [String; 2],
    #[serde(rename = "signerPubKey")]
    signer_pubkey: [String; 2],
    #[serde(rename = "signerPrivKeyHash")]
    signer_scalar: String,
    #[serde(rename = "merkleRoot")]
    merkle_root: String,
    #[serde(rename = "pathElements")]
    path_elements: Vec<String>,
    #[serde(rename = "pathIndices")]
    path_indices: Vec<u8>,
    #[serde(rename = "ciphertextIv")]
    ciphertext_iv: String,
    #[serde(rename = "ciphertextData")]
    ciphertext_data: Vec<String>,
    #[serde(rename = "poolId")]
    pool_id: String,
}

impl From<&CircuitInput> for ProverInput {
    fn from(input: &CircuitInput) -> Self {
        Self {
            operator_pubkey: [
                fr_to_decimal(&input.operator_pubkey.x()),
                fr_to_decimal(&input.operator_pubkey.y()),
            ],
            signer_pubkey: [
                fr_to_decimal(&input.signer_pubkey.x()),
                fr_to_decimal(&input.signer_pubkey.y()),
            ],
            signer_scalar: fr_to_decimal(&input.signer_scalar),
            merkle_root: fr_to_decimal(&input.merkle_root),
            path_elements: input
                .merkle_path
                .elements
                .iter()
                .map(fr_to_decimal)
                .collect(),
            path_indices: input.merkle_path.indices.clone(),
            ciphertext_iv: fr_to_decimal(&input.ciphertext.iv),
            ciphertext_data: input.ciphertext.data.iter().map(fr_to_decimal).collect(),
            pool_id: input.pool_id.0.to_string(),
        }
    }
}
