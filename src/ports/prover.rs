use std::future::Future;

use crate::domain::proof::MembershipProof;
use crate::domain::witness::CircuitInput;

/// Port for ZK membership-proof generation.
///
/// Implementations:
/// - snarkjs/groth16 sidecar (shells out to the circuit toolchain)
/// - Mock prover for testing
pub trait Prover: Send + Sync {
    /// Generate a membership proof for the assembled circuit input.
    ///
    /// The input bundles the signer's clamped scalar, the Merkle
    /// authentication path, and the encrypted submission. The returned
    /// proof carries the public signals the verifier (and the reveal path)
    /// reads back.
    fn prove(
        &self,
        input: &CircuitInput,
    ) -> impl Future<Output = Result<MembershipProof, ProverError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum ProverError {
    #[error("proof generation failed: {0}")]
    ProofFailed(String),

    #[error("circuit input serialization error: {0}")]
    InputSerialization(String),

    #[error("prover binary not found: {0}")]
    BinaryNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
