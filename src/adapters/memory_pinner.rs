use std::collections::HashMap;

use sha3::{Digest, Keccak256};
use tokio::sync::Mutex;

use crate::domain::pool::{ContentId, PoolId};
use crate::domain::proof::MembershipProof;
use crate::ports::pinner::{ArtifactPinner, PinError};

/// In-memory implementation of `ArtifactPinner` for PoC and testing.
///
/// Content ids are the Keccak-256 of the canonical JSON serialization of
/// the proof, hex-encoded. Pinning is idempotent: the same proof always
/// hashes to the same id, and re-pinning just overwrites the stored copy.
pub struct InMemoryPinner {
    pinned: Mutex<HashMap<ContentId, Vec<u8>>>,
}

impl InMemoryPinner {
    pub fn new() -> Self {
        Self {
            pinned: Mutex::new(HashMap::new()),
        }
    }

    /// Retrieve a pinned artifact by content id.
    pub async fn fetch(&self, id: &ContentId) -> Option<Vec<u8>> {
        let pinned = self.pinned.lock().await;
        pinned.get(id).cloned()
    }

    /// Number of distinct artifacts currently pinned.
    pub async fn len(&self) -> usize {
        let pinned = self.pinned.lock().await;
        pinned.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryPinner {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactPinner for InMemoryPinner {
    async fn pin(
        &self,
        _pool_id: PoolId,
        proof: &MembershipProof,
    ) -> Result<ContentId, PinError> {
        let bytes =
            serde_json::to_vec(proof).map_err(|e| PinError::Serialization(e.to_string()))?;
        let digest = Keccak256::digest(&bytes);
        let id = ContentId(hex::encode(digest));

        let mut pinned = self.pinned.lock().await;
        pinned.insert(id.clone(), bytes);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use ark_bn254::Fr;

    use crate::domain::keys::Keypair;
    use crate::domain::proof::PublicSignals;

    use super::*;

    fn test_proof(seed: u64) -> MembershipProof {
        let key = Keypair::generate();
        MembershipProof {
            proof: serde_json::json!({ "pi_a": [seed.to_string()] }),
            public_signals: PublicSignals::from_parts(&key.public, Fr::from(seed), PoolId(1)),
        }
    }

    #[tokio::test]
    async fn pin_returns_stable_id() {
        let pinner = InMemoryPinner::new();
        let proof = test_proof(1);

        let a = pinner.pin(PoolId(1), &proof).await.unwrap();
        let b = pinner.pin(PoolId(1), &proof).await.unwrap();

        assert_eq!(a, b);
        assert_eq!(pinner.len().await, 1);
    }

    #[tokio::test]
    async fn distinct_proofs_get_distinct_ids() {
        let pinner = InMemoryPinner::new();

        let a = pinner.pin(PoolId(1), &test_proof(1)).await.unwrap();
        let b = pinner.pin(PoolId(1), &test_proof(2)).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(pinner.len().await, 2);
    }

    #[tokio::test]
    async fn fetch_returns_pinned_bytes() {
        let pinner = InMemoryPinner::new();
        let proof = test_proof(3);

        let id = pinner.pin(PoolId(1), &proof).await.unwrap();
        let bytes = pinner.fetch(&id).await.unwrap();

        let decoded: MembershipProof = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, proof);
    }

    #[tokio::test]
    async fn fetch_unknown_id_is_none() {
        let pinner = InMemoryPinner::new();
        assert!(pinner.fetch(&ContentId("missing".into())).await.is_none());
    }
}
