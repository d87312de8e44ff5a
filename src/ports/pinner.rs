use std::future::Future;

use crate::domain::pool::{ContentId, PoolId};
use crate::domain::proof::MembershipProof;

/// Port for pinning proof artifacts to content-addressed storage.
///
/// Pinning happens **before** the signature is recorded: a stored signature
/// without its artifact would be unverifiable later, while a pinned artifact
/// without a stored signature is harmless garbage.
///
/// Implementations:
/// - `InMemoryPinner` (for PoC/testing)
/// - IPFS pinning service client
pub trait ArtifactPinner: Send + Sync {
    /// Pin the serialized proof for a pool, returning a stable content id.
    /// Pinning the same proof twice must return the same id.
    fn pin(
        &self,
        pool_id: PoolId,
        proof: &MembershipProof,
    ) -> impl Future<Output = Result<ContentId, PinError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum PinError {
    #[error("artifact serialization failed: {0}")]
    Serialization(String),

    #[error("pinning service unavailable: {0}")]
    Unavailable(String),

    #[error("pinning timed out")]
    Timeout,
}
