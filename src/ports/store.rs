use std::future::Future;

use crate::domain::keys::PublicKey;
use crate::domain::pool::{CommitmentPool, PoolId, PoolSignature, PoolState};

/// Port for pool and membership persistence.
///
/// The store owns the duplicate check: `append_signature` must compare the
/// incoming ciphertext against every signature already held by the pool and
/// report `Duplicate` instead of inserting, atomically with the insert
/// itself, so two racing submissions of the same ciphertext can never both
/// land.
///
/// Implementations:
/// - `InMemoryPoolStore` (for PoC/testing)
pub trait PoolStore: Send + Sync {
    /// Create a new pool in the `Collecting` state and return its id.
    ///
    /// Rejects thresholds below 1 with `StoreError::InvalidThreshold`.
    fn create_pool(
        &self,
        title: String,
        threshold: u32,
        operator_pubkey: PublicKey,
    ) -> impl Future<Output = Result<PoolId, StoreError>> + Send;

    /// Fetch a pool by id, including its full signature list.
    fn get_pool(
        &self,
        pool_id: PoolId,
    ) -> impl Future<Output = Result<CommitmentPool, StoreError>> + Send;

    /// Append a signature to a pool, atomically checking for a duplicate
    /// ciphertext first. On insert, reports whether this signature moved the
    /// pool from `Collecting` to `ThresholdReached`.
    fn append_signature(
        &self,
        pool_id: PoolId,
        signature: PoolSignature,
    ) -> impl Future<Output = Result<AppendOutcome, StoreError>> + Send;

    /// Transition a pool to the `Revealed` state, returning the state it
    /// held before the call. The read-and-transition is atomic, so of two
    /// racing callers exactly one observes a non-`Revealed` prior state.
    fn mark_revealed(
        &self,
        pool_id: PoolId,
    ) -> impl Future<Output = Result<PoolState, StoreError>> + Send;

    /// Add a public key to the registered member set. Registering the same
    /// key twice is a no-op.
    fn register_member(
        &self,
        key: PublicKey,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// The ordered anonymity set: every registered member key, in
    /// registration order. Proof building and verification must see the
    /// same ordering.
    fn anonymity_set(&self) -> impl Future<Output = Result<Vec<PublicKey>, StoreError>> + Send;
}

/// Result of an atomic signature append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The signature was inserted.
    Inserted {
        /// Signature count after the insert.
        count: usize,
        /// True only when this insert moved the pool out of `Collecting`.
        threshold_crossed: bool,
    },
    /// A signature with an identical ciphertext was already present.
    Duplicate,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no pool with id: {0}")]
    PoolNotFound(PoolId),

    #[error("pool threshold must be at least 1")]
    InvalidThreshold,

    #[error("internal store error: {0}")]
    Internal(String),
}
