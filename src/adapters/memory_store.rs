use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::Mutex;

use crate::domain::keys::PublicKey;
use crate::domain::pool::{CommitmentPool, PoolId, PoolSignature, PoolState};
use crate::ports::store::{AppendOutcome, PoolStore, StoreError};

/// In-memory implementation of `PoolStore` for PoC and testing.
///
/// A single mutex guards all pools and the member registry, so the
/// duplicate check and the insert in `append_signature` happen under one
/// lock acquisition. Two racing submissions of the same ciphertext
/// serialize on the lock and exactly one of them inserts.
pub struct InMemoryPoolStore {
    inner: Mutex<Inner>,
}

struct Inner {
    pools: HashMap<PoolId, CommitmentPool>,
    next_id: u64,
    members: Vec<PublicKey>,
}

impl InMemoryPoolStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                pools: HashMap::new(),
                next_id: 1,
                members: Vec::new(),
            }),
        }
    }
}

impl Default for InMemoryPoolStore {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl PoolStore for InMemoryPoolStore {
    async fn create_pool(
        &self,
        title: String,
        threshold: u32,
        operator_pubkey: PublicKey,
    ) -> Result<PoolId, StoreError> {
        if threshold < 1 {
            return Err(StoreError::InvalidThreshold);
        }

        let mut inner = self.inner.lock().await;
        let id = PoolId(inner.next_id);
        inner.next_id += 1;
        inner.pools.insert(
            id,
            CommitmentPool {
                id,
                title,
                threshold,
                operator_pubkey,
                state: PoolState::Collecting,
                signatures: Vec::new(),
                created_at: unix_now(),
            },
        );
        Ok(id)
    }

    async fn get_pool(&self, pool_id: PoolId) -> Result<CommitmentPool, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .pools
            .get(&pool_id)
            .cloned()
            .ok_or(StoreError::PoolNotFound(pool_id))
    }

    async fn append_signature(
        &self,
        pool_id: PoolId,
        signature: PoolSignature,
    ) -> Result<AppendOutcome, StoreError> {
        let mut inner = self.inner.lock().await;
        let pool = inner
            .pools
            .get_mut(&pool_id)
            .ok_or(StoreError::PoolNotFound(pool_id))?;

        if pool.contains_ciphertext(&signature.ciphertext) {
            return Ok(AppendOutcome::Duplicate);
        }

        pool.signatures.push(signature);
        let count = pool.signatures.len();

        let threshold_crossed =
            pool.state == PoolState::Collecting && count >= pool.threshold as usize;
        if threshold_crossed {
            pool.state = PoolState::ThresholdReached;
        }

        Ok(AppendOutcome::Inserted {
            count,
            threshold_crossed,
        })
    }

    async fn mark_revealed(&self, pool_id: PoolId) -> Result<PoolState, StoreError> {
        let mut inner = self.inner.lock().await;
        let pool = inner
            .pools
            .get_mut(&pool_id)
            .ok_or(StoreError::PoolNotFound(pool_id))?;
        let prior = pool.state;
        pool.state = PoolState::Revealed;
        Ok(prior)
    }

    async fn register_member(&self, key: PublicKey) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.members.contains(&key) {
            inner.members.push(key);
        }
        Ok(())
    }

    async fn anonymity_set(&self) -> Result<Vec<PublicKey>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.members.clone())
    }
}
