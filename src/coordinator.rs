//! Pool coordinator — ties the ports together into the submit/reveal flow.
//!
//! Submission order is pin-then-record: the proof artifact is pinned to
//! content-addressed storage first, and only then is the signature appended
//! to the pool. A pinned artifact whose append later fails is harmless
//! garbage; a recorded signature without its artifact would be
//! unverifiable.

use ark_bn254::Fr;

use crate::crypto::cipher::decrypt;
use crate::crypto::mimc::Mimc7;
use crate::domain::ciphertext::Ciphertext;
use crate::domain::keys::{derive_shared_key, PrivateKey, PublicKey};
use crate::domain::pool::{PoolId, PoolSignature, PoolState, PoolView};
use crate::domain::proof::{MembershipProof, SignalsError};
use crate::ports::pinner::{ArtifactPinner, PinError};
use crate::ports::store::{AppendOutcome, PoolStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("artifact pinning failed: {0}")]
    Pin(#[from] PinError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum RevealError {
    #[error("threshold not reached: have {have} of {need} signatures")]
    ThresholdNotReached { have: usize, need: u32 },

    #[error("pool already revealed")]
    AlreadyRevealed,

    #[error("invalid public signals on stored signature: {0}")]
    Signals(#[from] SignalsError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of handling a signature submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The signature was recorded.
    Accepted {
        /// Signature count after the insert.
        count: usize,
        /// True only for the submission that crossed the threshold.
        threshold_reached: bool,
    },
    /// An identical ciphertext was already recorded; nothing changed.
    Duplicate,
}

/// Coordinates signature submission and operator reveal over a `PoolStore`
/// and an `ArtifactPinner`.
///
/// The coordinator never sees private keys during submission; decryption
/// happens only in `reveal`, where the operator supplies theirs.
pub struct PoolCoordinator<S: PoolStore, P: ArtifactPinner> {
    mimc: Mimc7,
    store: S,
    pinner: P,
}

impl<S: PoolStore, P: ArtifactPinner> PoolCoordinator<S, P> {
    pub fn new(mimc: Mimc7, store: S, pinner: P) -> Self {
        Self {
            mimc,
            store,
            pinner,
        }
    }

    /// Create a new pool and return its id.
    pub async fn create_pool(
        &self,
        title: String,
        threshold: u32,
        operator_pubkey: PublicKey,
    ) -> Result<PoolId, StoreError> {
        let id = self
            .store
            .create_pool(title, threshold, operator_pubkey)
            .await?;
        log::info!("created pool {id} (threshold {threshold})");
        Ok(id)
    }

    /// Add a public key to the anonymity set.
    pub async fn register_member(&self, key: PublicKey) -> Result<(), StoreError> {
        self.store.register_member(key).await
    }

    /// The ordered anonymity set.
    pub async fn anonymity_set(&self) -> Result<Vec<PublicKey>, StoreError> {
        self.store.anonymity_set().await
    }

    /// The participant-facing view of a pool: ciphertexts only, no proofs
    /// or public signals.
    pub async fn get_pool(&self, pool_id: PoolId) -> Result<PoolView, StoreError> {
        Ok(self.store.get_pool(pool_id).await?.view())
    }

    /// Handle an anonymous signature submission.
    ///
    /// Pins the proof artifact, then atomically appends the signature with
    /// the store's duplicate check. A duplicate ciphertext leaves the pool
    /// untouched and reports `Duplicate`.
    pub async fn submit_signature(
        &self,
        pool_id: PoolId,
        proof: MembershipProof,
        ciphertext: Ciphertext,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let artifact = self.pinner.pin(pool_id, &proof).await?;

        let signature = PoolSignature {
            proof,
            ciphertext,
            artifact: Some(artifact),
        };

        match self.store.append_signature(pool_id, signature).await? {
            AppendOutcome::Inserted {
                count,
                threshold_crossed,
            } => {
                if threshold_crossed {
                    log::info!("pool {pool_id} reached its threshold at {count} signatures");
                }
                Ok(SubmissionOutcome::Accepted {
                    count,
                    threshold_reached: threshold_crossed,
                })
            }
            AppendOutcome::Duplicate => {
                log::debug!("pool {pool_id}: duplicate ciphertext rejected");
                Ok(SubmissionOutcome::Duplicate)
            }
        }
    }

    /// Operator reveal: decrypt every recorded signature.
    ///
    /// Requires the pool to be in `ThresholdReached`. For each signature the
    /// signer's public key is read back from the proof's public signals, the
    /// shared key re-derived with the operator's private key, and the
    /// ciphertext decrypted. Decryption runs over a snapshot of the signature
    /// list; submissions landing after the snapshot appear in later reveals
    /// only. The terminal transition is claimed through the store's atomic
    /// `mark_revealed`, so of two racing reveals exactly one returns the
    /// plaintexts and the other `AlreadyRevealed`.
    pub async fn reveal(
        &self,
        pool_id: PoolId,
        operator_key: &PrivateKey,
    ) -> Result<Vec<Vec<Fr>>, RevealError> {
        let pool = self.store.get_pool(pool_id).await?;

        match pool.state {
            PoolState::Collecting => {
                return Err(RevealError::ThresholdNotReached {
                    have: pool.signatures.len(),
                    need: pool.threshold,
                });
            }
            PoolState::Revealed => return Err(RevealError::AlreadyRevealed),
            PoolState::ThresholdReached => {}
        }

        let mut plaintexts = Vec::with_capacity(pool.signatures.len());
        for signature in &pool.signatures {
            let signer = signature.proof.public_signals.signer_public_key()?;
            let shared = derive_shared_key(operator_key, &signer);
            plaintexts.push(decrypt(&self.mimc, &signature.ciphertext, &shared));
        }

        if self.store.mark_revealed(pool_id).await? == PoolState::Revealed {
            return Err(RevealError::AlreadyRevealed);
        }
        log::info!(
            "pool {pool_id} revealed: {} signatures decrypted",
            plaintexts.len()
        );
        Ok(plaintexts)
    }
}
