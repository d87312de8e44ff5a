//! Commitment-pool records: the append-only signature log, the threshold
//! state machine states, and the unauthenticated read view.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ciphertext::Ciphertext;
use crate::domain::keys::PublicKey;
use crate::domain::proof::MembershipProof;

/// Identifier of a commitment pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolId(pub u64);

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content identifier returned by the artifact pinning service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub String);

/// Lifecycle of a pool. Transitions only move forward:
/// `Collecting` → `ThresholdReached` → `Revealed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolState {
    Collecting,
    ThresholdReached,
    Revealed,
}

/// One accepted submission: the opaque proof, the ciphertext, and the
/// content id of the pinned proof artifact (absent when pinning and
/// bookkeeping diverged; see the coordinator's consistency policy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSignature {
    pub proof: MembershipProof,
    pub ciphertext: Ciphertext,
    pub artifact: Option<ContentId>,
}

/// A commitment pool. The signature log is append-only: nothing removes or
/// reorders entries, and duplicate ciphertexts are never inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitmentPool {
    pub id: PoolId,
    pub title: String,
    /// Minimum number of distinct signatures before reveal; always ≥ 1.
    pub threshold: u32,
    pub operator_pubkey: PublicKey,
    pub state: PoolState,
    pub signatures: Vec<PoolSignature>,
    /// Creation time, unix seconds.
    pub created_at: u64,
}

impl CommitmentPool {
    /// Whether an equal ciphertext is already present in the log.
    pub fn contains_ciphertext(&self, ciphertext: &Ciphertext) -> bool {
        self.signatures.iter().any(|s| &s.ciphertext == ciphertext)
    }

    /// The unauthenticated read view: everything except proofs and signals.
    pub fn view(&self) -> PoolView {
        PoolView {
            id: self.id,
            title: self.title.clone(),
            threshold: self.threshold,
            operator_pubkey: self.operator_pubkey,
            state: self.state,
            signatures: self.signatures.iter().map(|s| s.ciphertext.clone()).collect(),
            created_at: self.created_at,
        }
    }
}

/// What unauthenticated pool consumers see: ciphertexts only. Proofs and
/// public signals stay server-side until reveal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolView {
    pub id: PoolId,
    pub title: String,
    pub threshold: u32,
    pub operator_pubkey: PublicKey,
    pub state: PoolState,
    pub signatures: Vec<Ciphertext>,
    pub created_at: u64,
}
