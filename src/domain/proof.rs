//! Opaque prover output: the membership proof and its public signals.
//!
//! Both are produced by the external proving collaborator and stored
//! verbatim. The public-signal layout is positional: entries 0 and 1 are the
//! signer public key coordinates (needed by the operator at reveal), entry 2
//! is the anonymity-set Merkle root, entry 3 the pool identifier. Pool reads
//! never expose the signals to unauthenticated callers, so signer identity
//! stays hidden until the reveal step.

use ark_bn254::Fr;
use serde::{Deserialize, Serialize};

use crate::crypto::field::{fr_from_decimal, fr_to_decimal};
use crate::domain::keys::{KeyError, PublicKey};
use crate::domain::pool::PoolId;

/// Errors raised when interpreting public signals at reveal time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalsError {
    #[error("expected at least {expected} public signals, got {actual}")]
    TooFewSignals { expected: usize, actual: usize },
    #[error("public signal is not a field element: {0}")]
    InvalidFieldElement(String),
    #[error(transparent)]
    Key(#[from] KeyError),
}

/// The public signals emitted by the membership circuit, as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicSignals(pub Vec<String>);

impl PublicSignals {
    /// Minimum number of signals: signer key x/y, Merkle root, pool id.
    pub const MIN_SIGNALS: usize = 4;

    pub fn new(signals: Vec<String>) -> Self {
        Self(signals)
    }

    /// Compose the positional layout from its parts. Used by provers (and
    /// tests standing in for one) when emitting signals.
    pub fn from_parts(signer: &PublicKey, merkle_root: Fr, pool_id: PoolId) -> Self {
        Self(vec![
            fr_to_decimal(&signer.x()),
            fr_to_decimal(&signer.y()),
            fr_to_decimal(&merkle_root),
            pool_id.0.to_string(),
        ])
    }

    /// Recover the signer public key from positions 0 and 1, validating that
    /// the coordinates are in range and on the curve.
    pub fn signer_public_key(&self) -> Result<PublicKey, SignalsError> {
        if self.0.len() < Self::MIN_SIGNALS {
            return Err(SignalsError::TooFewSignals {
                expected: Self::MIN_SIGNALS,
                actual: self.0.len(),
            });
        }
        let x = fr_from_decimal(&self.0[0])
            .ok_or_else(|| SignalsError::InvalidFieldElement(self.0[0].clone()))?;
        let y = fr_from_decimal(&self.0[1])
            .ok_or_else(|| SignalsError::InvalidFieldElement(self.0[1].clone()))?;
        Ok(PublicKey::from_coordinates(x, y)?)
    }

    /// The anonymity-set Merkle root the proof was generated against.
    pub fn merkle_root(&self) -> Result<Fr, SignalsError> {
        if self.0.len() < Self::MIN_SIGNALS {
            return Err(SignalsError::TooFewSignals {
                expected: Self::MIN_SIGNALS,
                actual: self.0.len(),
            });
        }
        fr_from_decimal(&self.0[2])
            .ok_or_else(|| SignalsError::InvalidFieldElement(self.0[2].clone()))
    }
}

/// A zero-knowledge membership proof together with its public signals,
/// stored exactly as the prover returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipProof {
    /// Serialized proof object; this crate never inspects it.
    pub proof: serde_json::Value,
    pub public_signals: PublicSignals,
}
