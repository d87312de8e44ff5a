//! Ports (trait boundaries) between the pool coordinator and the outside
//! world: proof generation, pool persistence, and artifact pinning.

pub mod pinner;
pub mod prover;
pub mod store;

pub use pinner::{ArtifactPinner, PinError};
pub use prover::{Prover, ProverError};
pub use store::{AppendOutcome, PoolStore, StoreError};
