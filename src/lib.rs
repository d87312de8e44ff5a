//! Core library for anonymous threshold attestation pools.
//!
//! A bounded set of participants ("signers") attests to membership in a group
//! by encrypting a message to a pool operator and proving, in zero knowledge,
//! knowledge of a private key behind one of a known set of public keys. The
//! encrypted submissions accumulate in a commitment pool; once a threshold is
//! reached the operator decrypts them all in one reveal step.
//!
//! The crate provides the cryptographic layer (Baby Jubjub key management,
//! ECDH, a MiMC7 stream cipher, Merkle proof-input assembly) and the pool
//! state machine. Proving, persistence, and artifact pinning are ports
//! implemented by external collaborators; in-memory adapters are provided
//! for tests and local runs.

pub mod adapters;
pub mod coordinator;
pub mod crypto;
pub mod domain;
pub mod ports;
