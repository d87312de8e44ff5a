//! In-memory adapter implementations of the ports, suitable for PoC use
//! and as the backing for integration tests.

pub mod memory_pinner;
pub mod memory_store;

pub use memory_pinner::InMemoryPinner;
pub use memory_store::InMemoryPoolStore;
