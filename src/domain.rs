pub mod ciphertext;
pub mod keys;
pub mod merkle;
pub mod pool;
pub mod proof;
pub mod witness;
