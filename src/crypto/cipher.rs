//! Stream cipher over field-element sequences, keyed by an ECDH shared key.
//!
//! The keystream is MiMC7: `ciphertext[i] = plaintext[i] + hash(key, iv + i)`
//! with the iv derived from the plaintext itself. All additions and
//! subtractions reduce mod p, so `decrypt(encrypt(p, k), k) == p` holds
//! unconditionally.

use ark_bn254::Fr;
use ark_ff::Zero;

use crate::crypto::mimc::Mimc7;
use crate::domain::ciphertext::Ciphertext;
use crate::domain::keys::SharedKey;

/// Encrypt a plaintext sequence under a shared key.
///
/// `iv = multi_hash(plaintext, 0)`; one keystream element per plaintext
/// element, so `data.len() == plaintext.len()`.
pub fn encrypt(mimc: &Mimc7, plaintext: &[Fr], key: &SharedKey) -> Ciphertext {
    let iv = mimc.multi_hash(plaintext, Fr::zero());
    let data = plaintext
        .iter()
        .enumerate()
        .map(|(i, e)| *e + mimc.hash(key.0, iv + Fr::from(i as u64)))
        .collect();
    Ciphertext { iv, data }
}

/// Decrypt a ciphertext under a shared key by subtracting the keystream.
pub fn decrypt(mimc: &Mimc7, ciphertext: &Ciphertext, key: &SharedKey) -> Vec<Fr> {
    ciphertext
        .data
        .iter()
        .enumerate()
        .map(|(i, e)| *e - mimc.hash(key.0, ciphertext.iv + Fr::from(i as u64)))
        .collect()
}
