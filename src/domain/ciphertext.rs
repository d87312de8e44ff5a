//! Ciphertext value type produced by the MiMC7 stream cipher.

use ark_bn254::Fr;
use serde::{Deserialize, Serialize};

use crate::crypto::field::{fr_dec, fr_dec_vec};

/// An encrypted field-element sequence.
///
/// Equality over the whole value is the identity used for duplicate
/// detection inside a pool: two submissions with equal ciphertexts come from
/// the same (signer, message, operator) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    /// Initialization vector, derived deterministically from the plaintext.
    #[serde(with = "fr_dec")]
    pub iv: Fr,
    /// One encrypted element per plaintext element.
    #[serde(with = "fr_dec_vec")]
    pub data: Vec<Fr>,
}

impl Ciphertext {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let ciphertext = Ciphertext {
            iv: Fr::from(10u64),
            data: vec![Fr::from(1u64), Fr::from(2u64)],
        };
        let json = serde_json::to_string(&ciphertext).unwrap();
        let recovered: Ciphertext = serde_json::from_str(&json).unwrap();
        assert_eq!(ciphertext, recovered);
    }

    #[test]
    fn equality_is_elementwise() {
        let a = Ciphertext {
            iv: Fr::from(10u64),
            data: vec![Fr::from(1u64)],
        };
        let mut b = a.clone();
        assert_eq!(a, b);
        b.data[0] = Fr::from(2u64);
        assert_ne!(a, b);
    }
}
