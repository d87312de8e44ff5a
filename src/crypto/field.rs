//! Conversions between BN254 scalar field elements and their external
//! representations: fixed-width 32-byte big-endian buffers and decimal
//! strings (the snarkjs `publicSignals` convention).

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;

/// The field modulus p as a decimal string.
pub const MODULUS_DEC: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// The field modulus p as a big integer.
pub fn modulus() -> BigUint {
    BigUint::parse_bytes(MODULUS_DEC.as_bytes(), 10).expect("modulus constant is valid decimal")
}

/// Serialize a field element to a fixed-width big-endian buffer, zero-padded.
pub fn fr_to_bytes(value: &Fr) -> [u8; 32] {
    let bytes = value.into_bigint().to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// Parse a 32-byte big-endian buffer, reducing mod p.
pub fn fr_from_bytes(bytes: &[u8; 32]) -> Fr {
    Fr::from_be_bytes_mod_order(bytes)
}

/// Convert a field element to its canonical big integer.
pub fn fr_to_biguint(value: &Fr) -> BigUint {
    BigUint::from_bytes_be(&value.into_bigint().to_bytes_be())
}

/// Convert a big integer to a field element, reducing mod p.
pub fn fr_from_biguint(value: &BigUint) -> Fr {
    Fr::from_le_bytes_mod_order(&value.to_bytes_le())
}

/// Render a field element as a decimal string.
pub fn fr_to_decimal(value: &Fr) -> String {
    fr_to_biguint(value).to_str_radix(10)
}

/// Parse a decimal string into a field element.
///
/// Returns `None` when the string is not a decimal number or the value is
/// not strictly below the field modulus. Out-of-range values are rejected
/// rather than reduced, so callers see malformed inputs instead of silently
/// aliased ones.
pub fn fr_from_decimal(s: &str) -> Option<Fr> {
    let n = BigUint::parse_bytes(s.as_bytes(), 10)?;
    if n >= modulus() {
        return None;
    }
    Some(fr_from_biguint(&n))
}

/// Serde helpers for a single field element as a decimal string.
pub mod fr_dec {
    use ark_bn254::Fr;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{fr_from_decimal, fr_to_decimal};

    pub fn serialize<S>(value: &Fr, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&fr_to_decimal(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        fr_from_decimal(&s)
            .ok_or_else(|| serde::de::Error::custom("not a field element below the modulus"))
    }
}

/// Serde helpers for a sequence of field elements as decimal strings.
pub mod fr_dec_vec {
    use ark_bn254::Fr;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde::ser::SerializeSeq;

    use super::{fr_from_decimal, fr_to_decimal};

    pub fn serialize<S>(values: &[Fr], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&fr_to_decimal(value))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Fr>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let strings: Vec<String> = Deserialize::deserialize(deserializer)?;
        strings
            .iter()
            .map(|s| {
                fr_from_decimal(s).ok_or_else(|| {
                    serde::de::Error::custom("not a field element below the modulus")
                })
            })
            .collect()
    }
}
