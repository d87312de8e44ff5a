//! Key management over the Baby Jubjub curve.
//!
//! Private keys are unbiased scalars below the BN254 field modulus; public
//! keys are Baby Jubjub points obtained by multiplying the circomlib `BASE8`
//! subgroup generator with an EdDSA-style clamped scalar derived from the
//! private key. The same clamping feeds the ECDH shared-key derivation, so
//! signer and operator reproduce the derivation bit for bit.

use ark_bn254::Fr;
use ark_ec::twisted_edwards::TECurveConfig;
use ark_ec::{AffineRepr, CurveGroup};
use num_bigint::BigUint;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512};

use crate::crypto::curve::{BabyJubjub, EdwardsAffine};
use crate::crypto::field::{
    fr_dec, fr_from_biguint, fr_from_decimal, fr_to_bytes, fr_to_decimal, modulus,
};

/// The `BASE8` point: generator of the prime-order subgroup used for key
/// derivation and ECDH.
pub const BASE8: EdwardsAffine = BabyJubjub::GENERATOR;

/// Rejection threshold for unbiased key generation: `(2^256 - p) mod p`.
/// Draws below this value are rejected so that reducing the accepted draw
/// mod p carries no modulo bias (the arc4random_uniform technique).
const REJECTION_THRESHOLD_DEC: &str =
    "6350874878119819312338956282401532410528162663560392320966563075034087161851";

/// Errors raised by key construction and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("key value is not strictly below the field modulus")]
    InvalidKeyRange,
    #[error("coordinates are not a valid curve point in the prime-order subgroup")]
    PointNotOnCurve,
}

/// A private key: a field element, generated without modulo bias.
///
/// Never transmitted to the pool backend; it leaves the owner's local store
/// only as the clamped scalar inside a circuit witness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey(#[serde(with = "fr_dec")] Fr);

impl PrivateKey {
    /// Generate a random private key.
    ///
    /// Draws a uniform 256-bit value, redraws while it falls below the
    /// rejection threshold, then reduces the accepted draw mod p. A naive
    /// `random mod p` is measurably biased; this two-step procedure is not.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let min = BigUint::parse_bytes(REJECTION_THRESHOLD_DEC.as_bytes(), 10)
            .expect("rejection threshold constant is valid decimal");
        let p = modulus();

        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            let draw = BigUint::from_bytes_be(&bytes);
            if draw >= min {
                return Self(fr_from_biguint(&(draw % p)));
            }
        }
    }

    /// Construct from a 32-byte big-endian buffer.
    /// Fails with [`KeyError::InvalidKeyRange`] when the value is ≥ p.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, KeyError> {
        let value = BigUint::from_bytes_be(bytes);
        if value >= modulus() {
            return Err(KeyError::InvalidKeyRange);
        }
        Ok(Self(fr_from_biguint(&value)))
    }

    /// Construct from a decimal string, range-checked against p.
    pub fn from_decimal(s: &str) -> Result<Self, KeyError> {
        fr_from_decimal(s).map(Self).ok_or(KeyError::InvalidKeyRange)
    }

    /// The underlying field element.
    pub fn as_fr(&self) -> &Fr {
        &self.0
    }

    /// Fixed-width big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        fr_to_bytes(&self.0)
    }

    /// Derive the public key: `BASE8 · clamped_scalar`.
    ///
    /// Deterministic; both signer and operator sides must reproduce this
    /// identically for ECDH to agree.
    pub fn public_key(&self) -> PublicKey {
        let point = BASE8
            .mul_bigint(self.clamped_scalar().to_u64_digits())
            .into_affine();
        PublicKey(point)
    }

    /// The clamped scalar as a field element, in the form the membership
    /// circuit takes as its private-key input.
    pub fn format_for_circuit(&self) -> Fr {
        fr_from_biguint(&self.clamped_scalar())
    }

    /// EdDSA-style key clamping: SHA-512 of the serialized key, first 32
    /// bytes, clear the low 3 bits and the top bit, set bit 254, interpret
    /// little-endian, shift right by 3 to land in the scalar subgroup.
    fn clamped_scalar(&self) -> BigUint {
        let digest = Sha512::digest(self.to_bytes());
        let mut buf = [0u8; 32];
        buf.copy_from_slice(&digest[..32]);
        buf[0] &= 0xF8;
        buf[31] &= 0x7F;
        buf[31] |= 0x40;
        BigUint::from_bytes_le(&buf) >> 3
    }
}

/// A public key: a Baby Jubjub point, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(EdwardsAffine);

impl PublicKey {
    /// Construct from affine coordinates, checking the curve equation and
    /// prime-order subgroup membership.
    pub fn from_coordinates(x: Fr, y: Fr) -> Result<Self, KeyError> {
        let point = EdwardsAffine::new_unchecked(x, y);
        if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(KeyError::PointNotOnCurve);
        }
        Ok(Self(point))
    }

    pub fn x(&self) -> Fr {
        self.0.x
    }

    pub fn y(&self) -> Fr {
        self.0.y
    }

    /// Fixed-width encoding: x ‖ y, each 32 bytes big-endian.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&fr_to_bytes(&self.0.x));
        out[32..].copy_from_slice(&fr_to_bytes(&self.0.y));
        out
    }

    /// Decode the 64-byte encoding, validating range and curve membership.
    pub fn from_bytes(bytes: &[u8; 64]) -> Result<Self, KeyError> {
        let (x_bytes, y_bytes) = bytes.split_at(32);
        let p = modulus();
        let x = BigUint::from_bytes_be(x_bytes);
        let y = BigUint::from_bytes_be(y_bytes);
        if x >= p || y >= p {
            return Err(KeyError::InvalidKeyRange);
        }
        Self::from_coordinates(fr_from_biguint(&x), fr_from_biguint(&y))
    }

    pub(crate) fn point(&self) -> &EdwardsAffine {
        &self.0
    }
}

#[derive(Serialize, Deserialize)]
struct PublicKeyRepr {
    x: String,
    y: String,
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PublicKeyRepr {
            x: fr_to_decimal(&self.x()),
            y: fr_to_decimal(&self.y()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = PublicKeyRepr::deserialize(deserializer)?;
        let x = fr_from_decimal(&repr.x)
            .ok_or_else(|| serde::de::Error::custom("x is not a field element"))?;
        let y = fr_from_decimal(&repr.y)
            .ok_or_else(|| serde::de::Error::custom("y is not a field element"))?;
        PublicKey::from_coordinates(x, y).map_err(serde::de::Error::custom)
    }
}

/// A private/public key pair owned by one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keypair {
    pub private: PrivateKey,
    pub public: PublicKey,
}

impl Keypair {
    /// Generate a fresh key pair.
    pub fn generate() -> Self {
        let private = PrivateKey::random();
        let public = private.public_key();
        Self { private, public }
    }
}

/// An ECDH shared secret: the x-coordinate of a counterpart public key
/// multiplied by the clamped private scalar. Symmetric between the parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedKey(#[serde(with = "fr_dec")] pub Fr);

/// Derive the ECDH shared key between a private key and a counterpart
/// public key: `shared = (pub · clamped_scalar(priv)).x`.
pub fn derive_shared_key(private: &PrivateKey, public: &PublicKey) -> SharedKey {
    let point = public
        .point()
        .mul_bigint(private.clamped_scalar().to_u64_digits())
        .into_affine();
    SharedKey(point.x)
}
