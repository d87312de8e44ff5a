//! Baby Jubjub in the circomlib coefficient form.
//!
//! The circuit toolchain fixes the curve as `168700·x² + y² = 1 + 168696·x²·y²`
//! over the BN254 scalar field, with `BASE8` (the base point multiplied by the
//! cofactor 8) generating the prime-order subgroup. Key derivation, ECDH, and
//! the public-key coordinates in the public signals all use this form, so the
//! arithmetic here must match it exactly; the generic `ark-ed-on-bn254` curve
//! is an isomorphic but differently-scaled form whose point operations do not
//! interoperate with these coordinates. Only its scalar field (the subgroup
//! order) is shared.

use ark_bn254::Fr;
use ark_ec::twisted_edwards::{Affine, MontCurveConfig, Projective, TECurveConfig};
use ark_ec::CurveConfig;
use ark_ff::MontFp;

/// Curve configuration for circomlib's Baby Jubjub.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BabyJubjub;

pub type EdwardsAffine = Affine<BabyJubjub>;
pub type EdwardsProjective = Projective<BabyJubjub>;

impl CurveConfig for BabyJubjub {
    /// The base field is the BN254 scalar field p.
    type BaseField = Fr;
    /// The prime-order subgroup has the same order as the generic
    /// ed-on-bn254 form, so its scalar field is reused here.
    type ScalarField = ark_ed_on_bn254::Fr;

    const COFACTOR: &'static [u64] = &[8];

    /// 8^{-1} mod the subgroup order.
    const COFACTOR_INV: Self::ScalarField =
        MontFp!("2394026564107420727433200628387514462817212225638746351800188703329891451411");
}

impl TECurveConfig for BabyJubjub {
    const COEFF_A: Fr = MontFp!("168700");
    const COEFF_D: Fr = MontFp!("168696");

    /// The circomlib `BASE8` point: generator of the prime-order subgroup.
    const GENERATOR: EdwardsAffine = EdwardsAffine::new_unchecked(
        MontFp!("5299619240641551281634865583518297030282874472190772894086521144482721001553"),
        MontFp!("16950150798460657717958625567821834550301663161624707787222815936182638968203"),
    );

    type MontCurveConfig = BabyJubjub;
}

impl MontCurveConfig for BabyJubjub {
    /// Montgomery form of the same curve: `y² = x³ + 168698·x² + x`.
    const COEFF_A: Fr = MontFp!("168698");
    const COEFF_B: Fr = MontFp!("1");

    type TECurveConfig = BabyJubjub;
}

#[cfg(test)]
mod tests {
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_ff::{Field, One};

    use super::*;

    #[test]
    fn generator_satisfies_circuit_curve_equation() {
        let g = <BabyJubjub as TECurveConfig>::GENERATOR;
        let (x2, y2) = (g.x.square(), g.y.square());
        // 168700·x² + y² == 1 + 168696·x²·y²
        let a = <BabyJubjub as TECurveConfig>::COEFF_A;
        let d = <BabyJubjub as TECurveConfig>::COEFF_D;
        assert_eq!(a * x2 + y2, Fr::one() + d * x2 * y2);
    }

    #[test]
    fn generator_is_on_curve_and_in_subgroup() {
        let g = BabyJubjub::GENERATOR;
        assert!(g.is_on_curve());
        assert!(g.is_in_correct_subgroup_assuming_on_curve());
    }

    #[test]
    fn scalar_multiples_stay_on_curve() {
        let point = BabyJubjub::GENERATOR
            .mul_bigint([1234567890u64])
            .into_affine();
        assert!(point.is_on_curve());
        assert!(point.is_in_correct_subgroup_assuming_on_curve());
    }

    #[test]
    fn scalar_multiplication_is_a_group_action() {
        let g = BabyJubjub::GENERATOR;
        let ab = g.mul_bigint([6u64]).into_affine();
        let ba = g
            .mul_bigint([2u64])
            .into_affine()
            .mul_bigint([3u64])
            .into_affine();
        assert_eq!(ab, ba);
    }
}
