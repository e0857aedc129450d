//! Curve constants in field-element form.
//!
//! Limbs are stored exactly as [`FieldElement`] holds them, so every value here
//! is usable in a multiplication without a carry pass.

use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::scalar::Scalar;

/// d = -121665 / 121666.
pub(crate) const EDWARDS_D: FieldElement = FieldElement([
    -10913629, 13857413, -15372611, 6949391, 114729, -8787816, -6275908, -3247719, -18696448,
    21499316,
]);

/// 2d.
pub(crate) const EDWARDS_D2: FieldElement = FieldElement([
    -21827239, -5839606, -30745221, 13898782, 229458, 15978800, -12551817, -6495438, 29715968,
    9444199,
]);

/// sqrt(-1) = 2^((p - 1) / 4).
pub(crate) const SQRT_M1: FieldElement = FieldElement([
    -32595792, -7943725, 9377950, 3500415, 12389472, -272473, -25146209, -2005654, 326686,
    11406482,
]);

/// -A for the Montgomery form coefficient A = 486662.
pub(crate) const MONTGOMERY_A_NEG: FieldElement =
    FieldElement([-486662, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

/// -A^2.
pub(crate) const MONTGOMERY_A_NEG_SQUARED: FieldElement =
    FieldElement([-12721188, -3529, 0, 0, 0, 0, 0, 0, 0, 0]);

/// sqrt(-2A(A + 2)).
pub(crate) const FFFB1: FieldElement = FieldElement([
    31702527, 2466483, 26106795, 12203692, 12169197, 321052, -14850977, 10296299, 16929438,
    407568,
]);

/// sqrt(2A(A + 2)).
pub(crate) const FFFB2: FieldElement = FieldElement([
    -8166131, 6741800, 17040804, -3154616, -21461005, -1466302, 30876704, 6368709, -10503587,
    13363080,
]);

/// sqrt(-sqrt(-1) A(A + 2)).
pub(crate) const FFFB3: FieldElement = FieldElement([
    -13620122, 14639558, 4532995, 7679154, 16815101, -15883539, -22863840, -14813421, 13716513,
    27076676,
]);

/// sqrt(sqrt(-1) A(A + 2)).
pub(crate) const FFFB4: FieldElement = FieldElement([
    21786215, 12173074, -21573800, -4524538, 4645904, -16204591, -8012863, 8444712, -3212926,
    26669108,
]);

/// The basepoint B, the point with y = 4/5 and positive x.
pub const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement([
        -14297830, -7645148, 16144683, -16471763, 27570974, -2696100, -26142465, 8378389,
        20764389, 8758491,
    ]),
    Y: FieldElement([
        -26843560, -6710886, 13421773, -13421773, 26843546, 6710886, -13421773, 13421773,
        -26843546, 26843546,
    ]),
    Z: FieldElement::ONE,
    T: FieldElement([
        28827043, -6116119, -27349572, 244363, 8635006, 11264893, 19351346, 13413597, 16611511,
        27139452,
    ]),
};

/// Compressed encoding of [`ED25519_BASEPOINT_POINT`].
pub const ED25519_BASEPOINT_COMPRESSED: [u8; 32] = [
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66,
];

/// The prime subgroup order L. Not a canonical scalar; only used as a
/// multiplier in the subgroup check.
pub(crate) const BASEPOINT_ORDER: Scalar = Scalar([
    237, 211, 245, 92, 26, 99, 18, 88, 214, 156, 247, 162, 222, 249, 222, 20, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 16,
]);

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn modulus() -> BigUint {
        (BigUint::from(1u8) << 255u32) - BigUint::from(19u8)
    }

    fn to_big(fe: &FieldElement) -> BigUint {
        BigUint::from_bytes_le(&fe.to_bytes())
    }

    #[test]
    fn test_d_constants() {
        let p = modulus();
        let d = to_big(&EDWARDS_D);
        let expected = (&p - BigUint::from(121665u32))
            * BigUint::from(121666u32).modpow(&(&p - BigUint::from(2u8)), &p)
            % &p;
        assert_eq!(d, expected);
        assert_eq!(to_big(&EDWARDS_D2), (BigUint::from(2u8) * d) % &p);
    }

    #[test]
    fn test_sqrt_m1() {
        assert_eq!(SQRT_M1.square(), -FieldElement::ONE);
    }

    #[test]
    fn test_montgomery_a() {
        let a = FieldElement([486662, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(MONTGOMERY_A_NEG, -a);
        assert_eq!(MONTGOMERY_A_NEG_SQUARED, -a.square());
    }

    #[test]
    fn test_hash_to_point_roots() {
        let a = FieldElement([486662, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let two = FieldElement([2, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let a_a2 = a * (a + two);

        assert_eq!(FFFB1.square(), -(two * a_a2));
        assert_eq!(FFFB2.square(), two * a_a2);
        assert_eq!(FFFB3.square(), -(SQRT_M1 * a_a2));
        assert_eq!(FFFB4.square(), SQRT_M1 * a_a2);
    }

    #[test]
    fn test_basepoint() {
        let b = ED25519_BASEPOINT_POINT;
        assert_eq!(b.compress(), ED25519_BASEPOINT_COMPRESSED);
        assert_eq!(b.X * b.Y, b.T);
        let five = FieldElement([5, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let four = FieldElement([4, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(b.Y * five, four);
    }
}
