//! Addend forms for the unified Edwards addition law.
//!
//! [`CachedPoint`] keeps (Y + X, Y - X, Z, 2dT) for an arbitrary point;
//! [`PrecomputedPoint`] keeps (y + x, y - x, 2dxy) for an affine one, which
//! saves a multiplication per addition and is what the static tables hold.

use core::ops::{Add, Neg, Sub};

use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::projective::CompletedPoint;

#[derive(Copy, Clone, Debug)]
pub struct CachedPoint {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t2d: FieldElement,
}

#[derive(Copy, Clone, Debug)]
pub struct PrecomputedPoint {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) xy2d: FieldElement,
}

impl CachedPoint {
    pub const IDENTITY: Self = CachedPoint {
        y_plus_x: FieldElement::ONE,
        y_minus_x: FieldElement::ONE,
        z: FieldElement::ONE,
        t2d: FieldElement::ZERO,
    };

    /// Takes `other` when `choice == 1`.
    pub fn conditional_move(&mut self, other: &Self, choice: u8) {
        self.y_plus_x.conditional_move(&other.y_plus_x, choice);
        self.y_minus_x.conditional_move(&other.y_minus_x, choice);
        self.z.conditional_move(&other.z, choice);
        self.t2d.conditional_move(&other.t2d, choice);
    }
}

impl PrecomputedPoint {
    pub const IDENTITY: Self = PrecomputedPoint {
        y_plus_x: FieldElement::ONE,
        y_minus_x: FieldElement::ONE,
        xy2d: FieldElement::ZERO,
    };

    /// Takes `other` when `choice == 1`.
    pub fn conditional_move(&mut self, other: &Self, choice: u8) {
        self.y_plus_x.conditional_move(&other.y_plus_x, choice);
        self.y_minus_x.conditional_move(&other.y_minus_x, choice);
        self.xy2d.conditional_move(&other.xy2d, choice);
    }
}

impl Neg for CachedPoint {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        CachedPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            z: self.z,
            t2d: -self.t2d,
        }
    }
}

impl Neg for PrecomputedPoint {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        PrecomputedPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            xy2d: -self.xy2d,
        }
    }
}

impl<'b> Add<&'b CachedPoint> for &EdwardsPoint {
    type Output = CompletedPoint;

    fn add(self, other: &'b CachedPoint) -> CompletedPoint {
        let pp = (self.Y + self.X) * other.y_plus_x;
        let mm = (self.Y - self.X) * other.y_minus_x;
        let tt2d = self.T * other.t2d;
        let zz = self.Z * other.z;
        let zz2 = zz + zz;

        CompletedPoint {
            X: pp - mm,
            Y: pp + mm,
            Z: zz2 + tt2d,
            T: zz2 - tt2d,
        }
    }
}

impl<'b> Sub<&'b CachedPoint> for &EdwardsPoint {
    type Output = CompletedPoint;

    fn sub(self, other: &'b CachedPoint) -> CompletedPoint {
        let pm = (self.Y + self.X) * other.y_minus_x;
        let mp = (self.Y - self.X) * other.y_plus_x;
        let tt2d = self.T * other.t2d;
        let zz = self.Z * other.z;
        let zz2 = zz + zz;

        CompletedPoint {
            X: pm - mp,
            Y: pm + mp,
            Z: zz2 - tt2d,
            T: zz2 + tt2d,
        }
    }
}

impl<'b> Add<&'b PrecomputedPoint> for &EdwardsPoint {
    type Output = CompletedPoint;

    fn add(self, other: &'b PrecomputedPoint) -> CompletedPoint {
        let pp = (self.Y + self.X) * other.y_plus_x;
        let mm = (self.Y - self.X) * other.y_minus_x;
        let txy2d = self.T * other.xy2d;
        let z2 = self.Z + self.Z;

        CompletedPoint {
            X: pp - mm,
            Y: pp + mm,
            Z: z2 + txy2d,
            T: z2 - txy2d,
        }
    }
}

impl<'b> Sub<&'b PrecomputedPoint> for &EdwardsPoint {
    type Output = CompletedPoint;

    fn sub(self, other: &'b PrecomputedPoint) -> CompletedPoint {
        let pm = (self.Y + self.X) * other.y_minus_x;
        let mp = (self.Y - self.X) * other.y_plus_x;
        let txy2d = self.T * other.xy2d;
        let z2 = self.Z + self.Z;

        CompletedPoint {
            X: pm - mp,
            Y: pm + mp,
            Z: z2 - txy2d,
            T: z2 + txy2d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator_table::{BASEPOINT_ODD_MULTIPLES, BASEPOINT_TABLE};
    use crate::scalar::Scalar;

    #[test]
    fn test_mixed_addition_matches_full_addition() {
        let p = EdwardsPoint::mul_base(&Scalar::from(99u64));
        let b = EdwardsPoint::basepoint();

        let mixed = (&p + &BASEPOINT_TABLE[0][0]).to_extended();
        let full = (&p + &b.to_cached()).to_extended();
        assert_eq!(mixed, full);
        assert_eq!(mixed, EdwardsPoint::mul_base(&Scalar::from(100u64)));

        let mixed = (&p - &BASEPOINT_TABLE[0][0]).to_extended();
        assert_eq!(mixed, EdwardsPoint::mul_base(&Scalar::from(98u64)));
    }

    #[test]
    fn test_tables_hold_expected_multiples() {
        let b = EdwardsPoint::basepoint();
        for (i, entry) in BASEPOINT_ODD_MULTIPLES.iter().enumerate() {
            let expected = EdwardsPoint::mul_base(&Scalar::from(2 * i as u64 + 1));
            assert_eq!((&EdwardsPoint::IDENTITY + entry).to_extended(), expected);
        }

        let mut row_base = b;
        for row in BASEPOINT_TABLE.iter().take(4) {
            let mut expected = EdwardsPoint::IDENTITY;
            for entry in row.iter() {
                expected += row_base;
                assert_eq!((&EdwardsPoint::IDENTITY + entry).to_extended(), expected);
            }
            row_base = row_base.mul_by_pow_2(8);
        }
    }

    #[test]
    fn test_negation_and_identity() {
        let p = EdwardsPoint::mul_base(&Scalar::from(7u64));
        let neg = -p.to_cached();
        assert!((&p + &neg).to_extended().is_identity());
        assert_eq!((&p + &CachedPoint::IDENTITY).to_extended(), p);
        assert_eq!((&p + &PrecomputedPoint::IDENTITY).to_extended(), p);
    }

    #[test]
    fn test_conditional_move() {
        let p = EdwardsPoint::mul_base(&Scalar::from(5u64)).to_cached();
        let mut t = CachedPoint::IDENTITY;
        t.conditional_move(&p, 0);
        let id = (&EdwardsPoint::IDENTITY + &t).to_extended();
        assert!(id.is_identity());
        t.conditional_move(&p, 1);
        let moved = (&EdwardsPoint::IDENTITY + &t).to_extended();
        assert_eq!(moved, EdwardsPoint::mul_base(&Scalar::from(5u64)));
    }
}
