//! Projective (X:Y:Z) and completed ((X:Z), (Y:T)) point forms.
//!
//! A [`CompletedPoint`] is what additions and doublings produce; converting it
//! to projective costs three multiplications and to extended costs four.
//! Chains of doublings stay in projective form and skip the T coordinate.

use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;

/// Point with x = X/Z, y = Y/Z.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Debug)]
pub struct ProjectivePoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
}

/// Point with x = X/Z, y = Y/T.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Debug)]
pub struct CompletedPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl ProjectivePoint {
    pub const IDENTITY: Self = ProjectivePoint {
        X: FieldElement::ZERO,
        Y: FieldElement::ONE,
        Z: FieldElement::ONE,
    };

    /// 2 * self.
    pub fn double(&self) -> CompletedPoint {
        let xx = self.X.square();
        let yy = self.Y.square();
        let zz2 = self.Z.square2();
        let x_plus_y_sq = (self.X + self.Y).square();

        let y = yy + xx;
        let z = yy - xx;
        CompletedPoint {
            X: x_plus_y_sq - y,
            Y: y,
            Z: z,
            T: zz2 - z,
        }
    }

    pub fn compress(&self) -> [u8; 32] {
        let recip = self.Z.invert();
        let x = self.X * recip;
        let y = self.Y * recip;

        let mut bytes = y.to_bytes();
        bytes[31] ^= u8::from(x.is_negative()) << 7;
        bytes
    }

    /// X == 0 and Y == Z. Both conditions are required.
    pub fn is_identity(&self) -> bool {
        self.X.is_zero() && self.Y == self.Z
    }
}

impl CompletedPoint {
    #[inline]
    pub fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X * self.T,
            Y: self.Y * self.Z,
            Z: self.Z * self.T,
        }
    }

    #[inline]
    pub fn to_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: self.X * self.T,
            Y: self.Y * self.Z,
            Z: self.Z * self.T,
            T: self.X * self.Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::Scalar;

    #[test]
    fn test_identity() {
        assert!(ProjectivePoint::IDENTITY.is_identity());
        assert!(ProjectivePoint::IDENTITY.double().to_projective().is_identity());

        // Scaled coordinates still denote the identity.
        let two = FieldElement::ONE + FieldElement::ONE;
        let scaled = ProjectivePoint {
            X: FieldElement::ZERO,
            Y: two,
            Z: two,
        };
        assert!(scaled.is_identity());

        // (0, -1) is not the identity even though X == 0.
        let order_two = ProjectivePoint {
            X: FieldElement::ZERO,
            Y: -FieldElement::ONE,
            Z: FieldElement::ONE,
        };
        assert!(!order_two.is_identity());
    }

    #[test]
    fn test_doubling_chain_matches_extended() {
        let p = EdwardsPoint::mul_base(&Scalar::from(1234567u64));
        let via_projective = p.to_projective().double().to_projective().double();
        let via_extended = p.double().double();
        assert_eq!(via_projective.to_extended(), via_extended);
        assert_eq!(
            via_projective.to_projective().compress(),
            via_extended.compress()
        );
    }
}
