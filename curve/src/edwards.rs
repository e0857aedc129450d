//! Points on the twisted Edwards curve -x^2 + y^2 = 1 + d x^2 y^2.
//!
//! [`EdwardsPoint`] uses extended coordinates (X:Y:Z:T) with x = X/Z, y = Y/Z
//! and xy = T/Z. It is the representation every other form converts back to;
//! see `projective.rs` and `cached.rs` for the intermediate ones.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::cached::CachedPoint;
use crate::constants::{ED25519_BASEPOINT_POINT, EDWARDS_D, EDWARDS_D2, SQRT_M1};
use crate::errors::DecompressionError;
use crate::field::FieldElement;
use crate::msm::OddMultiples;
use crate::projective::ProjectivePoint;
use crate::scalar::Scalar;

/// Curve point in extended coordinates.
#[allow(non_snake_case)]
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl EdwardsPoint {
    /// The neutral element (0, 1).
    pub const IDENTITY: Self = EdwardsPoint {
        X: FieldElement::ZERO,
        Y: FieldElement::ONE,
        Z: FieldElement::ONE,
        T: FieldElement::ZERO,
    };

    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// The standard generator B.
    #[inline]
    pub fn basepoint() -> Self {
        ED25519_BASEPOINT_POINT
    }

    /// Decodes a compressed point: y in the low 255 bits, sign of x in bit 255.
    ///
    /// Rejects y >= p and encodings with no matching x, including "negative
    /// zero" (x = 0 with the sign bit set). The result is on the curve but may
    /// carry a small-order component; see [`EdwardsPoint::is_torsion_free`].
    pub fn decompress(bytes: &[u8; 32]) -> Result<Self, DecompressionError> {
        let mut y_bytes = *bytes;
        y_bytes[31] &= 0x7f;

        let y = FieldElement::from_bytes(&y_bytes);
        if y.to_bytes() != y_bytes {
            return Err(DecompressionError::NonCanonical);
        }

        let yy = y.square();
        let u = yy - FieldElement::ONE;
        let v = yy * EDWARDS_D + FieldElement::ONE;
        let mut x = FieldElement::div_pow_m1(&u, &v);

        let vxx = x.square() * v;
        if vxx != u {
            if vxx != -u {
                return Err(DecompressionError::NotOnCurve);
            }
            x *= SQRT_M1;
        }

        let sign = bytes[31] >> 7 == 1;
        if x.is_negative() != sign {
            if x.is_zero() {
                return Err(DecompressionError::NotOnCurve);
            }
            x = -x;
        }

        Ok(EdwardsPoint {
            X: x,
            Y: y,
            Z: FieldElement::ONE,
            T: x * y,
        })
    }

    /// Canonical 32-byte encoding.
    pub fn compress(&self) -> [u8; 32] {
        self.to_projective().compress()
    }

    #[inline]
    pub fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// (Y + X, Y - X, Z, 2dT), the addend form for full additions.
    #[inline]
    pub fn to_cached(&self) -> CachedPoint {
        CachedPoint {
            y_plus_x: self.Y + self.X,
            y_minus_x: self.Y - self.X,
            z: self.Z,
            t2d: self.T * EDWARDS_D2,
        }
    }

    pub fn double(&self) -> Self {
        self.to_projective().double().to_extended()
    }

    /// 2^k * self through k projective doublings, k >= 1.
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> Self {
        debug_assert!(k > 0);
        let mut s = self.to_projective();
        for _ in 1..k {
            s = s.double().to_projective();
        }
        s.double().to_extended()
    }

    /// 8 * self, which clears any small-order component.
    pub fn mul_by_cofactor(&self) -> Self {
        self.mul_by_pow_2(3)
    }

    /// True iff X == 0 and Y == Z.
    pub fn is_identity(&self) -> bool {
        self.to_projective().is_identity()
    }

    /// True iff L * self is the identity, i.e. self lies in the prime-order
    /// subgroup. Variable time.
    pub fn is_torsion_free(&self) -> bool {
        OddMultiples::new(self).is_torsion_free()
    }

    /// Checks -x^2 + y^2 = 1 + d x^2 y^2 in projective form, along with
    /// XY = ZT.
    pub fn is_on_curve(&self) -> bool {
        let xx = self.X.square();
        let yy = self.Y.square();
        let zz = self.Z.square();
        let lhs = (yy - xx) * zz;
        let rhs = zz.square() + EDWARDS_D * xx * yy;
        lhs == rhs && self.X * self.Y == self.Z * self.T
    }
}

impl Default for EdwardsPoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &Self) -> bool {
        self.X * other.Z == other.X * self.Z && self.Y * other.Z == other.Y * self.Z
    }
}

impl Eq for EdwardsPoint {}

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "EdwardsPoint(")?;
        for byte in self.compress().iter() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl<'b> Add<&'b EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn add(self, rhs: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &rhs.to_cached()).to_extended()
    }
}

impl Add for EdwardsPoint {
    type Output = EdwardsPoint;

    #[inline]
    fn add(self, rhs: EdwardsPoint) -> EdwardsPoint {
        &self + &rhs
    }
}

impl AddAssign for EdwardsPoint {
    #[inline]
    fn add_assign(&mut self, rhs: EdwardsPoint) {
        *self = &*self + &rhs;
    }
}

impl<'b> Sub<&'b EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn sub(self, rhs: &'b EdwardsPoint) -> EdwardsPoint {
        (self - &rhs.to_cached()).to_extended()
    }
}

impl Sub for EdwardsPoint {
    type Output = EdwardsPoint;

    #[inline]
    fn sub(self, rhs: EdwardsPoint) -> EdwardsPoint {
        &self - &rhs
    }
}

impl SubAssign for EdwardsPoint {
    #[inline]
    fn sub_assign(&mut self, rhs: EdwardsPoint) {
        *self = &*self - &rhs;
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    #[inline]
    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -self.X,
            Y: self.Y,
            Z: self.Z,
            T: -self.T,
        }
    }
}

impl<'b> Mul<&'b Scalar> for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        self.mul_variable(scalar)
    }
}

impl<'b> Mul<&'b EdwardsPoint> for &Scalar {
    type Output = EdwardsPoint;

    fn mul(self, point: &'b EdwardsPoint) -> EdwardsPoint {
        point.mul_variable(self)
    }
}

impl Mul<Scalar> for EdwardsPoint {
    type Output = EdwardsPoint;

    #[inline]
    fn mul(self, scalar: Scalar) -> EdwardsPoint {
        self.mul_variable(&scalar)
    }
}
