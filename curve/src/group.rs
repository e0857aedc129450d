//! Single-scalar multiplication with signed 4-bit windows.
//!
//! Both routines write the scalar as sum d_i 16^i with d_i in [-8, 8] and
//! select table entries with conditional moves, so which entry is used never
//! shows up in the branch pattern.

use crate::cached::{CachedPoint, PrecomputedPoint};
use crate::edwards::EdwardsPoint;
use crate::generator_table::BASEPOINT_TABLE;
use crate::scalar::Scalar;

/// 1 if `a == b`, else 0.
#[inline]
fn equal(a: u8, b: u8) -> u8 {
    let diff = u32::from(a ^ b);
    (diff.wrapping_sub(1) >> 31) as u8
}

/// 1 if `digit < 0`, else 0.
#[inline]
fn negative(digit: i8) -> u8 {
    (digit as u8) >> 7
}

#[inline]
fn magnitude(digit: i8) -> u8 {
    let mask = -(negative(digit) as i8);
    (digit - ((mask & digit) << 1)) as u8
}

/// digit * 256^pos * B from the fixed-base table.
fn select_precomputed(pos: usize, digit: i8) -> PrecomputedPoint {
    let abs = magnitude(digit);
    let mut t = PrecomputedPoint::IDENTITY;
    for (j, entry) in BASEPOINT_TABLE[pos].iter().enumerate() {
        t.conditional_move(entry, equal(abs, j as u8 + 1));
    }
    let minus_t = -t;
    t.conditional_move(&minus_t, negative(digit));
    t
}

/// digit * A from the per-call multiples 1A..8A.
fn select_cached(multiples: &[CachedPoint; 8], digit: i8) -> CachedPoint {
    let abs = magnitude(digit);
    let mut t = CachedPoint::IDENTITY;
    for (j, entry) in multiples.iter().enumerate() {
        t.conditional_move(entry, equal(abs, j as u8 + 1));
    }
    let minus_t = -t;
    t.conditional_move(&minus_t, negative(digit));
    t
}

/// Scalars with the top bit set are reduced first, since both recodings
/// need a 255-bit input.
#[inline]
pub(crate) fn windowable(scalar: &Scalar) -> Scalar {
    if scalar.0[31] > 127 {
        scalar.reduce()
    } else {
        *scalar
    }
}

impl EdwardsPoint {
    /// scalar * B.
    ///
    /// Odd digits are added first, the sum is multiplied by 16, then the even
    /// digits are added. Each digit is one lookup into row i/2 of the table
    /// of 256^i multiples.
    pub fn mul_base(scalar: &Scalar) -> EdwardsPoint {
        let digits = windowable(scalar).as_radix_16();

        let mut h = EdwardsPoint::IDENTITY;
        for i in (1..64).step_by(2) {
            h = (&h + &select_precomputed(i / 2, digits[i])).to_extended();
        }

        h = h.mul_by_pow_2(4);

        for i in (0..64).step_by(2) {
            h = (&h + &select_precomputed(i / 2, digits[i])).to_extended();
        }
        h
    }

    /// scalar * self for an arbitrary point.
    ///
    /// Builds 1A..8A once, then does four doublings and one addition per
    /// digit, most significant first. Scalars of 2^255 or more are reduced
    /// mod L beforehand, which changes the result only for points outside the
    /// prime-order subgroup.
    pub(crate) fn mul_variable(&self, scalar: &Scalar) -> EdwardsPoint {
        let digits = windowable(scalar).as_radix_16();

        let mut multiples = [self.to_cached(); 8];
        for i in 0..7 {
            multiples[i + 1] = (self + &multiples[i]).to_extended().to_cached();
        }

        let mut acc = EdwardsPoint::IDENTITY;
        for digit in digits.iter().rev() {
            let t = select_cached(&multiples, *digit);
            acc = (&acc.mul_by_pow_2(4) + &t).to_extended();
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Random;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Double-and-add over the plain bits.
    fn reference_mul(point: &EdwardsPoint, scalar: &Scalar) -> EdwardsPoint {
        let mut acc = EdwardsPoint::IDENTITY;
        for byte in scalar.as_bytes().iter().rev() {
            for bit in (0..8).rev() {
                acc = acc.double();
                if (byte >> bit) & 1 == 1 {
                    acc += *point;
                }
            }
        }
        acc
    }

    #[test]
    fn test_digit_helpers() {
        for digit in -8i8..=8 {
            assert_eq!(magnitude(digit), digit.unsigned_abs());
            assert_eq!(negative(digit), u8::from(digit < 0));
        }
        assert_eq!(equal(3, 3), 1);
        assert_eq!(equal(3, 4), 0);
        assert_eq!(equal(0, 255), 0);
    }

    #[test]
    fn test_mul_base_small_scalars() {
        let b = EdwardsPoint::basepoint();
        assert!(EdwardsPoint::mul_base(&Scalar::ZERO).is_identity());
        assert_eq!(EdwardsPoint::mul_base(&Scalar::ONE), b);
        assert_eq!(EdwardsPoint::mul_base(&Scalar::from(2u64)), b.double());
        assert_eq!(
            EdwardsPoint::mul_base(&Scalar::from(8u64)),
            b.mul_by_cofactor()
        );
    }

    #[test]
    fn test_mul_base_matches_reference() {
        let mut rng = StdRng::seed_from_u64(42);
        let b = EdwardsPoint::basepoint();
        for _ in 0..5 {
            let s = Scalar::random(&mut rng);
            assert_eq!(EdwardsPoint::mul_base(&s), reference_mul(&b, &s));
        }
    }

    #[test]
    fn test_mul_base_minus_one() {
        let l_minus_one = -Scalar::ONE;
        let p = EdwardsPoint::mul_base(&l_minus_one);
        assert_eq!(p, -EdwardsPoint::basepoint());
    }

    #[test]
    fn test_mul_variable_matches_mul_base() {
        let mut rng = StdRng::seed_from_u64(43);
        let b = EdwardsPoint::basepoint();
        for _ in 0..10 {
            let s = Scalar::random(&mut rng);
            assert_eq!(&b * &s, EdwardsPoint::mul_base(&s));
        }
    }

    #[test]
    fn test_mul_variable_is_linear() {
        let mut rng = StdRng::seed_from_u64(44);
        let p = EdwardsPoint::mul_base(&Scalar::random(&mut rng));
        let a = Scalar::random(&mut rng);
        let c = Scalar::random(&mut rng);

        assert_eq!(&p * &(a + c), &(&p * &a) + &(&p * &c));
        assert_eq!(&(&p * &a) * &c, &p * &(a * c));
        assert_eq!(&p * &a, reference_mul(&p, &a));
        assert!((&p * &Scalar::ZERO).is_identity());
    }

    #[test]
    fn test_mul_variable_on_torsion_point() {
        // (0, -1) has order 2: odd scalars keep it, even scalars clear it.
        let mut bytes = [0xffu8; 32];
        bytes[0] = 0xec;
        bytes[31] = 0x7f;
        let t = EdwardsPoint::decompress(&bytes).unwrap();
        assert_eq!(&t * &Scalar::from(3u64), t);
        assert!((&t * &Scalar::from(4u64)).is_identity());
    }
}
