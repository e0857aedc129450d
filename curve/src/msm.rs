//! Variable-time double-scalar multiplication.
//!
//! Scalars are recoded with [`Scalar::sliding_window`] and consumed from the
//! top digit down, one shared doubling per position. Only public inputs
//! (signature scalars, public keys, key images) should come through here:
//! both the branch pattern and the table indices depend on the scalars.

use crate::cached::CachedPoint;
use crate::constants::BASEPOINT_ORDER;
use crate::edwards::EdwardsPoint;
use crate::generator_table::BASEPOINT_ODD_MULTIPLES;
use crate::group::windowable;
use crate::projective::{CompletedPoint, ProjectivePoint};
use crate::scalar::Scalar;

/// Odd multiples A, 3A, 5A, ..., 15A of a point, ready for sliding-window
/// lookups.
///
/// Building the table costs one doubling and seven additions, so a point used
/// in several multiplications (a key image checked against every ring member)
/// should be expanded once.
#[derive(Copy, Clone, Debug)]
pub struct OddMultiples([CachedPoint; 8]);

impl OddMultiples {
    pub fn new(point: &EdwardsPoint) -> Self {
        let double = point.double();
        let mut table = [point.to_cached(); 8];
        for i in 0..7 {
            table[i + 1] = (&double + &table[i]).to_extended().to_cached();
        }
        OddMultiples(table)
    }

    /// L * A == identity, where A is the point this table was built from.
    pub fn is_torsion_free(&self) -> bool {
        let digits = BASEPOINT_ORDER.sliding_window();
        sliding_sum(&[(&digits, Multiples::Table(self))]).is_identity()
    }

    fn add_digit(&self, point: &EdwardsPoint, digit: i8) -> CompletedPoint {
        let entry = &self.0[usize::from(digit.unsigned_abs() / 2)];
        if digit > 0 {
            point + entry
        } else {
            point - entry
        }
    }
}

impl From<&EdwardsPoint> for OddMultiples {
    fn from(point: &EdwardsPoint) -> Self {
        OddMultiples::new(point)
    }
}

enum Multiples<'a> {
    Basepoint,
    Table(&'a OddMultiples),
}

impl Multiples<'_> {
    fn add_digit(&self, point: &EdwardsPoint, digit: i8) -> CompletedPoint {
        match self {
            Multiples::Basepoint => {
                let entry = &BASEPOINT_ODD_MULTIPLES[usize::from(digit.unsigned_abs() / 2)];
                if digit > 0 {
                    point + entry
                } else {
                    point - entry
                }
            }
            Multiples::Table(table) => table.add_digit(point, digit),
        }
    }
}

/// sum_k digits_k * table_k, skipping leading zero positions.
fn sliding_sum(terms: &[(&[i8; 256], Multiples<'_>)]) -> ProjectivePoint {
    let top = (0..256)
        .rev()
        .find(|&i| terms.iter().any(|(digits, _)| digits[i] != 0));
    let Some(top) = top else {
        return ProjectivePoint::IDENTITY;
    };

    let mut r = ProjectivePoint::IDENTITY;
    for i in (0..=top).rev() {
        let mut t = r.double();
        for (digits, table) in terms {
            let digit = digits[i];
            if digit != 0 {
                t = table.add_digit(&t.to_extended(), digit);
            }
        }
        r = t.to_projective();
    }
    r
}

/// a * A + b * B for the basepoint B. Variable time.
///
/// Scalars of 2^255 or more are reduced mod L first, as in `&point * a`.
pub fn vartime_double_scalar_mul_basepoint(
    a: &Scalar,
    point: &EdwardsPoint,
    b: &Scalar,
) -> ProjectivePoint {
    let table = OddMultiples::new(point);
    let a_digits = windowable(a).sliding_window();
    let b_digits = windowable(b).sliding_window();
    sliding_sum(&[
        (&a_digits, Multiples::Table(&table)),
        (&b_digits, Multiples::Basepoint),
    ])
}

/// a * A + b * B where `b_table` holds the odd multiples of B. Variable time.
///
/// Scalars of 2^255 or more are reduced mod L first.
pub fn vartime_double_scalar_mul(
    a: &Scalar,
    point: &EdwardsPoint,
    b: &Scalar,
    b_table: &OddMultiples,
) -> ProjectivePoint {
    let a_table = OddMultiples::new(point);
    let a_digits = windowable(a).sliding_window();
    let b_digits = windowable(b).sliding_window();
    sliding_sum(&[
        (&a_digits, Multiples::Table(&a_table)),
        (&b_digits, Multiples::Table(b_table)),
    ])
}
