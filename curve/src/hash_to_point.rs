//! Deterministic map from 32-byte digests to curve points.
//!
//! The digest is read as a field element u (all 256 bits, reduced mod p) and
//! pushed through the Elligator-style map onto the birationally equivalent
//! Montgomery curve v^2 = w^3 + A w^2 + w, expressed directly in projective
//! Edwards coordinates. The result is multiplied by the cofactor so that it
//! lies in the prime-order subgroup. This is the map CryptoNote networks use
//! for key images, so the output must stay bit-exact.

use crate::constants::{
    FFFB1, FFFB2, FFFB3, FFFB4, MONTGOMERY_A_NEG, MONTGOMERY_A_NEG_SQUARED, SQRT_M1,
};
use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::projective::ProjectivePoint;

const NINETEEN: FieldElement = FieldElement([19, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

/// Maps a digest to a point before cofactor clearing.
fn map_to_projective(digest: &[u8; 32]) -> ProjectivePoint {
    // 2^255 = 19 (mod p), so the top bit is worth 19.
    let mut u = FieldElement::from_bytes(digest);
    if digest[31] & 0x80 != 0 {
        u += NINETEEN;
    }

    let v = u.square2();
    let w = v + FieldElement::ONE;
    let x = w.square() + MONTGOMERY_A_NEG_SQUARED * v;

    let mut r_x = FieldElement::div_pow_m1(&w, &x);
    let mut x = r_x.square() * x;
    let mut z = MONTGOMERY_A_NEG;

    let sign = if (w - x).is_nonzero() {
        if (w + x).is_nonzero() {
            x *= SQRT_M1;
            if (w - x).is_nonzero() {
                r_x *= FFFB3;
            } else {
                r_x *= FFFB4;
            }
            true
        } else {
            r_x = r_x * FFFB1 * u;
            z *= v;
            false
        }
    } else {
        r_x = r_x * FFFB2 * u;
        z *= v;
        false
    };

    if r_x.is_negative() != sign {
        r_x = -r_x;
    }

    let z_plus_w = z + w;
    ProjectivePoint {
        X: r_x * z_plus_w,
        Y: z - w,
        Z: z_plus_w,
    }
}

/// Maps a 32-byte digest to a point in the prime-order subgroup.
///
/// Callers hash their input first (CryptoNote uses Keccak-256 of a public
/// key); the map itself is deterministic and never fails.
pub fn map_to_point(digest: &[u8; 32]) -> EdwardsPoint {
    let p = map_to_projective(digest);
    p.double()
        .to_projective()
        .double()
        .to_projective()
        .double()
        .to_extended()
}
