//! Prime field GF(p), p = 2^255 - 19.
//!
//! Elements are ten signed limbs in radix 2^25.5 (limb widths alternate 26 and
//! 25 bits). Products accumulate in `i64` and are carried back so each limb sits
//! near 2^25; sums and differences are left uncarried and may feed exactly one
//! multiplication before they have to be carried again.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Width in bits of each limb.
const LIMB_BITS: [u32; 10] = [26, 25, 26, 25, 26, 25, 26, 25, 26, 25];

/// Bit position of each limb inside the 255-bit integer.
const LIMB_OFFSETS: [u32; 10] = [0, 26, 51, 77, 102, 128, 153, 179, 204, 230];

/// Carry order used after a multiplication: interleaving the two halves keeps
/// every intermediate limb inside `i64`.
const CARRY_ORDER: [usize; 10] = [0, 4, 1, 5, 2, 6, 3, 7, 4, 8];

/// Element of GF(2^255 - 19).
#[derive(Copy, Clone)]
pub struct FieldElement(pub(crate) [i32; 10]);

impl FieldElement {
    pub const ZERO: Self = FieldElement([0; 10]);

    pub const ONE: Self = FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Decodes 32 little-endian bytes. Bit 255 is ignored and values in
    /// `[p, 2^255)` are accepted; they reduce on the next encode.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0i32; 10];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = read_bits(bytes, LIMB_OFFSETS[i], LIMB_BITS[i]) as i32;
        }
        FieldElement(limbs)
    }

    /// Canonical 32-byte little-endian encoding, fully reduced mod p.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut h = self.0.map(i64::from);

        // q = floor(h / p), computed from the top limb down.
        let mut q = (19 * h[9] + (1 << 24)) >> 25;
        for (limb, bits) in h.iter().zip(LIMB_BITS) {
            q = (limb + q) >> bits;
        }

        h[0] += 19 * q;
        for i in 0..9 {
            let carry = h[i] >> LIMB_BITS[i];
            h[i + 1] += carry;
            h[i] -= carry << LIMB_BITS[i];
        }
        h[9] &= (1 << 25) - 1;

        let mut out = [0u8; 32];
        let mut acc = 0u64;
        let mut acc_bits = 0u32;
        let mut pos = 0;
        for (limb, bits) in h.iter().zip(LIMB_BITS) {
            acc |= (*limb as u64) << acc_bits;
            acc_bits += bits;
            while acc_bits >= 8 {
                out[pos] = acc as u8;
                acc >>= 8;
                acc_bits -= 8;
                pos += 1;
            }
        }
        out[pos] = acc as u8;
        out
    }

    /// Parity of the canonical encoding, i.e. the "sign" of x in a compressed point.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.to_bytes()[0] & 1 == 1
    }

    #[inline]
    pub fn is_nonzero(&self) -> bool {
        self.to_bytes() != [0u8; 32]
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        !self.is_nonzero()
    }

    /// Replaces `self` with `other` when `choice == 1`, leaves it when `choice == 0`.
    /// No branch depends on `choice`.
    pub fn conditional_move(&mut self, other: &Self, choice: u8) {
        let mask = -(i32::from(choice));
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a ^= (*a ^ *b) & mask;
        }
    }

    pub fn square(&self) -> Self {
        carry(self.square_limbs())
    }

    /// 2 * self^2.
    pub fn square2(&self) -> Self {
        let mut h = self.square_limbs();
        for limb in h.iter_mut() {
            *limb += *limb;
        }
        carry(h)
    }

    /// self^(2^k), k >= 1.
    pub fn pow2k(&self, k: u32) -> Self {
        debug_assert!(k > 0);
        let mut out = self.square();
        for _ in 1..k {
            out = out.square();
        }
        out
    }

    /// Multiplicative inverse, self^(p - 2). Zero maps to zero.
    pub fn invert(&self) -> Self {
        let z = *self;
        let t0 = z.square();
        let t1 = z * t0.pow2k(2);
        let t0 = t0 * t1;
        let t1 = t1 * t0.square();
        let t1 = t1.pow2k(5) * t1;
        let t2 = t1.pow2k(10) * t1;
        let t2 = t2.pow2k(20) * t2;
        let t1 = t2.pow2k(10) * t1;
        let t2 = t1.pow2k(50) * t1;
        let t2 = t2.pow2k(100) * t2;
        let t1 = t2.pow2k(50) * t1;
        t1.pow2k(5) * t0
    }

    /// self^((p - 5) / 8), the core of the square-root computation.
    pub fn pow22523(&self) -> Self {
        let z = *self;
        let t0 = z.square();
        let t1 = z * t0.pow2k(2);
        let t0 = t0 * t1;
        let t0 = t1 * t0.square();
        let t0 = t0.pow2k(5) * t0;
        let t1 = t0.pow2k(10) * t0;
        let t1 = t1.pow2k(20) * t1;
        let t0 = t1.pow2k(10) * t0;
        let t1 = t0.pow2k(50) * t0;
        let t1 = t1.pow2k(100) * t1;
        let t0 = t1.pow2k(50) * t0;
        t0.pow2k(2) * z
    }

    /// u * v^3 * (u * v^7)^((p - 5) / 8).
    ///
    /// When u / v is a square the result r satisfies v * r^2 = ±u; the caller
    /// fixes the sign with a multiplication by sqrt(-1).
    pub fn div_pow_m1(u: &Self, v: &Self) -> Self {
        let v3 = v.square() * *v;
        let uv7 = v3.square() * *v * *u;
        uv7.pow22523() * v3 * *u
    }

    fn square_limbs(&self) -> [i64; 10] {
        let f = self.0.map(i64::from);
        let mut h = [0i64; 10];
        for i in 0..10 {
            for j in i..10 {
                let mut term = f[i] * f[j];
                if i != j {
                    term *= 2;
                }
                if i & j & 1 == 1 {
                    term *= 2;
                }
                if i + j >= 10 {
                    h[i + j - 10] += 19 * term;
                } else {
                    h[i + j] += term;
                }
            }
        }
        h
    }
}

/// Reads `width` bits starting at bit `offset` of a little-endian buffer.
#[inline]
fn read_bits(bytes: &[u8; 32], offset: u32, width: u32) -> u64 {
    let start = (offset / 8) as usize;
    let mut window = 0u64;
    for (k, byte) in bytes[start..].iter().take(5).enumerate() {
        window |= u64::from(*byte) << (8 * k);
    }
    (window >> (offset % 8)) & ((1 << width) - 1)
}

#[inline]
fn carry_limb(h: &mut [i64; 10], i: usize) {
    let bits = LIMB_BITS[i];
    let carry = (h[i] + (1i64 << (bits - 1))) >> bits;
    h[i + 1] += carry;
    h[i] -= carry << bits;
}

/// Brings 64-bit limb accumulators back into 32-bit limb range.
fn carry(mut h: [i64; 10]) -> FieldElement {
    for i in CARRY_ORDER {
        carry_limb(&mut h, i);
    }
    let top = (h[9] + (1 << 24)) >> 25;
    h[0] += top * 19;
    h[9] -= top << 25;
    carry_limb(&mut h, 0);

    FieldElement(h.map(|limb| limb as i32))
}

impl Add for FieldElement {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(rhs.0) {
            *a += b;
        }
        FieldElement(out)
    }
}

impl AddAssign for FieldElement {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for FieldElement {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(rhs.0) {
            *a -= b;
        }
        FieldElement(out)
    }
}

impl SubAssign for FieldElement {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for FieldElement {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        FieldElement(self.0.map(|limb| -limb))
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let f = self.0.map(i64::from);
        let g = rhs.0.map(i64::from);
        let mut h = [0i64; 10];
        for i in 0..10 {
            for j in 0..10 {
                let mut term = f[i] * g[j];
                // Two odd limbs overlap half a bit in radix 2^25.5.
                if i & j & 1 == 1 {
                    term *= 2;
                }
                if i + j >= 10 {
                    h[i + j - 10] += 19 * term;
                } else {
                    h[i + j] += term;
                }
            }
        }
        carry(h)
    }
}

impl MulAssign for FieldElement {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for FieldElement {}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x")?;
        for byte in self.to_bytes().iter().rev() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn modulus() -> BigUint {
        (BigUint::from(1u8) << 255u32) - BigUint::from(19u8)
    }

    fn to_big(fe: &FieldElement) -> BigUint {
        BigUint::from_bytes_le(&fe.to_bytes())
    }

    fn from_big(n: &BigUint) -> FieldElement {
        let mut bytes = [0u8; 32];
        let le = n.to_bytes_le();
        bytes[..le.len()].copy_from_slice(&le);
        FieldElement::from_bytes(&bytes)
    }

    fn random_element(rng: &mut StdRng) -> FieldElement {
        let bytes: [u8; 32] = rng.random();
        FieldElement::from_bytes(&bytes)
    }

    #[test]
    fn test_zero_one() {
        assert_eq!(FieldElement::ZERO.to_bytes(), [0u8; 32]);
        let mut one = [0u8; 32];
        one[0] = 1;
        assert_eq!(FieldElement::ONE.to_bytes(), one);
        assert!(FieldElement::ZERO.is_zero());
        assert!(FieldElement::ONE.is_nonzero());
    }

    #[test]
    fn test_to_bytes_reduces_non_canonical_inputs() {
        let p = modulus();
        for extra in [0u32, 1, 2, 18] {
            let n = &p + BigUint::from(extra);
            assert_eq!(to_big(&from_big(&n)), BigUint::from(extra));
        }

        let mut all_ones = [0xffu8; 32];
        all_ones[31] = 0x7f;
        let expected = (BigUint::from_bytes_le(&all_ones)) % &p;
        assert_eq!(to_big(&FieldElement::from_bytes(&all_ones)), expected);
    }

    #[test]
    fn test_from_bytes_ignores_top_bit() {
        let mut bytes = [0u8; 32];
        bytes[0] = 9;
        let a = FieldElement::from_bytes(&bytes);
        bytes[31] |= 0x80;
        let b = FieldElement::from_bytes(&bytes);
        assert_eq!(a, b);
    }

    #[test]
    fn test_arithmetic_matches_biguint() {
        let p = modulus();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let a = random_element(&mut rng);
            let b = random_element(&mut rng);
            let (ba, bb) = (to_big(&a), to_big(&b));

            assert_eq!(to_big(&(a * b)), (&ba * &bb) % &p);
            assert_eq!(to_big(&a.square()), (&ba * &ba) % &p);
            assert_eq!(to_big(&a.square2()), (BigUint::from(2u8) * &ba * &ba) % &p);
            assert_eq!(to_big(&(a + b)), (&ba + &bb) % &p);
            assert_eq!(to_big(&(a - b)), (&ba + &p - &bb) % &p);
            assert_eq!(to_big(&(-a)), (&p - &ba) % &p);

            // Uncarried sums feed straight into a multiplication.
            let lhs = (a + b) * (a - b);
            assert_eq!(lhs, a.square() - b.square());
        }
    }

    #[test]
    fn test_invert() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let a = random_element(&mut rng);
            assert_eq!(a * a.invert(), FieldElement::ONE);
        }
        assert_eq!(FieldElement::ZERO.invert(), FieldElement::ZERO);
    }

    #[test]
    fn test_pow22523_matches_biguint() {
        let p = modulus();
        let exponent = (&p - BigUint::from(5u8)) >> 3u32;
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..10 {
            let a = random_element(&mut rng);
            assert_eq!(to_big(&a.pow22523()), to_big(&a).modpow(&exponent, &p));
        }
    }

    #[test]
    fn test_div_pow_m1_square_root() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..20 {
            let x = random_element(&mut rng);
            let v = random_element(&mut rng);
            let u = x.square() * v;

            let r = FieldElement::div_pow_m1(&u, &v);
            let check = v * r.square();
            assert!(check == u || check == -u);
        }
    }

    #[test]
    fn test_conditional_move() {
        let mut rng = StdRng::seed_from_u64(19);
        let a = random_element(&mut rng);
        let b = random_element(&mut rng);

        let mut t = a;
        t.conditional_move(&b, 0);
        assert_eq!(t, a);
        t.conditional_move(&b, 1);
        assert_eq!(t, b);
    }

    #[test]
    fn test_is_negative() {
        assert!(!FieldElement::ZERO.is_negative());
        assert!(FieldElement::ONE.is_negative());
        assert!(!(-FieldElement::ONE).is_negative());
    }
}
