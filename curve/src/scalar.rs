//! Scalars modulo the prime subgroup order
//! L = 2^252 + 27742317777372353535851937790883648493.
//!
//! A scalar is stored as its 32-byte little-endian encoding. Arithmetic unpacks
//! the bytes into signed 21-bit limbs, works on a 24-limb product, and folds the
//! high limbs back using 2^252 = -27742317777372353535851937790883648493 (mod L).
//! Constructors that take raw bytes keep them as given so that callers can ask
//! [`Scalar::is_canonical`] about data read off the wire.

use core::fmt::{self, Debug, Display, Formatter};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// L as little-endian 64-bit words.
const L_WORDS: [u64; 4] = [
    0x5812631a5cf5d3ed,
    0x14def9dea2f79cd6,
    0x0000000000000000,
    0x1000000000000000,
];

/// -(L - 2^252) split into 21-bit signed digits: what one unit of limb 12 is
/// worth in limbs 0..6.
const FOLD: [i64; 6] = [666643, 470296, 654183, -997805, 136657, -683901];

const LIMB_MASK: u64 = (1 << 21) - 1;

/// Element of the scalar field Z/LZ.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Scalar(pub(crate) [u8; 32]);

impl Scalar {
    pub const ZERO: Self = Scalar([0u8; 32]);

    pub const ONE: Self = Scalar([
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0,
    ]);

    /// Wraps raw bytes without reducing them.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Scalar(bytes)
    }

    /// Returns `Some` only for encodings strictly below L.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> Option<Self> {
        let scalar = Scalar(bytes);
        scalar.is_canonical().then_some(scalar)
    }

    /// Reduces a 256-bit little-endian integer mod L.
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Self {
        let mut s = [0i64; 24];
        s[..12].copy_from_slice(&load_limbs::<12>(&bytes));
        reduce_limbs(s)
    }

    /// Reduces a 512-bit little-endian integer mod L.
    pub fn from_bytes_mod_order_wide(bytes: &[u8; 64]) -> Self {
        reduce_limbs(load_limbs::<24>(bytes))
    }

    #[inline]
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// This scalar reduced mod L.
    pub fn reduce(&self) -> Self {
        Self::from_bytes_mod_order(self.0)
    }

    /// True when the encoding is strictly below L.
    pub fn is_canonical(&self) -> bool {
        is_below_order(self.to_words())
    }

    /// True when every byte is zero. Non-canonical encodings of zero (L, 2L, ...)
    /// are not zero by this test.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|byte| *byte == 0)
    }

    /// a * b + c mod L.
    pub fn mul_add(a: &Self, b: &Self, c: &Self) -> Self {
        mul_acc(a, b, c, false)
    }

    /// c - a * b mod L.
    pub fn mul_sub(a: &Self, b: &Self, c: &Self) -> Self {
        mul_acc(a, b, c, true)
    }

    /// Signed radix-16 digits d_i in [-8, 8) (the top digit may reach 8) with
    /// self = sum d_i * 16^i. Requires the top bit to be clear.
    pub(crate) fn as_radix_16(&self) -> [i8; 64] {
        debug_assert!(self.0[31] <= 127);

        let mut digits = [0i8; 64];
        for (i, byte) in self.0.iter().enumerate() {
            digits[2 * i] = (byte & 15) as i8;
            digits[2 * i + 1] = ((byte >> 4) & 15) as i8;
        }

        let mut carry = 0i8;
        for digit in digits.iter_mut().take(63) {
            *digit += carry;
            carry = (*digit + 8) >> 4;
            *digit -= carry << 4;
        }
        digits[63] += carry;
        digits
    }

    /// Sliding-window recoding: every nonzero digit is odd, lies in [-15, 15],
    /// and is followed by at least four zeros.
    pub(crate) fn sliding_window(&self) -> [i8; 256] {
        let mut r = [0i32; 256];
        for (i, bit) in r.iter_mut().enumerate() {
            *bit = i32::from((self.0[i >> 3] >> (i & 7)) & 1);
        }

        for i in 0..256 {
            if r[i] == 0 {
                continue;
            }
            let mut b = 1;
            while b <= 6 && i + b < 256 {
                if r[i + b] != 0 {
                    let shifted = r[i + b] << b;
                    if r[i] + shifted <= 15 {
                        r[i] += shifted;
                        r[i + b] = 0;
                    } else if r[i] - shifted >= -15 {
                        r[i] -= shifted;
                        for k in (i + b)..256 {
                            if r[k] == 0 {
                                r[k] = 1;
                                break;
                            }
                            r[k] = 0;
                        }
                    } else {
                        break;
                    }
                }
                b += 1;
            }
        }

        r.map(|digit| digit as i8)
    }

    fn to_words(self) -> [u64; 4] {
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().zip(self.0.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_le_bytes(buf);
        }
        words
    }
}

/// Splits a little-endian buffer into 21-bit limbs; the last limb takes every
/// remaining bit.
fn load_limbs<const N: usize>(bytes: &[u8]) -> [i64; N] {
    let mut limbs = [0i64; N];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let offset = 21 * i;
        let mut window = 0u64;
        for (k, byte) in bytes[offset / 8..].iter().take(8).enumerate() {
            window |= u64::from(*byte) << (8 * k);
        }
        let value = window >> (offset % 8);
        *limb = if i == N - 1 {
            value as i64
        } else {
            (value & LIMB_MASK) as i64
        };
    }
    limbs
}

#[inline]
fn carry_round(s: &mut [i64; 24], i: usize) {
    let carry = (s[i] + (1 << 20)) >> 21;
    s[i + 1] += carry;
    s[i] -= carry << 21;
}

#[inline]
fn carry_floor(s: &mut [i64; 24], i: usize) {
    let carry = s[i] >> 21;
    s[i + 1] += carry;
    s[i] -= carry << 21;
}

/// Moves limb `i` (weight 2^(21 i)) down twelve limbs.
#[inline]
fn fold(s: &mut [i64; 24], i: usize) {
    for (k, factor) in FOLD.iter().enumerate() {
        s[i - 12 + k] += s[i] * factor;
    }
    s[i] = 0;
}

/// Reduces a 24-limb signed value mod L and packs the canonical encoding.
fn reduce_limbs(mut s: [i64; 24]) -> Scalar {
    for i in (0..23).step_by(2) {
        carry_round(&mut s, i);
    }
    for i in (1..22).step_by(2) {
        carry_round(&mut s, i);
    }
    for i in (18..24).rev() {
        fold(&mut s, i);
    }

    for i in (6..17).step_by(2) {
        carry_round(&mut s, i);
    }
    for i in (7..16).step_by(2) {
        carry_round(&mut s, i);
    }
    for i in (12..18).rev() {
        fold(&mut s, i);
    }

    for i in (0..11).step_by(2) {
        carry_round(&mut s, i);
    }
    for i in (1..12).step_by(2) {
        carry_round(&mut s, i);
    }
    fold(&mut s, 12);

    for i in 0..12 {
        carry_floor(&mut s, i);
    }
    fold(&mut s, 12);
    for i in 0..11 {
        carry_floor(&mut s, i);
    }

    // Limbs 0..11 are now in [0, 2^21); limb 11 may equal 2^21 since L > 2^252.
    let mut out = [0u8; 32];
    let mut acc = 0u64;
    let mut acc_bits = 0u32;
    let mut pos = 0;
    for limb in &s[..12] {
        acc |= (*limb as u64) << acc_bits;
        acc_bits += 21;
        while acc_bits >= 8 {
            out[pos] = acc as u8;
            acc >>= 8;
            acc_bits -= 8;
            pos += 1;
        }
    }
    if acc_bits > 0 {
        out[pos] = acc as u8;
    }
    Scalar(out)
}

fn mul_acc(a: &Scalar, b: &Scalar, c: &Scalar, subtract: bool) -> Scalar {
    let a = load_limbs::<12>(&a.0);
    let b = load_limbs::<12>(&b.0);
    let c = load_limbs::<12>(&c.0);

    let mut s = [0i64; 24];
    s[..12].copy_from_slice(&c);
    for (i, ai) in a.iter().enumerate() {
        for (j, bj) in b.iter().enumerate() {
            if subtract {
                s[i + j] -= ai * bj;
            } else {
                s[i + j] += ai * bj;
            }
        }
    }
    reduce_limbs(s)
}

#[inline]
const fn is_below_order(words: [u64; 4]) -> bool {
    let (_, borrow) = words[0].overflowing_sub(L_WORDS[0]);
    let (_, borrow) = borrowing_sub(words[1], L_WORDS[1], borrow);
    let (_, borrow) = borrowing_sub(words[2], L_WORDS[2], borrow);
    let (_, borrow) = borrowing_sub(words[3], L_WORDS[3], borrow);
    borrow
}

#[inline]
const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&value.to_le_bytes());
        Scalar(bytes)
    }
}

impl Add for Scalar {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Scalar::mul_add(&self, &Scalar::ONE, &rhs)
    }
}

impl AddAssign for Scalar {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Scalar {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Scalar::mul_sub(&rhs, &Scalar::ONE, &self)
    }
}

impl SubAssign for Scalar {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Scalar {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Scalar::ZERO - self
    }
}

impl Mul for Scalar {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Scalar::mul_add(&self, &rhs, &Scalar::ZERO)
    }
}

impl MulAssign for Scalar {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Sum for Scalar {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Scalar::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Scalar> for Scalar {
    fn sum<I: Iterator<Item = &'a Scalar>>(iter: I) -> Self {
        iter.fold(Scalar::ZERO, |acc, x| acc + *x)
    }
}

impl AsRef<[u8]> for Scalar {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({self})")
    }
}
