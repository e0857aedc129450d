use rand::{CryptoRng, RngCore};

use crate::field::FieldElement;
use crate::scalar::Scalar;

/// Helper trait for sampling uniformly random values from a cryptographic RNG.
pub trait Random: Sized {
    fn random<R: CryptoRng + ?Sized>(rng: &mut R) -> Self;
}

impl Random for Scalar {
    /// 64 random bytes reduced mod L; the bias is below 2^-250.
    #[inline]
    fn random<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut wide = [0u8; 64];
        RngCore::fill_bytes(rng, &mut wide);
        Scalar::from_bytes_mod_order_wide(&wide)
    }
}

impl Random for FieldElement {
    #[inline]
    fn random<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        RngCore::fill_bytes(rng, &mut bytes);
        FieldElement::from_bytes(&bytes)
    }
}
