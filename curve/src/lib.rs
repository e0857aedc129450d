//! Arithmetic on the twisted Edwards curve -x^2 + y^2 = 1 + d x^2 y^2 over
//! GF(2^255 - 19), as used by CryptoNote networks.
//!
//! This crate provides the prime field, scalars modulo the group order L, the
//! point representations and conversions between them, fixed-base and
//! variable-base scalar multiplication, variable-time double-scalar
//! multiplication, and the CryptoNote hash-to-point map. Byte encodings follow
//! the usual little-endian Ed25519 conventions.

mod cached;
mod constants;
mod edwards;
mod errors;
mod field;
mod generator_table;
mod group;
mod hash_to_point;
mod msm;
mod projective;
mod random;
mod scalar;

pub use cached::{CachedPoint, PrecomputedPoint};
pub use constants::{ED25519_BASEPOINT_COMPRESSED, ED25519_BASEPOINT_POINT};
pub use edwards::EdwardsPoint;
pub use errors::DecompressionError;
pub use field::FieldElement;
pub use hash_to_point::map_to_point;
pub use msm::{vartime_double_scalar_mul, vartime_double_scalar_mul_basepoint, OddMultiples};
pub use projective::{CompletedPoint, ProjectivePoint};
pub use random::Random;
pub use scalar::Scalar;
