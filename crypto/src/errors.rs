//! Error types for key handling, signing and address parsing.

use cn_curve::DecompressionError;
use thiserror::Error;

/// Errors returned by key, signature and ring-signature operations.
///
/// Verification never returns these: `check_*` functions answer `false` for
/// any malformed input. Errors surface from constructors and from signing,
/// where bad input is a caller bug worth reporting.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A public key, key image or key derivation does not decode to a curve
    /// point.
    #[error("invalid point encoding: {0}")]
    InvalidEncoding(#[from] DecompressionError),

    /// A secret key or signature scalar is not below the group order.
    #[error("scalar is not reduced modulo the group order")]
    InvalidScalar,

    /// The secret key does not belong to the public key or key image it was
    /// supplied with.
    #[error("secret key does not match the supplied public key")]
    KeyMismatch,

    /// A ring signature over zero public keys was requested.
    #[error("ring must contain at least one public key")]
    EmptyRing,

    /// The real signer's index lies outside the ring.
    #[error("real index {index} is out of range for a ring of size {size}")]
    RingIndexOutOfRange { index: usize, size: usize },

    /// A textual address could not be parsed.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// Hex input was malformed or had the wrong length.
    #[error("invalid hex encoding")]
    InvalidHex,
}

/// Reasons a base58 address string fails to decode.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Bad symbol, impossible block length, or a block that overflows its
    /// decoded size.
    #[error("malformed base58 encoding")]
    InvalidBase58,

    #[error("address checksum mismatch")]
    ChecksumMismatch,

    /// The prefix varint is truncated, padded or wider than 64 bits.
    #[error("malformed address prefix")]
    InvalidVarint,

    #[error("address prefix {found:#x} does not match expected {expected:#x}")]
    PrefixMismatch { expected: u64, found: u64 },

    #[error("address body is {actual} bytes, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },
}

impl From<base58_monero::base58::Error> for AddressError {
    fn from(error: base58_monero::base58::Error) -> Self {
        // Classify by name; the variant set differs between crate versions.
        if format!("{error:?}").contains("Checksum") {
            AddressError::ChecksumMismatch
        } else {
            AddressError::InvalidBase58
        }
    }
}

impl From<hex::FromHexError> for CryptoError {
    fn from(_: hex::FromHexError) -> Self {
        CryptoError::InvalidHex
    }
}
