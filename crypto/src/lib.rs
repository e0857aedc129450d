//! CryptoNote keys, signatures and linkable ring signatures.
//!
//! This crate builds the wallet-facing primitives on top of `cn-curve`:
//!
//! - key pairs, key images and deterministic view keys ([`generate_keys`],
//!   [`generate_key_image`], [`generate_view_from_spend`])
//! - Schnorr-style signatures over a 32-byte prefix hash
//!   ([`generate_signature`], [`check_signature`])
//! - linkable ring signatures ([`generate_ring_signatures`],
//!   [`check_ring_signatures`])
//! - one-time output keys ([`generate_key_derivation`], [`derive_public_key`])
//! - base58 wallet addresses ([`encode_address`], [`decode_address`])
//!
//! Hashing is Keccak-256 with the original padding (`cn_fast_hash`), and all
//! byte layouts match the CryptoNote wire format.
//!
//! # Example
//!
//! ```
//! use cn_crypto::{
//!     check_ring_signatures, cn_fast_hash, generate_key_image, generate_keys,
//!     generate_ring_signatures,
//! };
//!
//! let mut rng = rand::rng();
//! let signer = generate_keys(&mut rng);
//! let image = generate_key_image(&signer.public_key, &signer.secret_key);
//!
//! // Hide the signer among two decoys.
//! let ring = [
//!     generate_keys(&mut rng).public_key,
//!     signer.public_key,
//!     generate_keys(&mut rng).public_key,
//! ];
//! let prefix = cn_fast_hash(b"transaction prefix");
//!
//! let signatures =
//!     generate_ring_signatures(&prefix, &image, &ring, &signer.secret_key, 1, &mut rng)?;
//! assert!(check_ring_signatures(&prefix, &image, &ring, &signatures));
//! # Ok::<(), cn_crypto::CryptoError>(())
//! ```
//!
//! # Security Considerations
//!
//! - Pass a cryptographically secure RNG; nonces and decoy scalars come from it.
//! - Verification runs in variable time. It only ever handles public data.
//! - Secret keys are redacted from `Debug` output and never logged.

/// Hex `Display`/`FromStr` and byte conversions for 32-byte newtypes.
macro_rules! impl_hex_bytes {
    ($name:ident) => {
        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::errors::CryptoError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(s, &mut bytes)?;
                Ok($name(bytes))
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                $name(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

mod address;
mod constants;
mod derivation;
mod errors;
mod hash;
mod keys;
mod ring;
mod signatures;
mod varint;

#[cfg(test)]
mod tests;

pub use address::{PublicAddress, decode_address, encode_address, is_valid_address};
pub use constants::{
    ADDRESS_CHECKSUM_SIZE, HASH_SIZE, KEY_SIZE, SECRET_KEY_SIZE, SIGNATURE_SIZE,
    TURTLECOIN_ADDRESS_PREFIX,
};
pub use derivation::{
    KeyDerivation, derivation_to_scalar, derive_public_key, derive_secret_key,
    generate_key_derivation, underive_public_key,
};
pub use errors::{AddressError, CryptoError};
pub use hash::{Hash, cn_fast_hash, hash_data_to_ec, hash_to_ec, hash_to_scalar};
pub use keys::{
    KeyImage, KeyPair, PublicKey, SecretKey, check_key, generate_key_image, generate_keys,
    generate_view_from_spend, recover_keys, scalarmult_key, secret_key_to_public_key,
};
pub use ring::{check_ring_signatures, generate_ring_signatures};
pub use signatures::{Signature, check_signature, generate_signature};
pub use varint::{encode_varint, read_varint, write_varint};
