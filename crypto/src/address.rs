//! Public wallet addresses.
//!
//! An address is the CryptoNote base58 encoding of
//! `varint(prefix) || spend_public_key || view_public_key || checksum`, where
//! the checksum is the first four bytes of the Keccak-256 of everything before
//! it. The block-wise base58 itself comes from `base58-monero`.

use serde::{Deserialize, Serialize};

use crate::constants::KEY_SIZE;
use crate::errors::{AddressError, CryptoError};
use crate::keys::PublicKey;
use crate::varint::{MAX_VARINT_SIZE, read_varint, write_varint};

/// The public half of a wallet: the spend and view public keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicAddress {
    pub spend_public_key: PublicKey,
    pub view_public_key: PublicKey,
}

/// Encodes `address` under the network `prefix`.
///
/// # Example
///
/// ```
/// use cn_crypto::{PublicAddress, TURTLECOIN_ADDRESS_PREFIX, decode_address, encode_address, generate_keys};
///
/// let mut rng = rand::rng();
/// let address = PublicAddress {
///     spend_public_key: generate_keys(&mut rng).public_key,
///     view_public_key: generate_keys(&mut rng).public_key,
/// };
/// let text = encode_address(TURTLECOIN_ADDRESS_PREFIX, &address)?;
/// assert!(text.starts_with("TRTL"));
/// assert_eq!(decode_address(&text, TURTLECOIN_ADDRESS_PREFIX)?, address);
/// # Ok::<(), cn_crypto::CryptoError>(())
/// ```
pub fn encode_address(prefix: u64, address: &PublicAddress) -> Result<String, CryptoError> {
    let mut data = Vec::with_capacity(MAX_VARINT_SIZE + 2 * KEY_SIZE);
    write_varint(prefix, &mut data);
    data.extend_from_slice(address.spend_public_key.as_bytes());
    data.extend_from_slice(address.view_public_key.as_bytes());
    base58_monero::encode_check(&data).map_err(|error| AddressError::from(error).into())
}

/// Parses an address and checks its checksum, prefix, length and keys.
///
/// The checksum is the first four bytes of the Keccak-256 of the body. Both
/// keys must decode to curve points; an address whose keys are not points
/// could never receive funds.
pub fn decode_address(encoded: &str, expected_prefix: u64) -> Result<PublicAddress, CryptoError> {
    let body = base58_monero::decode_check(encoded).map_err(AddressError::from)?;

    let (prefix, prefix_size) = read_varint(&body)?;
    if prefix != expected_prefix {
        return Err(AddressError::PrefixMismatch {
            expected: expected_prefix,
            found: prefix,
        }
        .into());
    }

    let expected = prefix_size + 2 * KEY_SIZE;
    if body.len() != expected {
        return Err(AddressError::InvalidLength {
            expected,
            actual: body.len(),
        }
        .into());
    }

    let keys = &body[prefix_size..];
    let mut spend = [0u8; KEY_SIZE];
    let mut view = [0u8; KEY_SIZE];
    spend.copy_from_slice(&keys[..KEY_SIZE]);
    view.copy_from_slice(&keys[KEY_SIZE..]);

    let address = PublicAddress {
        spend_public_key: PublicKey(spend),
        view_public_key: PublicKey(view),
    };
    address.spend_public_key.decompress()?;
    address.view_public_key.decompress()?;
    Ok(address)
}

/// True if `encoded` parses as an address under `expected_prefix`.
pub fn is_valid_address(encoded: &str, expected_prefix: u64) -> bool {
    match decode_address(encoded, expected_prefix) {
        Ok(_) => true,
        Err(error) => {
            tracing::debug!(%error, "address rejected");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ADDRESS_CHECKSUM_SIZE, TURTLECOIN_ADDRESS_PREFIX};
    use crate::hash::cn_fast_hash;

    const SPEND: &str = "797ac2197f99fd3195df874339eeec94b56d1cfa92bda95d2059f3ec77df11ca";
    const VIEW: &str = "b7d8b5530556df7d9ccfaea9fd658a67f8d1e1a9722aa95bab4d4b15186ce9cb";
    const ADDRESS: &str = "TRTLuzajY9nNLttNVpsngSAh2Uy9xf7AyRYa5Bxye7z3M3uLg1uBHEJ1toJgp4i832jPGMycxZCScL6ZT72iMK8g55xXeursbf7";

    fn address() -> PublicAddress {
        PublicAddress {
            spend_public_key: SPEND.parse().unwrap(),
            view_public_key: VIEW.parse().unwrap(),
        }
    }

    #[test]
    fn test_known_address() {
        let encoded = encode_address(TURTLECOIN_ADDRESS_PREFIX, &address()).unwrap();
        assert_eq!(encoded.len(), 99);
        assert_eq!(encoded, ADDRESS);
        assert_eq!(decode_address(ADDRESS, TURTLECOIN_ADDRESS_PREFIX), Ok(address()));
        assert!(is_valid_address(ADDRESS, TURTLECOIN_ADDRESS_PREFIX));
    }

    #[test]
    fn test_checksum_layout() {
        let raw = base58_monero::decode(ADDRESS).unwrap();
        let prefix = crate::varint::encode_varint(TURTLECOIN_ADDRESS_PREFIX);
        assert_eq!(raw.len(), prefix.len() + 2 * KEY_SIZE + ADDRESS_CHECKSUM_SIZE);

        let (body, checksum) = raw.split_at(raw.len() - ADDRESS_CHECKSUM_SIZE);
        assert_eq!(checksum, &cn_fast_hash(body).as_bytes()[..ADDRESS_CHECKSUM_SIZE]);
        assert_eq!(base58_monero::decode_check(ADDRESS).unwrap(), body);
    }

    #[test]
    fn test_wrong_prefix() {
        assert_eq!(
            decode_address(ADDRESS, 18),
            Err(CryptoError::InvalidAddress(AddressError::PrefixMismatch {
                expected: 18,
                found: TURTLECOIN_ADDRESS_PREFIX,
            }))
        );
    }

    #[test]
    fn test_corrupted_character() {
        // Changing one character in the key area breaks the checksum.
        let mut corrupted = ADDRESS.to_string().into_bytes();
        corrupted[40] = if corrupted[40] == b'2' { b'3' } else { b'2' };
        let corrupted = String::from_utf8(corrupted).unwrap();
        assert!(matches!(
            decode_address(&corrupted, TURTLECOIN_ADDRESS_PREFIX),
            Err(CryptoError::InvalidAddress(
                AddressError::ChecksumMismatch | AddressError::InvalidBase58
            ))
        ));
        assert!(!is_valid_address(&corrupted, TURTLECOIN_ADDRESS_PREFIX));
    }

    #[test]
    fn test_truncated() {
        assert!(decode_address(&ADDRESS[..88], TURTLECOIN_ADDRESS_PREFIX).is_err());

        // A well-formed body that is missing the view key.
        let mut body = crate::varint::encode_varint(TURTLECOIN_ADDRESS_PREFIX);
        body.extend_from_slice(&[1u8; 32]);
        let encoded = base58_monero::encode_check(&body).unwrap();
        assert_eq!(
            decode_address(&encoded, TURTLECOIN_ADDRESS_PREFIX),
            Err(CryptoError::InvalidAddress(AddressError::InvalidLength {
                expected: 68,
                actual: 36,
            }))
        );
    }

    #[test]
    fn test_rejects_keys_off_the_curve() {
        let mut bad = address();
        bad.view_public_key = PublicKey([0xff; 32]);
        let encoded = encode_address(TURTLECOIN_ADDRESS_PREFIX, &bad).unwrap();
        assert!(matches!(
            decode_address(&encoded, TURTLECOIN_ADDRESS_PREFIX),
            Err(CryptoError::InvalidEncoding(_))
        ));
    }
}
