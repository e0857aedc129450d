//! Sizes of the wire encodings and network constants.

/// Size of a compressed public key, key image or key derivation in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of a serialized secret key in bytes.
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of a Keccak-256 digest in bytes.
pub const HASH_SIZE: usize = 32;

/// Size of a serialized signature in bytes: challenge c followed by response r.
pub const SIGNATURE_SIZE: usize = 64;

/// Number of Keccak-256 bytes appended to an address as a checksum.
pub const ADDRESS_CHECKSUM_SIZE: usize = 4;

/// Base58 address prefix of the TurtleCoin main network. Encodes to
/// addresses starting with "TRTL".
pub const TURTLECOIN_ADDRESS_PREFIX: u64 = 0x3bbb1d;
