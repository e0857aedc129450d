//! Keccak-256 hashing and the hash-derived scalars and points built on it.

use std::fmt;

use cn_curve::{EdwardsPoint, Scalar, map_to_point};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::constants::HASH_SIZE;
use crate::keys::PublicKey;

/// A 32-byte Keccak-256 digest, such as a transaction prefix hash.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Hash(pub [u8; HASH_SIZE]);

impl Hash {
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl_hex_bytes!(Hash);

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Hash").field(&hex::encode(self.0)).finish()
    }
}

/// Keccak-256 with the original (pre-SHA-3) padding, CryptoNote's
/// `cn_fast_hash`.
pub fn cn_fast_hash(data: &[u8]) -> Hash {
    Hash(Keccak256::digest(data).into())
}

/// Keccak-256 of `data` reduced modulo the group order.
pub fn hash_to_scalar(data: &[u8]) -> Scalar {
    Scalar::from_bytes_mod_order(cn_fast_hash(data).0)
}

/// Finishes an incremental Keccak-256 and reduces the digest modulo the group
/// order. Lets callers hash long transcripts without building one buffer.
pub(crate) fn finalize_to_scalar(hasher: Keccak256) -> Scalar {
    Scalar::from_bytes_mod_order(hasher.finalize().into())
}

/// Maps arbitrary bytes into the prime-order subgroup: Keccak-256, the
/// CryptoNote point map, then multiplication by the cofactor.
pub fn hash_data_to_ec(data: &[u8]) -> EdwardsPoint {
    map_to_point(&cn_fast_hash(data).0)
}

/// Hashes a public key onto the curve. The key's bytes are hashed as given;
/// they do not need to decode to a point.
pub fn hash_to_ec(key: &PublicKey) -> EdwardsPoint {
    hash_data_to_ec(key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cn_fast_hash_vectors() {
        assert_eq!(
            cn_fast_hash(b"").to_string(),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_ne!(cn_fast_hash(b"a"), cn_fast_hash(b"b"));
    }

    #[test]
    fn test_hash_to_scalar_vectors() {
        let vectors: [(&[u8], &str); 2] = [
            (
                b"",
                "4a078e76cd41a3d3b534b83dc6f2ea2de500b653ca82273b7bfad8045d85a400",
            ),
            (
                b"abc",
                "9ab38d0681b95fef6d619d1cace05a14c0d1e6e33a64a036ec44f58fa12d6c05",
            ),
        ];
        for (input, expected) in vectors {
            let s = hash_to_scalar(input);
            assert!(s.is_canonical());
            assert_eq!(hex::encode(s.to_bytes()), expected);
        }
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let mut hasher = Keccak256::new();
        hasher.update(b"ring ");
        hasher.update(b"transcript");
        assert_eq!(finalize_to_scalar(hasher), hash_to_scalar(b"ring transcript"));
    }

    #[test]
    fn test_hash_to_ec_vector() {
        let key: PublicKey = "797ac2197f99fd3195df874339eeec94b56d1cfa92bda95d2059f3ec77df11ca"
            .parse()
            .unwrap();
        let point = hash_to_ec(&key);
        assert!(point.is_torsion_free());
        assert_eq!(
            hex::encode(point.compress()),
            "c75fd96e4332af55f55add4f76a125853524241b1c9a103d8f4c57531c32a637"
        );
    }

    #[test]
    fn test_pedersen_generator_h() {
        // H = 8 * decompress(Keccak(G)), the second generator of RingCT.
        let g = EdwardsPoint::basepoint().compress();
        let h = EdwardsPoint::decompress(&cn_fast_hash(&g).0)
            .unwrap()
            .mul_by_cofactor();
        assert_eq!(
            hex::encode(h.compress()),
            "8b655970153799af2aeadc9ff1add0ea6c7251d54154cfa92c173a0dd39c1f94"
        );
    }
}
