//! Schnorr-style signatures over a 32-byte prefix hash.

use std::fmt;

use cn_curve::{EdwardsPoint, Random, Scalar, vartime_double_scalar_mul_basepoint};
use rand::CryptoRng;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::constants::SIGNATURE_SIZE;
use crate::errors::CryptoError;
use crate::hash::{Hash, finalize_to_scalar};
use crate::keys::{PublicKey, SecretKey};

/// A signature `(c, r)`: challenge scalar followed by response scalar.
///
/// A valid signature satisfies `c == H_s(prefix || P || c*P + r*B)`. The
/// serialized form is the two 32-byte scalars back to back.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    /// The Fiat-Shamir challenge.
    pub c: Scalar,
    /// The response, `k - c * secret_key` for the signing nonce k.
    pub r: Scalar,
}

impl Signature {
    /// Splits 64 bytes into `c` and `r`. The scalars are taken as given;
    /// verification rejects non-canonical ones.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_SIZE]) -> Self {
        let mut c = [0u8; 32];
        let mut r = [0u8; 32];
        c.copy_from_slice(&bytes[..32]);
        r.copy_from_slice(&bytes[32..]);
        Signature {
            c: Scalar::from_bytes(c),
            r: Scalar::from_bytes(r),
        }
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..32].copy_from_slice(self.c.as_bytes());
        bytes[32..].copy_from_slice(self.r.as_bytes());
        bytes
    }

    pub(crate) fn is_canonical(&self) -> bool {
        self.c.is_canonical() && self.r.is_canonical()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

impl std::str::FromStr for Signature {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Signature::from_bytes(&bytes))
    }
}

/// H_s(prefix || key || commitment).
fn signature_challenge(prefix_hash: &Hash, key: &PublicKey, commitment: &[u8; 32]) -> Scalar {
    let mut hasher = Keccak256::new();
    hasher.update(prefix_hash.as_bytes());
    hasher.update(key.as_bytes());
    hasher.update(commitment);
    finalize_to_scalar(hasher)
}

/// Signs `prefix_hash` with `secret_key`.
///
/// `public_key` must be the public key of `secret_key`; otherwise
/// [`CryptoError::KeyMismatch`] is returned, since the signature would never
/// verify. Nonces whose top 32 bits are all zero are redrawn, as are the
/// (negligibly likely) draws that give a zero challenge or response.
///
/// # Arguments
///
/// * `prefix_hash` - The 32-byte hash being signed
/// * `public_key` - The public key of `secret_key`
/// * `secret_key` - The signing key
/// * `rng` - A cryptographically secure random number generator for the nonce
///
/// # Returns
///
/// Returns the signature on success, or [`CryptoError::KeyMismatch`] if
/// `public_key` does not belong to `secret_key`.
///
/// # Example
///
/// ```
/// use cn_crypto::{cn_fast_hash, check_signature, generate_keys, generate_signature};
///
/// let mut rng = rand::rng();
/// let keys = generate_keys(&mut rng);
/// let prefix = cn_fast_hash(b"transaction prefix");
///
/// let signature = generate_signature(&prefix, &keys.public_key, &keys.secret_key, &mut rng)?;
/// assert!(check_signature(&prefix, &keys.public_key, &signature));
/// # Ok::<(), cn_crypto::CryptoError>(())
/// ```
pub fn generate_signature<R: CryptoRng + ?Sized>(
    prefix_hash: &Hash,
    public_key: &PublicKey,
    secret_key: &SecretKey,
    rng: &mut R,
) -> Result<Signature, CryptoError> {
    if secret_key.public_key() != *public_key {
        tracing::debug!(%public_key, "signing key does not match public key");
        return Err(CryptoError::KeyMismatch);
    }

    loop {
        let k = Scalar::random(rng);
        if k.as_bytes()[28..].iter().all(|&b| b == 0) {
            continue;
        }

        let commitment = EdwardsPoint::mul_base(&k).compress();
        let c = signature_challenge(prefix_hash, public_key, &commitment);
        if c.is_zero() {
            continue;
        }

        let r = Scalar::mul_sub(&c, secret_key.as_scalar(), &k);
        if r.is_zero() {
            continue;
        }

        return Ok(Signature { c, r });
    }
}

/// Verifies a signature produced by [`generate_signature`].
///
/// # Arguments
///
/// * `prefix_hash` - The hash that was signed
/// * `public_key` - The claimed signer
/// * `signature` - The signature to check
///
/// # Returns
///
/// `true` only if the signature is valid. Fails closed: an undecodable public
/// key, non-canonical or zero scalars, and a commitment at the identity all
/// yield `false`.
pub fn check_signature(prefix_hash: &Hash, public_key: &PublicKey, signature: &Signature) -> bool {
    let point = match public_key.decompress() {
        Ok(point) => point,
        Err(error) => {
            tracing::debug!(%public_key, %error, "signature public key failed to decode");
            return false;
        }
    };

    if !signature.is_canonical() {
        tracing::debug!("signature scalars are not canonical");
        return false;
    }
    if signature.c.is_zero() {
        tracing::debug!("signature challenge is zero");
        return false;
    }

    let commitment = vartime_double_scalar_mul_basepoint(&signature.c, &point, &signature.r);
    if commitment.is_identity() {
        tracing::debug!("signature commitment is the identity");
        return false;
    }

    let c = signature_challenge(prefix_hash, public_key, &commitment.compress());
    let valid = (c - signature.c).is_zero();
    if !valid {
        tracing::trace!(%public_key, "signature challenge mismatch");
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_keys;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_signature_bytes_layout() {
        let signature = Signature {
            c: Scalar::from(1u64),
            r: Scalar::from(2u64),
        };
        let bytes = signature.to_bytes();
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[32], 2);
        assert_eq!(Signature::from_bytes(&bytes), signature);

        let text = signature.to_string();
        assert_eq!(text.len(), 128);
        assert_eq!(text.parse::<Signature>().unwrap(), signature);
    }

    #[test]
    fn test_signature_rejects_mismatched_key() {
        let mut rng = StdRng::seed_from_u64(7);
        let keys = generate_keys(&mut rng);
        let other = generate_keys(&mut rng);
        let prefix = Hash([3u8; 32]);
        assert_eq!(
            generate_signature(&prefix, &other.public_key, &keys.secret_key, &mut rng),
            Err(CryptoError::KeyMismatch)
        );
    }

    #[test]
    fn test_check_signature_rejects_zero_signature() {
        let mut rng = StdRng::seed_from_u64(8);
        let keys = generate_keys(&mut rng);
        let prefix = Hash([4u8; 32]);
        assert!(!check_signature(&prefix, &keys.public_key, &Signature::default()));
    }

    #[test]
    fn test_check_signature_rejects_non_canonical_response() {
        let mut rng = StdRng::seed_from_u64(9);
        let keys = generate_keys(&mut rng);
        let prefix = Hash([5u8; 32]);
        let mut signature =
            generate_signature(&prefix, &keys.public_key, &keys.secret_key, &mut rng).unwrap();

        // r + L denotes the same residue but is not the canonical encoding.
        let l = cn_curve::Scalar::from_bytes(
            hex::decode("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010")
                .unwrap()
                .try_into()
                .unwrap(),
        );
        let mut carry = 0u16;
        let mut bytes = [0u8; 32];
        for i in 0..32 {
            let sum = u16::from(signature.r.as_bytes()[i]) + u16::from(l.as_bytes()[i]) + carry;
            bytes[i] = sum as u8;
            carry = sum >> 8;
        }
        assert_eq!(carry, 0);
        signature.r = Scalar::from_bytes(bytes);
        assert!(!check_signature(&prefix, &keys.public_key, &signature));
    }
}
