//! Secret keys, public keys and key images.

use std::fmt;

use cn_curve::{EdwardsPoint, Random, Scalar};
use rand::CryptoRng;
use serde::{Deserialize, Serialize};

use crate::constants::{KEY_SIZE, SECRET_KEY_SIZE};
use crate::errors::CryptoError;
use crate::hash::{cn_fast_hash, hash_to_ec};

/// A secret key: a scalar strictly below the group order L.
///
/// Construction validates the scalar, so every `SecretKey` in circulation is
/// canonical. Deserialization goes through the same check.
///
/// # Example
///
/// ```
/// use cn_crypto::SecretKey;
///
/// let mut rng = rand::rng();
/// let secret_key = SecretKey::random(&mut rng);
/// let public_key = secret_key.public_key();
/// assert!(cn_crypto::check_key(&public_key));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u8; 32]", into = "[u8; 32]")]
pub struct SecretKey(Scalar);

/// A public key as carried on the wire: 32 compressed point bytes.
///
/// The bytes are not validated on construction, since keys read from the
/// chain can be garbage. Use [`check_key`] or [`PublicKey::decompress`]
/// before relying on them as a point.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; KEY_SIZE]);

/// A key image, `secret_key * HashToEC(public_key)`, in compressed form.
///
/// The same key pair always produces the same image, which is how a network
/// spots a second spend of one output without learning which ring member
/// signed.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct KeyImage(pub [u8; KEY_SIZE]);

/// A secret key together with its public key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub secret_key: SecretKey,
}

impl SecretKey {
    /// Draws a uniformly random secret key.
    pub fn random<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
        SecretKey(Scalar::random(rng))
    }

    /// Accepts only canonical encodings (below L).
    pub fn from_bytes(bytes: [u8; SECRET_KEY_SIZE]) -> Result<Self, CryptoError> {
        Scalar::from_canonical_bytes(bytes)
            .map(SecretKey)
            .ok_or(CryptoError::InvalidScalar)
    }

    /// Reduces arbitrary 32 bytes modulo L. This is how a secret key is
    /// recovered from seed material.
    pub fn from_bytes_mod_order(bytes: [u8; SECRET_KEY_SIZE]) -> Self {
        SecretKey(Scalar::from_bytes_mod_order(bytes))
    }

    /// Wraps the output of scalar arithmetic, which is always reduced.
    pub(crate) fn from_reduced(scalar: Scalar) -> Self {
        debug_assert!(scalar.is_canonical());
        SecretKey(scalar)
    }

    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.0.to_bytes()
    }

    /// secret * B, compressed.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_point(&EdwardsPoint::mul_base(&self.0))
    }
}

impl TryFrom<[u8; SECRET_KEY_SIZE]> for SecretKey {
    type Error = CryptoError;

    fn try_from(bytes: [u8; SECRET_KEY_SIZE]) -> Result<Self, Self::Error> {
        SecretKey::from_bytes(bytes)
    }
}

impl From<SecretKey> for [u8; SECRET_KEY_SIZE] {
    fn from(secret_key: SecretKey) -> Self {
        secret_key.to_bytes()
    }
}

impl std::str::FromStr for SecretKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; SECRET_KEY_SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        SecretKey::from_bytes(bytes)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl PublicKey {
    pub fn from_point(point: &EdwardsPoint) -> Self {
        PublicKey(point.compress())
    }

    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Decodes and validates the point.
    pub fn decompress(&self) -> Result<EdwardsPoint, CryptoError> {
        Ok(EdwardsPoint::decompress(&self.0)?)
    }
}

impl_hex_bytes!(PublicKey);

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&hex::encode(self.0)).finish()
    }
}

impl From<&SecretKey> for PublicKey {
    fn from(secret_key: &SecretKey) -> Self {
        secret_key.public_key()
    }
}

impl KeyImage {
    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    pub fn decompress(&self) -> Result<EdwardsPoint, CryptoError> {
        Ok(EdwardsPoint::decompress(&self.0)?)
    }
}

impl_hex_bytes!(KeyImage);

impl fmt::Debug for KeyImage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("KeyImage").field(&hex::encode(self.0)).finish()
    }
}

impl KeyPair {
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        KeyPair {
            public_key: secret_key.public_key(),
            secret_key,
        }
    }
}

/// Generates a fresh key pair: a uniformly random secret key and its public
/// key.
///
/// # Arguments
///
/// * `rng` - A cryptographically secure random number generator
///
/// # Example
///
/// ```
/// use cn_crypto::{check_key, generate_keys};
///
/// let mut rng = rand::rng();
/// let keys = generate_keys(&mut rng);
/// assert!(check_key(&keys.public_key));
/// ```
pub fn generate_keys<R: CryptoRng + ?Sized>(rng: &mut R) -> KeyPair {
    KeyPair::from_secret_key(SecretKey::random(rng))
}

/// Rebuilds a key pair from 32 bytes of seed material, reducing the seed
/// modulo L to obtain the secret key.
pub fn recover_keys(seed: &[u8; SECRET_KEY_SIZE]) -> KeyPair {
    KeyPair::from_secret_key(SecretKey::from_bytes_mod_order(*seed))
}

/// True if `key` decodes to a point on the curve.
pub fn check_key(key: &PublicKey) -> bool {
    match key.decompress() {
        Ok(_) => true,
        Err(error) => {
            tracing::debug!(%key, %error, "public key failed to decode");
            false
        }
    }
}

/// The public key belonging to `secret_key`.
pub fn secret_key_to_public_key(secret_key: &SecretKey) -> PublicKey {
    secret_key.public_key()
}

/// Derives the view key pair from a spend secret key:
/// `view = Keccak(spend) mod L`.
///
/// Wallets use this so that a single secret (the spend key) restores both
/// halves of an account.
pub fn generate_view_from_spend(spend_secret_key: &SecretKey) -> KeyPair {
    let digest = cn_fast_hash(&spend_secret_key.to_bytes());
    recover_keys(&digest.0)
}

/// `scalar * key`, compressed. No subgroup check is applied to `key`.
///
/// # Arguments
///
/// * `key` - The point to multiply, in compressed form
/// * `scalar` - Any 32-byte scalar; values of 2^255 or more are reduced mod L
///
/// # Returns
///
/// The product on success, or [`CryptoError::InvalidEncoding`] if `key` does
/// not decode to a point.
pub fn scalarmult_key(key: &PublicKey, scalar: &Scalar) -> Result<PublicKey, CryptoError> {
    let point = key.decompress()?;
    Ok(PublicKey::from_point(&(&point * scalar)))
}

/// Computes the key image `secret_key * HashToEC(public_key)`.
///
/// # Arguments
///
/// * `public_key` - The public key being spent
/// * `secret_key` - Its secret key
///
/// # Example
///
/// ```
/// use cn_crypto::{generate_key_image, generate_keys};
///
/// let mut rng = rand::rng();
/// let keys = generate_keys(&mut rng);
/// let image = generate_key_image(&keys.public_key, &keys.secret_key);
/// assert_eq!(image, generate_key_image(&keys.public_key, &keys.secret_key));
/// ```
pub fn generate_key_image(public_key: &PublicKey, secret_key: &SecretKey) -> KeyImage {
    let point = hash_to_ec(public_key);
    KeyImage((&point * secret_key.as_scalar()).compress())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_secret_key_rejects_non_canonical() {
        assert_eq!(
            SecretKey::from_bytes([0xff; 32]),
            Err(CryptoError::InvalidScalar)
        );
        // L itself.
        let l: [u8; 32] = hex::decode("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010")
            .unwrap()
            .try_into()
            .unwrap();
        assert_eq!(SecretKey::from_bytes(l), Err(CryptoError::InvalidScalar));
        assert!(SecretKey::from_bytes_mod_order(l).as_scalar().is_zero());
    }

    #[test]
    fn test_secret_key_hex_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let sk = SecretKey::random(&mut rng);
        let parsed: SecretKey = hex::encode(sk.to_bytes()).parse().unwrap();
        assert_eq!(parsed, sk);
        assert_eq!("zz".parse::<SecretKey>(), Err(CryptoError::InvalidHex));
    }

    #[test]
    fn test_secret_key_debug_is_redacted() {
        let mut rng = StdRng::seed_from_u64(42);
        let sk = SecretKey::random(&mut rng);
        let shown = format!("{sk:?}");
        assert!(!shown.contains(&hex::encode(sk.to_bytes())));
    }

    #[test]
    fn test_public_key_hex_round_trip() {
        let mut rng = StdRng::seed_from_u64(43);
        let keys = generate_keys(&mut rng);
        let text = keys.public_key.to_string();
        assert_eq!(text.len(), 64);
        assert_eq!(text.parse::<PublicKey>().unwrap(), keys.public_key);
        assert_eq!(&text[..4].parse::<PublicKey>(), &Err(CryptoError::InvalidHex));
    }

    #[test]
    fn test_generate_keys_is_consistent() {
        let mut rng = StdRng::seed_from_u64(44);
        let keys = generate_keys(&mut rng);
        assert!(keys.secret_key.as_scalar().is_canonical());
        assert_eq!(secret_key_to_public_key(&keys.secret_key), keys.public_key);
        assert_eq!(PublicKey::from(&keys.secret_key), keys.public_key);
        assert!(check_key(&keys.public_key));
    }

    #[test]
    fn test_check_key_rejects_garbage() {
        let mut not_on_curve = [0u8; 32];
        not_on_curve[0] = 2;
        assert!(!check_key(&PublicKey(not_on_curve)));
        assert!(!check_key(&PublicKey([0xff; 32])));
    }

    #[test]
    fn test_scalarmult_key() {
        let mut rng = StdRng::seed_from_u64(45);
        let a = SecretKey::random(&mut rng);
        let b = SecretKey::random(&mut rng);

        // a * (b * G) == b * (a * G)
        let ab = scalarmult_key(&b.public_key(), a.as_scalar()).unwrap();
        let ba = scalarmult_key(&a.public_key(), b.as_scalar()).unwrap();
        assert_eq!(ab, ba);

        assert_eq!(
            scalarmult_key(&PublicKey([0xff; 32]), a.as_scalar()),
            Err(CryptoError::InvalidEncoding(
                cn_curve::DecompressionError::NonCanonical
            ))
        );
    }

    #[test]
    fn test_key_image_is_deterministic_and_distinct() {
        let mut rng = StdRng::seed_from_u64(46);
        let first = generate_keys(&mut rng);
        let second = generate_keys(&mut rng);

        let image = generate_key_image(&first.public_key, &first.secret_key);
        assert_eq!(image, generate_key_image(&first.public_key, &first.secret_key));
        assert_ne!(
            image,
            generate_key_image(&second.public_key, &second.secret_key)
        );
        assert!(image.decompress().unwrap().is_torsion_free());
    }

    #[test]
    fn test_secret_key_serde_validates() {
        let mut rng = StdRng::seed_from_u64(47);
        let keys = generate_keys(&mut rng);
        let encoded = bincode::serialize(&keys).unwrap();
        let decoded: KeyPair = bincode::deserialize(&encoded).unwrap();
        assert_eq!(decoded, keys);

        let bad = bincode::serialize(&[0xffu8; 32]).unwrap();
        assert!(bincode::deserialize::<SecretKey>(&bad).is_err());
    }
}
