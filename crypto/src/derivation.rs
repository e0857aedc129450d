//! One-time output keys.
//!
//! A sender holding the transaction secret `r` and a recipient holding the
//! view secret `a` share the derivation `D = 8 * r * A = 8 * a * R`. From `D`
//! and an output index both sides compute `H_s(D || varint(index))` and offset
//! the recipient's spend key by it, so every output gets an unlinkable key
//! that only the recipient can spend.

use std::fmt;

use cn_curve::{EdwardsPoint, Scalar};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::constants::KEY_SIZE;
use crate::errors::CryptoError;
use crate::hash::finalize_to_scalar;
use crate::keys::{PublicKey, SecretKey};
use crate::varint::encode_varint;

/// A shared secret point `8 * secret * P`, compressed.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct KeyDerivation(pub [u8; KEY_SIZE]);

impl KeyDerivation {
    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl_hex_bytes!(KeyDerivation);

impl fmt::Debug for KeyDerivation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("KeyDerivation(..)")
    }
}

/// `8 * secret_key * key`.
pub fn generate_key_derivation(
    key: &PublicKey,
    secret_key: &SecretKey,
) -> Result<KeyDerivation, CryptoError> {
    let point = key.decompress()?;
    let shared = (&point * secret_key.as_scalar()).mul_by_cofactor();
    Ok(KeyDerivation(shared.compress()))
}

/// `H_s(derivation || varint(output_index))`.
pub fn derivation_to_scalar(derivation: &KeyDerivation, output_index: u64) -> Scalar {
    let mut hasher = Keccak256::new();
    hasher.update(derivation.as_bytes());
    hasher.update(encode_varint(output_index));
    finalize_to_scalar(hasher)
}

/// The one-time public key `base + H_s(D, index) * B` of an output.
pub fn derive_public_key(
    derivation: &KeyDerivation,
    output_index: u64,
    base: &PublicKey,
) -> Result<PublicKey, CryptoError> {
    let base = base.decompress()?;
    let offset = EdwardsPoint::mul_base(&derivation_to_scalar(derivation, output_index));
    Ok(PublicKey::from_point(&(&base + &offset)))
}

/// The one-time secret key `base + H_s(D, index)` matching
/// [`derive_public_key`].
pub fn derive_secret_key(derivation: &KeyDerivation, output_index: u64, base: &SecretKey) -> SecretKey {
    let scalar = derivation_to_scalar(derivation, output_index) + *base.as_scalar();
    SecretKey::from_reduced(scalar)
}

/// Recovers the base spend key from a one-time public key:
/// `derived - H_s(D, index) * B`. Lets a wallet test whether an output is
/// addressed to it.
pub fn underive_public_key(
    derivation: &KeyDerivation,
    output_index: u64,
    derived: &PublicKey,
) -> Result<PublicKey, CryptoError> {
    let derived = derived.decompress()?;
    let offset = EdwardsPoint::mul_base(&derivation_to_scalar(derivation, output_index));
    Ok(PublicKey::from_point(&(&derived - &offset)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_keys;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_both_sides_agree() {
        let mut rng = StdRng::seed_from_u64(21);
        let tx = generate_keys(&mut rng);
        let view = generate_keys(&mut rng);

        let sender = generate_key_derivation(&view.public_key, &tx.secret_key).unwrap();
        let recipient = generate_key_derivation(&tx.public_key, &view.secret_key).unwrap();
        assert_eq!(sender, recipient);
    }

    #[test]
    fn test_derived_keys_match() {
        let mut rng = StdRng::seed_from_u64(22);
        let tx = generate_keys(&mut rng);
        let spend = generate_keys(&mut rng);
        let derivation = generate_key_derivation(&spend.public_key, &tx.secret_key).unwrap();

        for index in [0, 1, 2, 127, 128, 1 << 40] {
            let public_key = derive_public_key(&derivation, index, &spend.public_key).unwrap();
            let secret_key = derive_secret_key(&derivation, index, &spend.secret_key);
            assert_eq!(secret_key.public_key(), public_key);
            assert_eq!(
                underive_public_key(&derivation, index, &public_key).unwrap(),
                spend.public_key
            );
        }
    }

    #[test]
    fn test_indices_give_distinct_keys() {
        let mut rng = StdRng::seed_from_u64(23);
        let spend = generate_keys(&mut rng);
        let derivation = KeyDerivation([9u8; 32]);
        let first = derive_public_key(&derivation, 0, &spend.public_key).unwrap();
        let second = derive_public_key(&derivation, 1, &spend.public_key).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_rejects_undecodable_keys() {
        let mut rng = StdRng::seed_from_u64(24);
        let keys = generate_keys(&mut rng);
        let garbage = PublicKey([0xff; 32]);
        assert!(generate_key_derivation(&garbage, &keys.secret_key).is_err());
        assert!(derive_public_key(&KeyDerivation::default(), 0, &garbage).is_err());
        assert!(underive_public_key(&KeyDerivation::default(), 0, &garbage).is_err());
    }
}
