//! Linkable ring signatures.
//!
//! A ring signature proves that one of N public keys signed a prefix hash,
//! without revealing which, and binds the proof to the signer's key image so
//! that two signatures by the same key are linkable. The signature is one
//! `(c, r)` pair per ring member:
//!
//! ```text
//! L_i = c_i * P_i + r_i * B
//! R_i = r_i * H(P_i) + c_i * I
//! sum c_i == H_s(prefix || L_0 || R_0 || ... || L_{n-1} || R_{n-1})
//! ```
//!
//! All but the real member's pairs are random; the real member's pair is fixed
//! afterwards so that the challenge sum closes.

use cn_curve::{
    EdwardsPoint, OddMultiples, Random, Scalar, vartime_double_scalar_mul,
    vartime_double_scalar_mul_basepoint,
};
use rand::CryptoRng;
use sha3::{Digest, Keccak256};

use crate::errors::CryptoError;
use crate::hash::{Hash, finalize_to_scalar, hash_to_ec};
use crate::keys::{KeyImage, PublicKey, SecretKey, generate_key_image};
use crate::signatures::Signature;

/// Signs `prefix_hash` as one anonymous member of `public_keys`.
///
/// `secret_key` must belong to `public_keys[real_index]` and `key_image` must
/// be its key image. Random scalars are drawn for every member in ring order
/// whatever the real index is, so the randomness consumed does not depend on
/// which member signs.
///
/// # Arguments
///
/// * `prefix_hash` - The transaction prefix hash being signed
/// * `key_image` - The key image of the real member
/// * `public_keys` - The ring, real member included
/// * `secret_key` - The real member's secret key
/// * `real_index` - Position of the real member in `public_keys`
/// * `rng` - A cryptographically secure random number generator
///
/// # Returns
///
/// One signature per ring member, in ring order, or:
/// - [`CryptoError::EmptyRing`] for an empty ring
/// - [`CryptoError::RingIndexOutOfRange`] for a bad index
/// - [`CryptoError::KeyMismatch`] if the secret key does not match the real
///   member or the key image
/// - [`CryptoError::InvalidEncoding`] if a ring key does not decode
pub fn generate_ring_signatures<R: CryptoRng + ?Sized>(
    prefix_hash: &Hash,
    key_image: &KeyImage,
    public_keys: &[PublicKey],
    secret_key: &SecretKey,
    real_index: usize,
    rng: &mut R,
) -> Result<Vec<Signature>, CryptoError> {
    if public_keys.is_empty() {
        return Err(CryptoError::EmptyRing);
    }
    if real_index >= public_keys.len() {
        tracing::debug!(real_index, ring_size = public_keys.len(), "real index out of range");
        return Err(CryptoError::RingIndexOutOfRange {
            index: real_index,
            size: public_keys.len(),
        });
    }
    let real_key = &public_keys[real_index];
    if secret_key.public_key() != *real_key {
        tracing::debug!(%real_key, "secret key does not match the real ring member");
        return Err(CryptoError::KeyMismatch);
    }
    if generate_key_image(real_key, secret_key) != *key_image {
        tracing::debug!(%key_image, "secret key does not match the key image");
        return Err(CryptoError::KeyMismatch);
    }

    let image_table = OddMultiples::new(&key_image.decompress()?);

    let k = Scalar::random(rng);
    let mut signatures = Vec::with_capacity(public_keys.len());
    let mut hasher = Keccak256::new();
    hasher.update(prefix_hash.as_bytes());
    let mut sum = Scalar::ZERO;

    for (i, key) in public_keys.iter().enumerate() {
        let c = Scalar::random(rng);
        let r = Scalar::random(rng);
        let point = key.decompress()?;
        let key_hash = hash_to_ec(key);

        let (l, rr) = if i == real_index {
            (
                EdwardsPoint::mul_base(&k).compress(),
                (&key_hash * &k).compress(),
            )
        } else {
            sum += c;
            (
                vartime_double_scalar_mul_basepoint(&c, &point, &r).compress(),
                vartime_double_scalar_mul(&r, &key_hash, &c, &image_table).compress(),
            )
        };
        hasher.update(l);
        hasher.update(rr);
        signatures.push(Signature { c, r });
    }

    let h = finalize_to_scalar(hasher);
    let c = h - sum;
    let r = Scalar::mul_sub(&c, secret_key.as_scalar(), &k);
    signatures[real_index] = Signature { c, r };

    tracing::trace!(ring_size = public_keys.len(), "generated ring signature");
    Ok(signatures)
}

/// Verifies a ring signature produced by [`generate_ring_signatures`].
///
/// # Arguments
///
/// * `prefix_hash` - The hash that was signed
/// * `key_image` - The key image the signature is bound to
/// * `public_keys` - The ring
/// * `signatures` - One signature per ring member
///
/// # Returns
///
/// `false` when the ring is empty or misaligned with the signatures,
/// when the key image does not decode or lies outside the prime-order
/// subgroup, when any scalar is non-canonical, when any ring key does not
/// decode, and when the challenges do not sum to the transcript hash.
pub fn check_ring_signatures(
    prefix_hash: &Hash,
    key_image: &KeyImage,
    public_keys: &[PublicKey],
    signatures: &[Signature],
) -> bool {
    if public_keys.len() != signatures.len() {
        tracing::debug!(
            keys = public_keys.len(),
            signatures = signatures.len(),
            "ring size mismatch"
        );
        return false;
    }
    if public_keys.is_empty() {
        tracing::debug!("empty ring");
        return false;
    }

    let image = match key_image.decompress() {
        Ok(image) => image,
        Err(error) => {
            tracing::debug!(%key_image, %error, "key image failed to decode");
            return false;
        }
    };
    let image_table = OddMultiples::new(&image);
    if !image_table.is_torsion_free() {
        tracing::debug!(%key_image, "key image is not in the prime-order subgroup");
        return false;
    }

    let mut hasher = Keccak256::new();
    hasher.update(prefix_hash.as_bytes());
    let mut sum = Scalar::ZERO;

    for (i, (key, signature)) in public_keys.iter().zip(signatures).enumerate() {
        if !signature.is_canonical() {
            tracing::debug!(index = i, "ring signature scalars are not canonical");
            return false;
        }
        let point = match key.decompress() {
            Ok(point) => point,
            Err(error) => {
                tracing::debug!(index = i, %key, %error, "ring member key failed to decode");
                return false;
            }
        };

        let l = vartime_double_scalar_mul_basepoint(&signature.c, &point, &signature.r);
        let rr = vartime_double_scalar_mul(&signature.r, &hash_to_ec(key), &signature.c, &image_table);
        hasher.update(l.compress());
        hasher.update(rr.compress());
        sum += signature.c;
    }

    let h = finalize_to_scalar(hasher);
    let valid = (h - sum).is_zero();
    if !valid {
        tracing::trace!(ring_size = public_keys.len(), "ring challenge mismatch");
    }
    valid
}
