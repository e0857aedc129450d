use super::*;
use cn_curve::{EdwardsPoint, Scalar};
use rand::SeedableRng;
use rand::rngs::StdRng;

const SPEND_SECRET: &str = "4318e9ea979c6a478b224b233fa1c19fe19508a93caf95899ba90c1e32db1e02";
const SPEND_PUBLIC: &str = "797ac2197f99fd3195df874339eeec94b56d1cfa92bda95d2059f3ec77df11ca";
const VIEW_SECRET: &str = "c146c0d0dd355ffcf33711dcddca665c7516231b56f1f1cdd367839c390fa805";
const VIEW_PUBLIC: &str = "b7d8b5530556df7d9ccfaea9fd658a67f8d1e1a9722aa95bab4d4b15186ce9cb";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn spend_secret() -> SecretKey {
    SPEND_SECRET.parse().expect("valid secret key")
}

/// The point (0, -1), of order 2.
fn order_two_point() -> EdwardsPoint {
    let mut bytes = [0xffu8; 32];
    bytes[0] = 0xec;
    bytes[31] = 0x7f;
    EdwardsPoint::decompress(&bytes).expect("valid point")
}

fn ring_with_signer(
    rng: &mut StdRng,
    signer: &KeyPair,
    size: usize,
    real_index: usize,
) -> Vec<PublicKey> {
    let mut ring: Vec<PublicKey> = (0..size).map(|_| generate_keys(rng).public_key).collect();
    ring[real_index] = signer.public_key;
    ring
}

#[test]
fn test_public_key_vector() {
    let secret_key = spend_secret();
    assert_eq!(secret_key_to_public_key(&secret_key).to_string(), SPEND_PUBLIC);
    assert_eq!(recover_keys(&secret_key.to_bytes()).public_key.to_string(), SPEND_PUBLIC);
}

#[test]
fn test_view_key_from_spend_vector() {
    let view = generate_view_from_spend(&spend_secret());
    assert_eq!(hex::encode(view.secret_key.to_bytes()), VIEW_SECRET);
    assert_eq!(view.public_key.to_string(), VIEW_PUBLIC);
}

#[test]
fn test_key_image_vector() {
    let public_key: PublicKey = SPEND_PUBLIC.parse().unwrap();
    let image = generate_key_image(&public_key, &spend_secret());
    assert_eq!(
        image.to_string(),
        "bf9ebf8f3274c27f28f0ea1162fac327a46cfb67e6839768b1ebf8793e34ce59"
    );
}

#[test]
fn test_derivation_vectors() {
    let spend_public: PublicKey = SPEND_PUBLIC.parse().unwrap();
    let view_secret: SecretKey = VIEW_SECRET.parse().unwrap();
    let derivation = generate_key_derivation(&spend_public, &view_secret).unwrap();
    assert_eq!(
        derivation.to_string(),
        "13071efea3aeffb0e6e4df451ce58c17b694741298d08508dfe82a326bba7b1b"
    );

    let vectors = [
        (
            0,
            "dffb1dfebc5aeff0a840e360292da9c97b092b7dc211f234a2ad950ff4035905",
            "e5b544f0b9199fae0ef21eeb8c185257f13ff5d0f4422efffdd74bb4c587be60",
            "221407e954f7593834632e8468ce6a695d9f3326ffc087be3d57a22d26df7707",
        ),
        (
            1,
            "17121ec0ff7d9b940fb343e1b9fdc49b72a1e48bec602afd5ed544056f31fc07",
            "cdc3272859f92e63632860cb6af7a413183285c30519510ee80b38d0e0cd6f28",
            "5a2a07ab971a06dc9ad58e04f99e863b5437ed342910c086fa7e5123a10c1b0a",
        ),
        (
            300,
            "31527f3f30748dd332cdc1ff5c4c44309f70723c7b3a93e58d5fb9a4368ae106",
            "d312c8d2d251417bc02d60f64624487671e00d70aafe75567bc7c0ff7d66695e",
            "746a682ac810f81abeef0c239ced05d080067be5b7e9286f2909c6c268650009",
        ),
    ];
    for (index, scalar, public_key, secret_key) in vectors {
        assert_eq!(hex::encode(derivation_to_scalar(&derivation, index).to_bytes()), scalar);
        assert_eq!(
            derive_public_key(&derivation, index, &spend_public).unwrap().to_string(),
            public_key
        );
        assert_eq!(
            hex::encode(derive_secret_key(&derivation, index, &spend_secret()).to_bytes()),
            secret_key
        );
    }
}

#[test]
fn test_public_key_round_trip() {
    let mut rng = StdRng::seed_from_u64(100);
    for _ in 0..8 {
        let keys = generate_keys(&mut rng);
        let point = keys.public_key.decompress().unwrap();
        assert_eq!(PublicKey::from_point(&point), keys.public_key);
        assert_eq!(point, EdwardsPoint::mul_base(keys.secret_key.as_scalar()));
    }
}

#[test]
fn test_hash_to_scalar_is_reduced() {
    let inputs: [&[u8]; 3] = [b"", b"a", &[0xff; 200]];
    for input in inputs {
        assert!(hash_to_scalar(input).is_canonical());
    }
}

#[test]
fn test_sign_verify() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(42);
    let keys = generate_keys(&mut rng);
    let prefix = cn_fast_hash(b"transaction prefix");

    let signature = generate_signature(&prefix, &keys.public_key, &keys.secret_key, &mut rng).unwrap();
    assert!(check_signature(&prefix, &keys.public_key, &signature));
}

#[test]
fn test_verify_rejects_wrong_prefix() {
    let mut rng = StdRng::seed_from_u64(43);
    let keys = generate_keys(&mut rng);
    let prefix = cn_fast_hash(b"first");
    let signature = generate_signature(&prefix, &keys.public_key, &keys.secret_key, &mut rng).unwrap();

    assert!(!check_signature(&cn_fast_hash(b"second"), &keys.public_key, &signature));
}

#[test]
fn test_verify_rejects_wrong_key() {
    let mut rng = StdRng::seed_from_u64(44);
    let keys = generate_keys(&mut rng);
    let other = generate_keys(&mut rng);
    let prefix = cn_fast_hash(b"prefix");
    let signature = generate_signature(&prefix, &keys.public_key, &keys.secret_key, &mut rng).unwrap();

    assert!(!check_signature(&prefix, &other.public_key, &signature));
    assert!(!check_signature(&prefix, &PublicKey([0xff; 32]), &signature));
}

#[test]
fn test_verify_rejects_every_single_bit_flip() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(45);
    let keys = generate_keys(&mut rng);
    let prefix = cn_fast_hash(b"tamper");
    let signature = generate_signature(&prefix, &keys.public_key, &keys.secret_key, &mut rng).unwrap();
    let bytes = signature.to_bytes();

    for bit in 0..SIGNATURE_SIZE * 8 {
        let mut tampered = bytes;
        tampered[bit / 8] ^= 1 << (bit % 8);
        let tampered = Signature::from_bytes(&tampered);
        assert!(
            !check_signature(&prefix, &keys.public_key, &tampered),
            "bit {bit} flip accepted"
        );
    }
}

#[test]
fn test_signatures_are_randomized() {
    let mut rng = StdRng::seed_from_u64(46);
    let keys = generate_keys(&mut rng);
    let prefix = cn_fast_hash(b"nonce");
    let first = generate_signature(&prefix, &keys.public_key, &keys.secret_key, &mut rng).unwrap();
    let second = generate_signature(&prefix, &keys.public_key, &keys.secret_key, &mut rng).unwrap();
    assert_ne!(first, second);
    assert!(check_signature(&prefix, &keys.public_key, &first));
    assert!(check_signature(&prefix, &keys.public_key, &second));
}

#[test]
fn test_key_image_links_signer() {
    let mut rng = StdRng::seed_from_u64(47);
    let keys = generate_keys(&mut rng);
    let image = generate_key_image(&keys.public_key, &keys.secret_key);
    assert_eq!(image, generate_key_image(&keys.public_key, &keys.secret_key));

    // A different secret for the same public key gives a different image.
    let other = generate_keys(&mut rng);
    assert_ne!(image, generate_key_image(&keys.public_key, &other.secret_key));
}

#[test]
fn test_ring_signature_end_to_end() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(48);
    let signer = generate_keys(&mut rng);
    let image = generate_key_image(&signer.public_key, &signer.secret_key);
    let prefix = cn_fast_hash(b"ring");

    for (size, real_index) in [(1, 0), (3, 2), (5, 1)] {
        let ring = ring_with_signer(&mut rng, &signer, size, real_index);
        let signatures =
            generate_ring_signatures(&prefix, &image, &ring, &signer.secret_key, real_index, &mut rng)
                .unwrap();
        assert_eq!(signatures.len(), size);
        assert!(check_ring_signatures(&prefix, &image, &ring, &signatures));
    }
}

#[test]
fn test_ring_signature_rejects_tampering() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(49);
    let signer = generate_keys(&mut rng);
    let image = generate_key_image(&signer.public_key, &signer.secret_key);
    let prefix = cn_fast_hash(b"ring tamper");
    let ring = ring_with_signer(&mut rng, &signer, 4, 2);
    let signatures =
        generate_ring_signatures(&prefix, &image, &ring, &signer.secret_key, 2, &mut rng).unwrap();
    assert!(check_ring_signatures(&prefix, &image, &ring, &signatures));

    // Any public key.
    for i in 0..ring.len() {
        let mut tampered = ring.clone();
        tampered[i] = generate_keys(&mut rng).public_key;
        assert!(!check_ring_signatures(&prefix, &image, &tampered, &signatures));
    }

    // Any scalar.
    for i in 0..signatures.len() {
        let mut tampered = signatures.clone();
        tampered[i].c += Scalar::ONE;
        assert!(!check_ring_signatures(&prefix, &image, &ring, &tampered));

        let mut tampered = signatures.clone();
        tampered[i].r += Scalar::ONE;
        assert!(!check_ring_signatures(&prefix, &image, &ring, &tampered));
    }

    // The key image.
    let other = generate_keys(&mut rng);
    let other_image = generate_key_image(&other.public_key, &other.secret_key);
    assert!(!check_ring_signatures(&prefix, &other_image, &ring, &signatures));

    // The prefix.
    assert!(!check_ring_signatures(&cn_fast_hash(b"other"), &image, &ring, &signatures));

    // Reordering the ring.
    let mut reordered = ring.clone();
    reordered.swap(0, 3);
    assert!(!check_ring_signatures(&prefix, &image, &reordered, &signatures));
}

#[test]
fn test_ring_signature_rejects_small_order_image() {
    let mut rng = StdRng::seed_from_u64(50);
    let signer = generate_keys(&mut rng);
    let image = generate_key_image(&signer.public_key, &signer.secret_key);
    let prefix = cn_fast_hash(b"torsion");
    let ring = ring_with_signer(&mut rng, &signer, 3, 0);
    let signatures =
        generate_ring_signatures(&prefix, &image, &ring, &signer.secret_key, 0, &mut rng).unwrap();

    let shifted = image.decompress().unwrap() + order_two_point();
    let shifted = KeyImage(shifted.compress());
    assert!(shifted.decompress().is_ok());
    assert!(!check_ring_signatures(&prefix, &shifted, &ring, &signatures));

    let identity = KeyImage(EdwardsPoint::IDENTITY.compress());
    assert!(!check_ring_signatures(&prefix, &KeyImage([0xff; 32]), &ring, &signatures));
    assert!(!check_ring_signatures(&prefix, &identity, &ring, &signatures));
}

#[test]
fn test_ring_signature_rejects_malformed_input() {
    let mut rng = StdRng::seed_from_u64(51);
    let signer = generate_keys(&mut rng);
    let image = generate_key_image(&signer.public_key, &signer.secret_key);
    let prefix = cn_fast_hash(b"shape");
    let ring = ring_with_signer(&mut rng, &signer, 3, 1);
    let signatures =
        generate_ring_signatures(&prefix, &image, &ring, &signer.secret_key, 1, &mut rng).unwrap();

    assert!(!check_ring_signatures(&prefix, &image, &ring[..2], &signatures));
    assert!(!check_ring_signatures(&prefix, &image, &ring, &signatures[..2]));
    assert!(!check_ring_signatures(&prefix, &image, &[], &[]));

    let mut non_canonical = signatures.clone();
    non_canonical[0].r = Scalar::from_bytes([0xff; 32]);
    assert!(!check_ring_signatures(&prefix, &image, &ring, &non_canonical));

    let mut undecodable = ring.clone();
    undecodable[0] = PublicKey([0xff; 32]);
    assert!(!check_ring_signatures(&prefix, &image, &undecodable, &signatures));

    assert_eq!(
        generate_ring_signatures(&prefix, &image, &ring, &signer.secret_key, 7, &mut rng),
        Err(CryptoError::RingIndexOutOfRange { index: 7, size: 3 })
    );
}

#[test]
fn test_address_round_trip() {
    let mut rng = StdRng::seed_from_u64(52);
    let spend = generate_keys(&mut rng);
    let view = generate_view_from_spend(&spend.secret_key);
    let address = PublicAddress {
        spend_public_key: spend.public_key,
        view_public_key: view.public_key,
    };

    let encoded = encode_address(TURTLECOIN_ADDRESS_PREFIX, &address).unwrap();
    assert!(encoded.starts_with("TRTL"));
    assert_eq!(encoded.len(), 99);
    assert_eq!(decode_address(&encoded, TURTLECOIN_ADDRESS_PREFIX), Ok(address));
}

#[test]
fn test_serde_round_trips() {
    let mut rng = StdRng::seed_from_u64(53);
    let keys = generate_keys(&mut rng);
    let prefix = cn_fast_hash(b"serde");
    let signature = generate_signature(&prefix, &keys.public_key, &keys.secret_key, &mut rng).unwrap();
    let image = generate_key_image(&keys.public_key, &keys.secret_key);

    let bytes = bincode::serialize(&signature).unwrap();
    assert_eq!(bytes.len(), SIGNATURE_SIZE);
    assert_eq!(bincode::deserialize::<Signature>(&bytes).unwrap(), signature);

    let bytes = bincode::serialize(&image).unwrap();
    assert_eq!(bincode::deserialize::<KeyImage>(&bytes).unwrap(), image);

    let bytes = bincode::serialize(&keys).unwrap();
    assert_eq!(bincode::deserialize::<KeyPair>(&bytes).unwrap(), keys);
}
