use cn_crypto::{
    PublicAddress, Signature, TURTLECOIN_ADDRESS_PREFIX, check_signature, cn_fast_hash,
    decode_address, encode_address, generate_keys, generate_signature, generate_view_from_spend,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let spend = generate_keys(&mut rng);
    let view = generate_view_from_spend(&spend.secret_key);

    let address = PublicAddress {
        spend_public_key: spend.public_key,
        view_public_key: view.public_key,
    };
    let encoded = encode_address(TURTLECOIN_ADDRESS_PREFIX, &address).expect("encode address");
    println!("address: {encoded}");
    let decoded = decode_address(&encoded, TURTLECOIN_ADDRESS_PREFIX).expect("decode address");
    assert_eq!(decoded, address);

    let spend_bytes = bincode::serialize(&spend).expect("serialize keys");
    let prefix = cn_fast_hash(b"hello cryptonote");
    let sig = generate_signature(&prefix, &spend.public_key, &spend.secret_key, &mut rng).expect("sign");
    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");

    let spend2: cn_crypto::KeyPair = bincode::deserialize(&spend_bytes).expect("deserialize keys");
    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");

    assert!(check_signature(&prefix, &spend2.public_key, &sig2));
    println!("signature: {sig2}");
}
