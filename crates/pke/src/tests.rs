// File: crates/pke/src/tests.rs

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::*;

fn round_trip<P: ParamSet>(tag: &str) {
    let mut rng = ChaChaRng::seed_from_u64(0xC0FFEE);
    for _ in 0..4 {
        let mut seed = [0u8; SEED_SIZE];
        let mut msg = [0u8; MESSAGE_SIZE];
        let mut coins = [0u8; COIN_SIZE];
        rng.fill_bytes(&mut seed);
        rng.fill_bytes(&mut msg);
        rng.fill_bytes(&mut coins);

        let (pk, sk) = new_key_from_seed::<P>(&seed);
        let mut ct = vec![0u8; P::CIPHERTEXT_SIZE];
        pk.encrypt_to(&mut ct, &msg, &coins);

        let mut recovered = [0u8; MESSAGE_SIZE];
        sk.decrypt_to(&mut recovered, &ct);
        assert_eq!(recovered, msg, "{tag}");
    }
}

#[test]
fn encrypt_decrypt_512() {
    round_trip::<Params512>("512");
}

#[test]
fn encrypt_decrypt_768() {
    round_trip::<Params768>("768");
}

#[test]
fn encrypt_decrypt_1024() {
    round_trip::<Params1024>("1024");
}

#[test]
fn encrypt_decrypt_ml_kem_derivation() {
    let seed = [0x21u8; SEED_SIZE];
    let msg = [0x42u8; MESSAGE_SIZE];
    let coins = [0x63u8; COIN_SIZE];

    let (pk, sk) = new_key_from_seed_ml_kem::<Params768>(&seed);
    let mut ct = vec![0u8; Params768::CIPHERTEXT_SIZE];
    pk.encrypt_to(&mut ct, &msg, &coins);

    let mut recovered = [0u8; MESSAGE_SIZE];
    sk.decrypt_to(&mut recovered, &ct);
    assert_eq!(recovered, msg);
}

#[test]
fn seed_expansions_are_domain_separated() {
    // The standardized expansion appends the dimension byte, so the same
    // seed must produce a different key than the pre-standard expansion.
    let seed = [5u8; SEED_SIZE];
    let (pk_r3, _) = new_key_from_seed::<Params768>(&seed);
    let (pk_ml, _) = new_key_from_seed_ml_kem::<Params768>(&seed);
    assert_ne!(pk_r3, pk_ml);
}

#[test]
fn keygen_is_deterministic() {
    let seed = [0u8; SEED_SIZE];
    let (pk1, sk1) = new_key_from_seed::<Params512>(&seed);
    let (pk2, sk2) = new_key_from_seed::<Params512>(&seed);
    assert_eq!(pk1, pk2);
    assert!(sk1.equals(&sk2));
}

#[test]
fn encryption_is_deterministic_in_coins() {
    let (pk, _) = new_key_from_seed::<Params512>(&[1u8; SEED_SIZE]);
    let msg = [0xA5u8; MESSAGE_SIZE];

    let mut ct1 = vec![0u8; Params512::CIPHERTEXT_SIZE];
    let mut ct2 = vec![0u8; Params512::CIPHERTEXT_SIZE];
    pk.encrypt_to(&mut ct1, &msg, &[2u8; COIN_SIZE]);
    pk.encrypt_to(&mut ct2, &msg, &[2u8; COIN_SIZE]);
    assert_eq!(ct1, ct2);

    pk.encrypt_to(&mut ct2, &msg, &[3u8; COIN_SIZE]);
    assert_ne!(ct1, ct2);
}

#[test]
fn public_key_pack_round_trips() {
    let (pk, _) = new_key_from_seed::<Params768>(&[9u8; SEED_SIZE]);
    let mut buf = vec![0u8; Params768::PUBLIC_KEY_SIZE];
    pk.pack(&mut buf);

    assert_eq!(PublicKey::<Params768>::unpack(&buf), pk);
    assert_eq!(PublicKey::<Params768>::unpack_normalized(&buf).unwrap(), pk);
}

#[test]
fn secret_key_pack_round_trips() {
    let (pk, sk) = new_key_from_seed::<Params768>(&[11u8; SEED_SIZE]);
    let mut buf = vec![0u8; Params768::SECRET_KEY_SIZE];
    sk.pack(&mut buf);

    let sk2 = SecretKey::<Params768>::unpack(&buf);
    assert!(sk.equals(&sk2));

    // The unpacked key still decrypts.
    let msg = [0x77u8; MESSAGE_SIZE];
    let mut ct = vec![0u8; Params768::CIPHERTEXT_SIZE];
    pk.encrypt_to(&mut ct, &msg, &[0u8; COIN_SIZE]);
    let mut recovered = [0u8; MESSAGE_SIZE];
    sk2.decrypt_to(&mut recovered, &ct);
    assert_eq!(recovered, msg);
}

#[test]
fn normalized_unpack_rejects_oversized_coefficient() {
    let (pk, _) = new_key_from_seed::<Params512>(&[13u8; SEED_SIZE]);
    let mut buf = vec![0u8; Params512::PUBLIC_KEY_SIZE];
    pk.pack(&mut buf);

    // Force the first 12-bit coefficient to q (non-canonical).
    buf[0] = 0x01;
    buf[1] = (buf[1] & 0xF0) | 0x0D;
    assert!(PublicKey::<Params512>::unpack_normalized(&buf).is_err());

    // The permissive unpack accepts the same buffer.
    let _ = PublicKey::<Params512>::unpack(&buf);
}

#[test]
#[should_panic(expected = "seed must be of length SEED_SIZE")]
fn keygen_rejects_short_seed() {
    let _ = new_key_from_seed::<Params512>(&[0u8; SEED_SIZE - 1]);
}

#[test]
fn derived_sizes_match_the_parameter_table() {
    use pqcrypt_params::kyber as table;

    assert_eq!(Params512::PUBLIC_KEY_SIZE, table::KYBER512.public_key_size);
    assert_eq!(Params768::PUBLIC_KEY_SIZE, table::KYBER768.public_key_size);
    assert_eq!(Params1024::PUBLIC_KEY_SIZE, table::KYBER1024.public_key_size);

    assert_eq!(Params512::CIPHERTEXT_SIZE, table::KYBER512.ciphertext_size);
    assert_eq!(Params768::CIPHERTEXT_SIZE, table::KYBER768.ciphertext_size);
    assert_eq!(Params1024::CIPHERTEXT_SIZE, table::KYBER1024.ciphertext_size);
}
