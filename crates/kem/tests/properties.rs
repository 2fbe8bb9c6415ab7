// File: crates/kem/tests/properties.rs

//! Property-based checks over arbitrary seeds and tampering positions.

use proptest::collection::vec;
use proptest::prelude::*;

use pqcrypt_api::Scheme;
use pqcrypt_kem::{kyber512, ml_kem_512};

fn schemes() -> [&'static dyn Scheme; 2] {
    [kyber512(), ml_kem_512()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_seed_round_trips(
        seed in vec(any::<u8>(), 64),
        eseed in vec(any::<u8>(), 32),
    ) {
        for scheme in schemes() {
            let (pk, sk) = scheme.derive_key_pair(&seed).unwrap();
            let (ct, ss1) = scheme
                .encapsulate_deterministically(pk.as_ref(), &eseed)
                .unwrap();
            let ss2 = scheme.decapsulate(sk.as_ref(), &ct).unwrap();
            prop_assert_eq!(&*ss1, &*ss2, "{}", scheme.name());
        }
    }

    #[test]
    fn any_seed_keys_survive_marshaling(seed in vec(any::<u8>(), 64)) {
        for scheme in schemes() {
            let (pk, sk) = scheme.derive_key_pair(&seed).unwrap();
            let pk2 = scheme
                .unmarshal_binary_public_key(&pk.marshal_binary().unwrap())
                .unwrap();
            let sk2 = scheme
                .unmarshal_binary_private_key(&sk.marshal_binary().unwrap())
                .unwrap();
            prop_assert!(pk.equal(pk2.as_ref()), "{}", scheme.name());
            prop_assert!(sk.equal(sk2.as_ref()), "{}", scheme.name());
        }
    }

    #[test]
    fn any_single_bit_flip_is_rejected(
        seed in vec(any::<u8>(), 64),
        eseed in vec(any::<u8>(), 32),
        pos in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        for scheme in schemes() {
            let (pk, sk) = scheme.derive_key_pair(&seed).unwrap();
            let (mut ct, ss) = scheme
                .encapsulate_deterministically(pk.as_ref(), &eseed)
                .unwrap();

            let idx = pos.index(ct.len());
            ct[idx] ^= 1 << bit;

            let rejected = scheme.decapsulate(sk.as_ref(), &ct).unwrap();
            prop_assert_eq!(rejected.len(), scheme.shared_key_size());
            prop_assert_ne!(&*rejected, &*ss, "{}", scheme.name());
        }
    }
}
