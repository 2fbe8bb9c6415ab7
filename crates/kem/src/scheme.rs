// File: crates/kem/src/scheme.rs

//! Variant-erased scheme instances and the trait-object glue.
//!
//! Six static instances exist, one per `(parameter set, variant)` pair.
//! Keys arriving through the erased interface are downcast back to their
//! concrete types and checked against the instance's variant; the same
//! parameters under the other hash schedule are a different scheme and are
//! rejected as such.

use core::any::Any;
use core::marker::PhantomData;

use pqcrypt_api as api;
use pqcrypt_api::{Error, Result};
use pqcrypt_pke::{Params1024, Params512, Params768};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::kem::{self, KemParams, PrivateKey, PublicKey, KEY_SEED_SIZE};
use crate::variant::Variant;

/// One `(parameter set, variant)` instance behind the erased interface.
pub struct KemScheme<P: KemParams> {
    variant: Variant,
    name: &'static str,
    _params: PhantomData<fn() -> P>,
}

impl<P: KemParams> KemScheme<P> {
    const fn new(variant: Variant, name: &'static str) -> Self {
        KemScheme {
            variant,
            name,
            _params: PhantomData,
        }
    }

    fn check_public_key<'a>(&self, pk: &'a dyn api::PublicKey) -> Result<&'a PublicKey<P>> {
        pk.as_any()
            .downcast_ref::<PublicKey<P>>()
            .filter(|pk| pk.variant() == self.variant)
            .ok_or(Error::TypeMismatch {
                context: "kem public key",
            })
    }

    fn check_private_key<'a>(&self, sk: &'a dyn api::PrivateKey) -> Result<&'a PrivateKey<P>> {
        sk.as_any()
            .downcast_ref::<PrivateKey<P>>()
            .filter(|sk| sk.variant() == self.variant)
            .ok_or(Error::TypeMismatch {
                context: "kem private key",
            })
    }
}

impl<P: KemParams> api::Scheme for KemScheme<P> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn public_key_size(&self) -> usize {
        P::PUBLIC_KEY_SIZE
    }

    fn private_key_size(&self) -> usize {
        P::PRIVATE_KEY_SIZE
    }

    fn seed_size(&self) -> usize {
        KEY_SEED_SIZE
    }

    fn encapsulation_seed_size(&self) -> usize {
        kem::ENCAPSULATION_SEED_SIZE
    }

    fn shared_key_size(&self) -> usize {
        kem::SHARED_KEY_SIZE
    }

    fn ciphertext_size(&self) -> usize {
        P::CIPHERTEXT_SIZE
    }

    fn generate_key_pair(&self) -> Result<(Box<dyn api::PublicKey>, Box<dyn api::PrivateKey>)> {
        let (pk, sk) = kem::generate_key_pair::<P, _>(&mut OsRng, self.variant)?;
        Ok((Box::new(pk), Box::new(sk)))
    }

    fn derive_key_pair(
        &self,
        seed: &[u8],
    ) -> Result<(Box<dyn api::PublicKey>, Box<dyn api::PrivateKey>)> {
        if seed.len() != KEY_SEED_SIZE {
            return Err(Error::InvalidLength {
                context: "kem key seed",
                expected: KEY_SEED_SIZE,
                actual: seed.len(),
            });
        }
        let (pk, sk) = kem::new_key_from_seed::<P>(seed, self.variant);
        Ok((Box::new(pk), Box::new(sk)))
    }

    fn encapsulate(&self, pk: &dyn api::PublicKey) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
        self.check_public_key(pk)?.encapsulate(&mut OsRng)
    }

    fn encapsulate_deterministically(
        &self,
        pk: &dyn api::PublicKey,
        seed: &[u8],
    ) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
        self.check_public_key(pk)?.encapsulate_deterministically(seed)
    }

    fn decapsulate(&self, sk: &dyn api::PrivateKey, ct: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        self.check_private_key(sk)?.decapsulate(ct)
    }

    fn unmarshal_binary_public_key(&self, buf: &[u8]) -> Result<Box<dyn api::PublicKey>> {
        Ok(Box::new(PublicKey::<P>::unpack(buf, self.variant)?))
    }

    fn unmarshal_binary_private_key(&self, buf: &[u8]) -> Result<Box<dyn api::PrivateKey>> {
        Ok(Box::new(PrivateKey::<P>::unpack(buf, self.variant)?))
    }
}

impl<P: KemParams> api::PublicKey for PublicKey<P> {
    fn scheme(&self) -> &'static dyn api::Scheme {
        P::scheme(self.variant())
    }

    fn marshal_binary(&self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; P::PUBLIC_KEY_SIZE];
        self.pack(&mut buf);
        Ok(buf)
    }

    fn equal(&self, other: &dyn api::PublicKey) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => self == other,
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<P: KemParams> api::PrivateKey for PrivateKey<P> {
    fn scheme(&self) -> &'static dyn api::Scheme {
        P::scheme(self.variant())
    }

    fn marshal_binary(&self) -> Result<Zeroizing<Vec<u8>>> {
        let mut buf = Zeroizing::new(vec![0u8; P::PRIVATE_KEY_SIZE]);
        self.pack(&mut buf);
        Ok(buf)
    }

    fn equal(&self, other: &dyn api::PrivateKey) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => self.equals(other),
            None => false,
        }
    }

    fn public(&self) -> Box<dyn api::PublicKey> {
        Box::new(PrivateKey::public(self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

static KYBER512: KemScheme<Params512> = KemScheme::new(Variant::Round3, Params512::NAME_ROUND3);
static KYBER768: KemScheme<Params768> = KemScheme::new(Variant::Round3, Params768::NAME_ROUND3);
static KYBER1024: KemScheme<Params1024> = KemScheme::new(Variant::Round3, Params1024::NAME_ROUND3);
static ML_KEM_512: KemScheme<Params512> = KemScheme::new(Variant::MlKem, Params512::NAME_ML_KEM);
static ML_KEM_768: KemScheme<Params768> = KemScheme::new(Variant::MlKem, Params768::NAME_ML_KEM);
static ML_KEM_1024: KemScheme<Params1024> = KemScheme::new(Variant::MlKem, Params1024::NAME_ML_KEM);

/// The round-3 scheme at security level 1.
pub fn kyber512() -> &'static dyn api::Scheme {
    &KYBER512
}

/// The round-3 scheme at security level 3.
pub fn kyber768() -> &'static dyn api::Scheme {
    &KYBER768
}

/// The round-3 scheme at security level 5.
pub fn kyber1024() -> &'static dyn api::Scheme {
    &KYBER1024
}

/// The standardized scheme at security level 1.
pub fn ml_kem_512() -> &'static dyn api::Scheme {
    &ML_KEM_512
}

/// The standardized scheme at security level 3.
pub fn ml_kem_768() -> &'static dyn api::Scheme {
    &ML_KEM_768
}

/// The standardized scheme at security level 5.
pub fn ml_kem_1024() -> &'static dyn api::Scheme {
    &ML_KEM_1024
}

impl KemParams for Params512 {
    const NAME_ROUND3: &'static str = "Kyber512";
    const NAME_ML_KEM: &'static str = "ML-KEM-512";

    fn scheme(variant: Variant) -> &'static dyn api::Scheme {
        match variant {
            Variant::Round3 => kyber512(),
            Variant::MlKem => ml_kem_512(),
        }
    }
}

impl KemParams for Params768 {
    const NAME_ROUND3: &'static str = "Kyber768";
    const NAME_ML_KEM: &'static str = "ML-KEM-768";

    fn scheme(variant: Variant) -> &'static dyn api::Scheme {
        match variant {
            Variant::Round3 => kyber768(),
            Variant::MlKem => ml_kem_768(),
        }
    }
}

impl KemParams for Params1024 {
    const NAME_ROUND3: &'static str = "Kyber1024";
    const NAME_ML_KEM: &'static str = "ML-KEM-1024";

    fn scheme(variant: Variant) -> &'static dyn api::Scheme {
        match variant {
            Variant::Round3 => kyber1024(),
            Variant::MlKem => ml_kem_1024(),
        }
    }
}
