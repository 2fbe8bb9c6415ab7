// File: crates/kem/src/kem.rs

//! The Fujisaki-Okamoto transform over the CPA-secure scheme.
//!
//! Keys are generic over the parameter set and carry their [`Variant`] so
//! that the two hash schedules cannot be mixed up after construction. As in
//! the PKE layer, buffer lengths on the `*_to` methods are programmer
//! contracts and panic on mismatch; lengths and encodings of externally
//! supplied bytes are typed errors. An invalid ciphertext is neither: it
//! decapsulates to the implicit rejection value.

use std::sync::Arc;

use pqcrypt_api::{Error, Result};
use pqcrypt_pke as pke;
use pqcrypt_pke::ParamSet;
use rand::{CryptoRng, RngCore};
use sha3::digest::Digest;
use sha3::{Sha3_256, Sha3_512};
use zeroize::Zeroizing;

use crate::variant::Variant;

/// Size of the seed consumed by key generation: 32 bytes of PKE key seed
/// followed by 32 bytes of implicit rejection secret.
pub const KEY_SEED_SIZE: usize = 2 * pke::SEED_SIZE;

/// Size of the seed consumed by deterministic encapsulation.
pub const ENCAPSULATION_SEED_SIZE: usize = 32;

/// Size of an established shared key in bytes, for either variant.
pub const SHARED_KEY_SIZE: usize = 32;

/// Parameter sets usable at the KEM layer.
///
/// The derived private key size accounts for the packed layout
/// `cpa_sk ‖ pk ‖ H(pk) ‖ z`.
pub trait KemParams: ParamSet {
    const PRIVATE_KEY_SIZE: usize = Self::SECRET_KEY_SIZE + Self::PUBLIC_KEY_SIZE + 64;

    /// Scheme names at this security level, one per variant.
    const NAME_ROUND3: &'static str;
    const NAME_ML_KEM: &'static str;

    /// The variant-erased scheme handle for these parameters.
    fn scheme(variant: Variant) -> &'static dyn pqcrypt_api::Scheme;
}

/// A KEM public key: the CPA public key, its hash and the variant it
/// belongs to.
#[derive(Clone, Debug)]
pub struct PublicKey<P: KemParams> {
    pk: Arc<pke::PublicKey<P>>,
    hpk: [u8; 32],
    variant: Variant,
}

/// `hpk` is a collision-resistant digest of the packed key, so comparing it
/// compares the key content.
impl<P: KemParams> PartialEq for PublicKey<P> {
    fn eq(&self, other: &Self) -> bool {
        self.variant == other.variant && self.hpk == other.hpk
    }
}

impl<P: KemParams> Eq for PublicKey<P> {}

/// A KEM private key. Holds a shared reference to the matching public key
/// since re-encryption during decapsulation needs it anyway.
#[derive(Clone)]
pub struct PrivateKey<P: KemParams> {
    sk: pke::SecretKey<P>,
    pk: Arc<pke::PublicKey<P>>,
    hpk: [u8; 32],
    z: Zeroizing<[u8; 32]>,
    variant: Variant,
}

/// Derive a key pair deterministically from `seed`.
///
/// The first half of the seed feeds CPA key generation (through the
/// variant's seed expansion), the second half becomes the implicit
/// rejection secret z.
///
/// Panics if `seed` is not of length `KEY_SEED_SIZE`.
pub fn new_key_from_seed<P: KemParams>(
    seed: &[u8],
    variant: Variant,
) -> (PublicKey<P>, PrivateKey<P>) {
    assert_eq!(
        seed.len(),
        KEY_SEED_SIZE,
        "seed must be of length KEY_SEED_SIZE"
    );

    let (pk, sk) = match variant {
        Variant::Round3 => pke::new_key_from_seed::<P>(&seed[..pke::SEED_SIZE]),
        Variant::MlKem => pke::new_key_from_seed_ml_kem::<P>(&seed[..pke::SEED_SIZE]),
    };
    let mut z = Zeroizing::new([0u8; 32]);
    z.copy_from_slice(&seed[pke::SEED_SIZE..]);

    let mut packed = vec![0u8; P::PUBLIC_KEY_SIZE];
    pk.pack(&mut packed);
    let mut hpk = [0u8; 32];
    hpk.copy_from_slice(&Sha3_256::digest(&packed));

    let pk = Arc::new(pk);
    (
        PublicKey {
            pk: Arc::clone(&pk),
            hpk,
            variant,
        },
        PrivateKey {
            sk,
            pk,
            hpk,
            z,
            variant,
        },
    )
}

/// Generate a fresh key pair from `rng`.
pub fn generate_key_pair<P: KemParams, R: RngCore + CryptoRng>(
    rng: &mut R,
    variant: Variant,
) -> Result<(PublicKey<P>, PrivateKey<P>)> {
    let mut seed = Zeroizing::new([0u8; KEY_SEED_SIZE]);
    rng.try_fill_bytes(seed.as_mut())
        .map_err(|_| Error::RandomGeneration {
            context: "kem key seed",
        })?;
    Ok(new_key_from_seed::<P>(seed.as_ref(), variant))
}

impl<P: KemParams> PublicKey<P> {
    /// The variant this key was constructed for.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Deterministically encapsulate with `seed`, writing the ciphertext to
    /// `ct` and the shared key to `ss`.
    ///
    /// Panics if `ct`, `ss` or `seed` are not of length `CIPHERTEXT_SIZE`,
    /// `SHARED_KEY_SIZE` and `ENCAPSULATION_SEED_SIZE` respectively.
    pub fn encapsulate_to(&self, ct: &mut [u8], ss: &mut [u8], seed: &[u8]) {
        assert_eq!(
            ct.len(),
            P::CIPHERTEXT_SIZE,
            "ct must be of length CIPHERTEXT_SIZE"
        );
        assert_eq!(
            ss.len(),
            SHARED_KEY_SIZE,
            "ss must be of length SHARED_KEY_SIZE"
        );
        assert_eq!(
            seed.len(),
            ENCAPSULATION_SEED_SIZE,
            "seed must be of length ENCAPSULATION_SEED_SIZE"
        );

        let m = Zeroizing::new(self.variant.derive_message(seed));

        // (K', r) = G(m ‖ H(pk))
        let mut g = Sha3_512::new();
        g.update(m.as_ref());
        g.update(self.hpk);
        let mut kr = Zeroizing::new([0u8; 64]);
        kr.copy_from_slice(&g.finalize());

        self.pk.encrypt_to(ct, m.as_ref(), &kr[32..]);
        self.variant.encaps_shared_key(&mut kr, ct, ss);
    }

    /// Encapsulate with fresh randomness from `rng`.
    pub fn encapsulate<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
        let mut seed = Zeroizing::new([0u8; ENCAPSULATION_SEED_SIZE]);
        rng.try_fill_bytes(seed.as_mut())
            .map_err(|_| Error::RandomGeneration {
                context: "kem encapsulation seed",
            })?;
        self.encapsulate_deterministically(seed.as_ref())
    }

    /// Encapsulate with caller-provided `seed`, allocating the outputs.
    pub fn encapsulate_deterministically(
        &self,
        seed: &[u8],
    ) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
        if seed.len() != ENCAPSULATION_SEED_SIZE {
            return Err(Error::InvalidLength {
                context: "kem encapsulation seed",
                expected: ENCAPSULATION_SEED_SIZE,
                actual: seed.len(),
            });
        }
        let mut ct = vec![0u8; P::CIPHERTEXT_SIZE];
        let mut ss = Zeroizing::new(vec![0u8; SHARED_KEY_SIZE]);
        self.encapsulate_to(&mut ct, &mut ss, seed);
        Ok((ct, ss))
    }

    /// Pack into `buf` as the CPA public key encoding.
    ///
    /// Panics if `buf` is not of length `PUBLIC_KEY_SIZE`.
    pub fn pack(&self, buf: &mut [u8]) {
        self.pk.pack(buf);
    }

    /// Unpack from `buf` for the given variant.
    ///
    /// The standardized variant rejects non-normalized coefficient
    /// encodings; the pre-standard variant accepts anything of the right
    /// length.
    pub fn unpack(buf: &[u8], variant: Variant) -> Result<Self> {
        if buf.len() != P::PUBLIC_KEY_SIZE {
            return Err(Error::InvalidLength {
                context: "kem public key",
                expected: P::PUBLIC_KEY_SIZE,
                actual: buf.len(),
            });
        }
        let pk = if variant.validates_encodings() {
            pke::PublicKey::<P>::unpack_normalized(buf)?
        } else {
            pke::PublicKey::<P>::unpack(buf)
        };
        let mut hpk = [0u8; 32];
        hpk.copy_from_slice(&Sha3_256::digest(buf));
        Ok(PublicKey {
            pk: Arc::new(pk),
            hpk,
            variant,
        })
    }
}

impl<P: KemParams> PrivateKey<P> {
    /// The variant this key was constructed for.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The matching public key.
    pub fn public(&self) -> PublicKey<P> {
        PublicKey {
            pk: Arc::clone(&self.pk),
            hpk: self.hpk,
            variant: self.variant,
        }
    }

    /// Decapsulate `ct` into `ss`.
    ///
    /// Always succeeds: if `ct` is not the honest encapsulation of the
    /// recovered message, the implicit rejection value is written instead.
    /// The comparison and the substitution are constant time.
    ///
    /// Panics if `ss` or `ct` are not of length `SHARED_KEY_SIZE` and
    /// `CIPHERTEXT_SIZE` respectively.
    pub fn decapsulate_to(&self, ss: &mut [u8], ct: &[u8]) {
        assert_eq!(
            ss.len(),
            SHARED_KEY_SIZE,
            "ss must be of length SHARED_KEY_SIZE"
        );
        assert_eq!(
            ct.len(),
            P::CIPHERTEXT_SIZE,
            "ct must be of length CIPHERTEXT_SIZE"
        );

        let mut m2 = Zeroizing::new([0u8; pke::MESSAGE_SIZE]);
        self.sk.decrypt_to(m2.as_mut(), ct);

        // (K'', r') = G(m' ‖ H(pk))
        let mut g = Sha3_512::new();
        g.update(m2.as_ref());
        g.update(self.hpk);
        let mut kr2 = Zeroizing::new([0u8; 64]);
        kr2.copy_from_slice(&g.finalize());

        let mut ct2 = Zeroizing::new(vec![0u8; P::CIPHERTEXT_SIZE]);
        self.pk.encrypt_to(&mut ct2, m2.as_ref(), &kr2[32..]);

        let matched = pqcrypt_internal::ct_eq(ct, &ct2);
        self.variant
            .decaps_shared_key(&mut kr2, &self.z, ct, matched, ss);
    }

    /// Decapsulate `ct`, allocating the shared key.
    ///
    /// Only a wrong ciphertext *length* is an error; a wrong ciphertext of
    /// the right length yields the implicit rejection value.
    pub fn decapsulate(&self, ct: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        if ct.len() != P::CIPHERTEXT_SIZE {
            return Err(Error::InvalidLength {
                context: "kem ciphertext",
                expected: P::CIPHERTEXT_SIZE,
                actual: ct.len(),
            });
        }
        let mut ss = Zeroizing::new(vec![0u8; SHARED_KEY_SIZE]);
        self.decapsulate_to(&mut ss, ct);
        Ok(ss)
    }

    /// Pack into `buf` as `cpa_sk ‖ pk ‖ H(pk) ‖ z`.
    ///
    /// Panics if `buf` is not of length `PRIVATE_KEY_SIZE`.
    pub fn pack(&self, buf: &mut [u8]) {
        assert_eq!(
            buf.len(),
            P::PRIVATE_KEY_SIZE,
            "buf must be of length PRIVATE_KEY_SIZE"
        );
        let (skb, rest) = buf.split_at_mut(P::SECRET_KEY_SIZE);
        let (pkb, rest) = rest.split_at_mut(P::PUBLIC_KEY_SIZE);
        let (hb, zb) = rest.split_at_mut(32);
        self.sk.pack(skb);
        self.pk.pack(pkb);
        hb.copy_from_slice(&self.hpk);
        zb.copy_from_slice(self.z.as_ref());
    }

    /// Unpack from `buf` for the given variant.
    ///
    /// The standardized variant additionally checks that the embedded
    /// public-key hash is consistent with the embedded public key.
    pub fn unpack(buf: &[u8], variant: Variant) -> Result<Self> {
        if buf.len() != P::PRIVATE_KEY_SIZE {
            return Err(Error::InvalidLength {
                context: "kem private key",
                expected: P::PRIVATE_KEY_SIZE,
                actual: buf.len(),
            });
        }
        let (skb, rest) = buf.split_at(P::SECRET_KEY_SIZE);
        let (pkb, rest) = rest.split_at(P::PUBLIC_KEY_SIZE);
        let (hb, zb) = rest.split_at(32);

        // The canonicity check applies to public keys arriving on their own;
        // here the standardized variant only requires the embedded hash to be
        // consistent with the embedded public key.
        if variant.validates_encodings() && Sha3_256::digest(pkb).as_slice() != hb {
            return Err(Error::InvalidKey {
                context: "kem private key hash mismatch",
            });
        }
        let pk = pke::PublicKey::<P>::unpack(pkb);

        let sk = pke::SecretKey::<P>::unpack(skb);
        let mut hpk = [0u8; 32];
        hpk.copy_from_slice(hb);
        let mut z = Zeroizing::new([0u8; 32]);
        z.copy_from_slice(zb);

        Ok(PrivateKey {
            sk,
            pk: Arc::new(pk),
            hpk,
            z,
            variant,
        })
    }

    /// Content equality; the secret parts are compared in constant time,
    /// the public half through its cached hash.
    pub fn equals(&self, other: &Self) -> bool {
        let sk_eq = self.sk.equals(&other.sk);
        let z_eq: bool = pqcrypt_internal::ct_eq(self.z.as_ref(), other.z.as_ref()).into();
        (sk_eq & z_eq) && self.variant == other.variant && self.hpk == other.hpk
    }
}
