//! IND-CCA2 secure key encapsulation
//!
//! This crate applies a Fujisaki-Okamoto style transform to the CPA-secure
//! lattice encryption scheme in `pqcrypt-pke`, yielding IND-CCA2 secure KEMs.
//! Two incompatible standardized hash schedules are supported behind one
//! interface, selected by [`Variant`] at key construction:
//!
//! - [`Variant::Round3`]: the round-3 Kyber submission. Encapsulation hashes
//!   its seed before use and the shared key is bound to the transmitted
//!   ciphertext through a final XOF step.
//! - [`Variant::MlKem`]: the FIPS-style standard. The seed is used directly,
//!   the shared key is the first half of the G digest, and unpacking
//!   validates key encodings.
//!
//! Decapsulation of an invalid ciphertext never fails: a deterministic
//! pseudorandom value derived from the rejection secret is substituted in
//! constant time (implicit rejection).

mod kem;
mod scheme;
mod variant;

pub use crate::kem::{
    generate_key_pair, new_key_from_seed, KemParams, PrivateKey, PublicKey,
    ENCAPSULATION_SEED_SIZE, KEY_SEED_SIZE, SHARED_KEY_SIZE,
};
pub use crate::scheme::{
    kyber1024, kyber512, kyber768, ml_kem_1024, ml_kem_512, ml_kem_768, KemScheme,
};
pub use crate::variant::Variant;

// Re-export the parameter sets so callers can name the generic key types.
pub use pqcrypt_pke::{Params1024, Params512, Params768};
