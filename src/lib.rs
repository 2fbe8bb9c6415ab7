//! # pqcrypt
//!
//! A pure Rust post-quantum cryptography library built around an IND-CCA2
//! secure lattice key encapsulation mechanism.
//!
//! Two standardized hash schedules are supported behind one interface: the
//! round-3 Kyber submission and the FIPS-style ML-KEM standard, each at
//! three security levels. Decapsulation uses constant-time implicit
//! rejection, so an invalid ciphertext yields a deterministic pseudorandom
//! shared key rather than an error.
//!
//! ## Usage
//!
//! ```
//! use pqcrypt::kem::ml_kem_768;
//!
//! let scheme = ml_kem_768();
//! let (pk, sk) = scheme.generate_key_pair()?;
//! let (ct, shared) = scheme.encapsulate(pk.as_ref())?;
//! let recovered = scheme.decapsulate(sk.as_ref(), &ct)?;
//! assert_eq!(*shared, *recovered);
//! # Ok::<(), pqcrypt::api::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several
//! sub-crates:
//!
//! - [`api`]: error types and the variant-erased scheme interface
//! - [`params`]: the Kyber / ML-KEM parameter tables
//! - [`internal`]: constant-time helpers
//! - [`pke`]: the underlying CPA-secure lattice encryption scheme
//! - [`kem`]: the Fujisaki-Okamoto transform and the scheme instances

pub use pqcrypt_api as api;
pub use pqcrypt_internal as internal;
pub use pqcrypt_kem as kem;
pub use pqcrypt_params as params;
pub use pqcrypt_pke as pke;

/// Common imports for pqcrypt users
pub mod prelude {
    pub use crate::api::{Error, Result};

    pub use crate::api::{PrivateKey, PublicKey, Scheme};

    pub use crate::kem::{
        kyber1024, kyber512, kyber768, ml_kem_1024, ml_kem_512, ml_kem_768, Variant,
    };
}
