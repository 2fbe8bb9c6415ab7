//! IND-CPA secure lattice public-key encryption
//!
//! This crate implements the module-lattice encryption scheme underlying the
//! Kyber / ML-KEM key encapsulation mechanisms in `pqcrypt-kem`. On its own
//! it is only secure against chosen-plaintext attacks; the KEM crate applies
//! the Fujisaki-Okamoto transform on top of it to reach IND-CCA2.
//!
//! Encryption is deterministic in its `(public key, message, coins)` inputs,
//! which is exactly what the re-encryption step of the transform requires.

mod cpa;
mod params;
mod poly;
mod polyvec;
mod sample;

pub use cpa::{new_key_from_seed, new_key_from_seed_ml_kem, PublicKey, SecretKey};
pub use params::{ParamSet, Params1024, Params512, Params768, N, POLY_BYTES, Q};

/// Size of the seed consumed by key generation.
pub const SEED_SIZE: usize = 32;

/// Size of a plaintext message in bytes.
pub const MESSAGE_SIZE: usize = 32;

/// Size of the encryption coins in bytes.
pub const COIN_SIZE: usize = 32;

#[cfg(test)]
mod tests;
