// File: crates/pke/src/params.rs

//! Parameter-set definitions for the lattice encryption scheme.

use pqcrypt_params::kyber as table;

/// Polynomial degree of the ring.
pub const N: usize = table::KYBER_N;

/// Coefficient modulus.
pub const Q: u32 = table::KYBER_Q as u32;

/// Bytes of a polynomial packed at 12 bits per coefficient.
pub const POLY_BYTES: usize = N * 12 / 8;

/// Trait defining the parameters of one security level.
///
/// The byte sizes are derived constants; implementations only supply the
/// table row they are pinned to.
pub trait ParamSet: Send + Sync + 'static {
    /// Module dimension k.
    const K: usize;
    /// Noise width for secrets and the encryption vector r.
    const ETA1: usize;
    /// Noise width for ciphertext errors e1, e2.
    const ETA2: usize;
    /// Compression bits for the ciphertext vector u.
    const DU: usize;
    /// Compression bits for the ciphertext polynomial v.
    const DV: usize;

    /// Packed public key: 12-bit vector encoding followed by the matrix seed.
    const PUBLIC_KEY_SIZE: usize = Self::K * POLY_BYTES + 32;
    /// Packed CPA secret key: 12-bit vector encoding.
    const SECRET_KEY_SIZE: usize = Self::K * POLY_BYTES;
    /// Ciphertext: compressed vector u followed by compressed polynomial v.
    const CIPHERTEXT_SIZE: usize = Self::K * Self::DU * N / 8 + Self::DV * N / 8;
}

/// Security level 1 parameters (k = 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params512;

impl ParamSet for Params512 {
    const K: usize = table::KYBER512.k;
    const ETA1: usize = table::KYBER512.eta1;
    const ETA2: usize = table::KYBER512.eta2;
    const DU: usize = table::KYBER512.du;
    const DV: usize = table::KYBER512.dv;
}

/// Security level 3 parameters (k = 3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params768;

impl ParamSet for Params768 {
    const K: usize = table::KYBER768.k;
    const ETA1: usize = table::KYBER768.eta1;
    const ETA2: usize = table::KYBER768.eta2;
    const DU: usize = table::KYBER768.du;
    const DV: usize = table::KYBER768.dv;
}

/// Security level 5 parameters (k = 4).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params1024;

impl ParamSet for Params1024 {
    const K: usize = table::KYBER1024.k;
    const ETA1: usize = table::KYBER1024.eta1;
    const ETA2: usize = table::KYBER1024.eta2;
    const DU: usize = table::KYBER1024.du;
    const DV: usize = table::KYBER1024.dv;
}
