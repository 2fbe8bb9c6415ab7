//! Constants for the Kyber / ML-KEM lattice parameter sets
//!
//! The three security levels share one ring (degree 256, modulus 3329) and
//! differ in the module dimension `k`, the noise widths and the ciphertext
//! compression depths. Byte sizes listed here are for the IND-CCA2 KEM
//! encodings: the private key size includes the packed CPA secret, the
//! public key, its hash and the implicit-rejection secret.

/// Polynomial degree shared by all parameter sets
pub const KYBER_N: usize = 256;

/// Coefficient modulus shared by all parameter sets
pub const KYBER_Q: u16 = 3329;

/// Structure containing the parameters of one Kyber / ML-KEM security level
pub struct KyberParamSet {
    /// Polynomial degree
    pub n: usize,

    /// Coefficient modulus
    pub q: u16,

    /// Module dimension (number of ring elements per vector)
    pub k: usize,

    /// Noise width for secrets and the encryption vector
    pub eta1: usize,

    /// Noise width for ciphertext errors
    pub eta2: usize,

    /// Compression bits for the ciphertext vector u
    pub du: usize,

    /// Compression bits for the ciphertext polynomial v
    pub dv: usize,

    /// Size of a packed public key in bytes
    pub public_key_size: usize,

    /// Size of a packed IND-CCA2 private key in bytes
    pub private_key_size: usize,

    /// Size of a ciphertext in bytes
    pub ciphertext_size: usize,

    /// Size of the established shared key in bytes
    pub shared_key_size: usize,
}

/// Security level 1 (512) parameters
pub const KYBER512: KyberParamSet = KyberParamSet {
    n: KYBER_N,
    q: KYBER_Q,
    k: 2,
    eta1: 3,
    eta2: 2,
    du: 10,
    dv: 4,
    public_key_size: 800,
    private_key_size: 1632,
    ciphertext_size: 768,
    shared_key_size: 32,
};

/// Security level 3 (768) parameters
pub const KYBER768: KyberParamSet = KyberParamSet {
    n: KYBER_N,
    q: KYBER_Q,
    k: 3,
    eta1: 2,
    eta2: 2,
    du: 10,
    dv: 4,
    public_key_size: 1184,
    private_key_size: 2400,
    ciphertext_size: 1088,
    shared_key_size: 32,
};

/// Security level 5 (1024) parameters
pub const KYBER1024: KyberParamSet = KyberParamSet {
    n: KYBER_N,
    q: KYBER_Q,
    k: 4,
    eta1: 2,
    eta2: 2,
    du: 11,
    dv: 5,
    public_key_size: 1568,
    private_key_size: 3168,
    ciphertext_size: 1568,
    shared_key_size: 32,
};
