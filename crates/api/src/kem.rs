// File: crates/api/src/kem.rs

//! Variant-erased interface to key encapsulation mechanisms
//!
//! Every concrete KEM instance in this library is reachable through the
//! [`Scheme`] trait, so generic code (benchmark harnesses, protocol
//! negotiation, test drivers) can operate over an open set of interchangeable
//! instances without compile-time knowledge of which one it holds.
//!
//! Keys handed across this boundary are type-checked against the concrete key
//! types of the scheme instance; a key belonging to a different instance is
//! reported as [`Error::TypeMismatch`](crate::Error::TypeMismatch), with no
//! partial work performed.

use core::any::Any;

use zeroize::Zeroizing;

use crate::error::Result;

/// A key encapsulation mechanism instance.
///
/// # Security Design
///
/// All fixed sizes are exposed as queries so callers can allocate exact-length
/// buffers; every operation receiving a buffer of the wrong length fails with
/// a recoverable error before any cryptographic work.
pub trait Scheme: Send + Sync {
    /// Name of the scheme, suitable for protocol negotiation and logging.
    fn name(&self) -> &'static str;

    /// Size of a packed public key in bytes.
    fn public_key_size(&self) -> usize;

    /// Size of a packed private key in bytes.
    fn private_key_size(&self) -> usize;

    /// Size of the seed consumed by [`Scheme::derive_key_pair`].
    fn seed_size(&self) -> usize;

    /// Size of the seed consumed by
    /// [`Scheme::encapsulate_deterministically`].
    fn encapsulation_seed_size(&self) -> usize;

    /// Size of the established shared key in bytes.
    fn shared_key_size(&self) -> usize;

    /// Size of the ciphertext carrying an encapsulated shared key.
    fn ciphertext_size(&self) -> usize;

    /// Generate a key pair from the default secure randomness source.
    ///
    /// Entropy-source failure is reported as
    /// [`Error::RandomGeneration`](crate::Error::RandomGeneration); it is
    /// never retried internally.
    fn generate_key_pair(&self) -> Result<(Box<dyn PublicKey>, Box<dyn PrivateKey>)>;

    /// Derive a key pair deterministically from `seed`.
    ///
    /// `seed` must be exactly [`Scheme::seed_size`] bytes.
    fn derive_key_pair(&self, seed: &[u8]) -> Result<(Box<dyn PublicKey>, Box<dyn PrivateKey>)>;

    /// Generate a shared key and the ciphertext encapsulating it, using
    /// fresh randomness from the default secure source.
    fn encapsulate(&self, pk: &dyn PublicKey) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)>;

    /// Deterministic encapsulation from an explicit seed of
    /// [`Scheme::encapsulation_seed_size`] bytes.
    ///
    /// Two calls with identical `(pk, seed)` produce identical outputs; used
    /// for test vectors and reproducibility.
    fn encapsulate_deterministically(
        &self,
        pk: &dyn PublicKey,
        seed: &[u8],
    ) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)>;

    /// Recover the shared key encapsulated in `ct`.
    ///
    /// An invalid ciphertext is never reported as an error: decapsulation
    /// returns a deterministic pseudorandom value instead (implicit
    /// rejection), indistinguishable from success by design.
    fn decapsulate(&self, sk: &dyn PrivateKey, ct: &[u8]) -> Result<Zeroizing<Vec<u8>>>;

    /// Reconstruct a public key from its packed encoding.
    fn unmarshal_binary_public_key(&self, buf: &[u8]) -> Result<Box<dyn PublicKey>>;

    /// Reconstruct a private key from its packed encoding.
    fn unmarshal_binary_private_key(&self, buf: &[u8]) -> Result<Box<dyn PrivateKey>>;
}

/// A public key belonging to some [`Scheme`] instance.
pub trait PublicKey: Send + Sync {
    /// The scheme instance this key belongs to.
    fn scheme(&self) -> &'static dyn Scheme;

    /// Packed encoding of this key.
    fn marshal_binary(&self) -> Result<Vec<u8>>;

    /// Whether `other` is a key of the same scheme with the same content.
    fn equal(&self, other: &dyn PublicKey) -> bool;

    /// Downcast support for the type-checked scheme boundary.
    fn as_any(&self) -> &dyn Any;
}

/// A private key belonging to some [`Scheme`] instance.
pub trait PrivateKey: Send + Sync {
    /// The scheme instance this key belongs to.
    fn scheme(&self) -> &'static dyn Scheme;

    /// Packed encoding of this key, zeroized on drop.
    fn marshal_binary(&self) -> Result<Zeroizing<Vec<u8>>>;

    /// Whether `other` is a key of the same scheme with the same content.
    ///
    /// Secret material is compared in constant time.
    fn equal(&self, other: &dyn PrivateKey) -> bool;

    /// The public key matching this private key.
    fn public(&self) -> Box<dyn PublicKey>;

    /// Downcast support for the type-checked scheme boundary.
    fn as_any(&self) -> &dyn Any;
}
