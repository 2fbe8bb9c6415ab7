// File: crates/pke/src/cpa.rs

//! The CPA-secure encryption scheme: key generation, encryption, decryption
//! and fixed-size key serialization.
//!
//! All operations are deterministic. Buffer lengths on the `*_to` methods
//! are programmer contracts and panic on mismatch; validation failures on
//! externally supplied bytes are typed errors.

use pqcrypt_api::{Error, Result};
use sha3::digest::Digest;
use sha3::Sha3_512;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::params::{ParamSet, N, POLY_BYTES};
use crate::poly::Poly;
use crate::polyvec::PolyVec;
use crate::sample;
use crate::{COIN_SIZE, MESSAGE_SIZE, SEED_SIZE};

/// A CPA public key: the vector t in the NTT domain plus the matrix seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey<P: ParamSet> {
    t: PolyVec<P>,
    rho: [u8; 32],
}

/// A CPA secret key: the vector s in the NTT domain.
#[derive(Clone)]
pub struct SecretKey<P: ParamSet> {
    s: PolyVec<P>,
}

impl<P: ParamSet> Zeroize for SecretKey<P> {
    fn zeroize(&mut self) {
        self.s.zeroize();
    }
}

impl<P: ParamSet> ZeroizeOnDrop for SecretKey<P> {}

impl<P: ParamSet> Drop for SecretKey<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Derive a key pair deterministically from `seed` using the pre-standard
/// seed expansion `(rho, sigma) = G(seed)`.
///
/// Panics if `seed` is not of length `SEED_SIZE`.
pub fn new_key_from_seed<P: ParamSet>(seed: &[u8]) -> (PublicKey<P>, SecretKey<P>) {
    assert_eq!(seed.len(), SEED_SIZE, "seed must be of length SEED_SIZE");
    let mut g = Zeroizing::new([0u8; 64]);
    g.copy_from_slice(&Sha3_512::digest(seed));
    key_from_expanded(&g)
}

/// Derive a key pair deterministically from `seed` using the standardized
/// domain-separated expansion `(rho, sigma) = G(seed ‖ k)`.
///
/// Panics if `seed` is not of length `SEED_SIZE`.
pub fn new_key_from_seed_ml_kem<P: ParamSet>(seed: &[u8]) -> (PublicKey<P>, SecretKey<P>) {
    assert_eq!(seed.len(), SEED_SIZE, "seed must be of length SEED_SIZE");
    let mut h = Sha3_512::new();
    h.update(seed);
    h.update([P::K as u8]);
    let mut g = Zeroizing::new([0u8; 64]);
    g.copy_from_slice(&h.finalize());
    key_from_expanded(&g)
}

/// t = A∘s + e over the expanded seed halves (rho public, sigma secret).
fn key_from_expanded<P: ParamSet>(g: &[u8; 64]) -> (PublicKey<P>, SecretKey<P>) {
    let mut rho = [0u8; 32];
    rho.copy_from_slice(&g[..32]);
    let sigma = &g[32..];

    let a = sample::matrix::<P>(&rho, false);
    let mut s = sample::noise_vec::<P>(sigma, 0, P::ETA1);
    let mut e = sample::noise_vec::<P>(sigma, P::K as u8, P::ETA1);
    s.ntt();
    e.ntt();

    let mut t = PolyVec::<P>::zero();
    for (row, tp) in a.iter().zip(t.polys.iter_mut()) {
        *tp = row.pointwise_acc(&s);
    }
    t.add_assign(&e);
    e.zeroize();

    (PublicKey { t, rho }, SecretKey { s })
}

impl<P: ParamSet> PublicKey<P> {
    /// Deterministically encrypt `msg` under coins `coins` into `ct`.
    ///
    /// Panics if `ct`, `msg` or `coins` are not of length `CIPHERTEXT_SIZE`,
    /// `MESSAGE_SIZE` and `COIN_SIZE` respectively.
    pub fn encrypt_to(&self, ct: &mut [u8], msg: &[u8], coins: &[u8]) {
        assert_eq!(
            ct.len(),
            P::CIPHERTEXT_SIZE,
            "ct must be of length CIPHERTEXT_SIZE"
        );
        assert_eq!(msg.len(), MESSAGE_SIZE, "msg must be of length MESSAGE_SIZE");
        assert_eq!(coins.len(), COIN_SIZE, "coins must be of length COIN_SIZE");

        let at = sample::matrix::<P>(&self.rho, true);
        let mut r = sample::noise_vec::<P>(coins, 0, P::ETA1);
        let e1 = sample::noise_vec::<P>(coins, P::K as u8, P::ETA2);
        let e2 = sample::noise_poly(coins, 2 * P::K as u8, P::ETA2);
        r.ntt();

        // u = invntt(A^T ∘ r) + e1
        let mut u = PolyVec::<P>::zero();
        for (row, (up, e1p)) in at.iter().zip(u.polys.iter_mut().zip(e1.polys.iter())) {
            let mut acc = row.pointwise_acc(&r);
            acc.inv_ntt();
            acc.add_assign(e1p);
            *up = acc;
        }

        // v = invntt(t ∘ r) + e2 + encode(msg)
        let mut v = self.t.pointwise_acc(&r);
        v.inv_ntt();
        v.add_assign(&e2);
        let mut m = Poly::from_message(msg);
        v.add_assign(&m);
        m.zeroize();
        r.zeroize();

        let (cu, cv) = ct.split_at_mut(P::K * P::DU * N / 8);
        u.compress_to(P::DU, cu);
        v.compress_to(P::DV, cv);
    }

    /// Pack into `buf` as the 12-bit vector encoding followed by rho.
    ///
    /// Panics if `buf` is not of length `PUBLIC_KEY_SIZE`.
    pub fn pack(&self, buf: &mut [u8]) {
        assert_eq!(
            buf.len(),
            P::PUBLIC_KEY_SIZE,
            "buf must be of length PUBLIC_KEY_SIZE"
        );
        let (tb, rb) = buf.split_at_mut(P::K * POLY_BYTES);
        self.t.write_bytes(tb);
        rb.copy_from_slice(&self.rho);
    }

    /// Unpack from `buf`, accepting non-canonical coefficient encodings by
    /// reducing them (the pre-standard behavior).
    ///
    /// Panics if `buf` is not of length `PUBLIC_KEY_SIZE`.
    pub fn unpack(buf: &[u8]) -> Self {
        assert_eq!(
            buf.len(),
            P::PUBLIC_KEY_SIZE,
            "buf must be of length PUBLIC_KEY_SIZE"
        );
        let (tb, rb) = buf.split_at(P::K * POLY_BYTES);
        let mut rho = [0u8; 32];
        rho.copy_from_slice(rb);
        PublicKey {
            t: PolyVec::read_bytes(tb),
            rho,
        }
    }

    /// Unpack from `buf`, rejecting non-normalized encodings (the
    /// standardized variant's canonicity check).
    ///
    /// Panics if `buf` is not of length `PUBLIC_KEY_SIZE`.
    pub fn unpack_normalized(buf: &[u8]) -> Result<Self> {
        assert_eq!(
            buf.len(),
            P::PUBLIC_KEY_SIZE,
            "buf must be of length PUBLIC_KEY_SIZE"
        );
        let (tb, rb) = buf.split_at(P::K * POLY_BYTES);
        let t = PolyVec::read_bytes_normalized(tb).ok_or(Error::InvalidKey {
            context: "pke public key not normalized",
        })?;
        let mut rho = [0u8; 32];
        rho.copy_from_slice(rb);
        Ok(PublicKey { t, rho })
    }
}

impl<P: ParamSet> SecretKey<P> {
    /// Decrypt `ct` into `msg`.
    ///
    /// Panics if `msg` or `ct` are not of length `MESSAGE_SIZE` and
    /// `CIPHERTEXT_SIZE` respectively.
    pub fn decrypt_to(&self, msg: &mut [u8], ct: &[u8]) {
        assert_eq!(msg.len(), MESSAGE_SIZE, "msg must be of length MESSAGE_SIZE");
        assert_eq!(
            ct.len(),
            P::CIPHERTEXT_SIZE,
            "ct must be of length CIPHERTEXT_SIZE"
        );

        let (cu, cv) = ct.split_at(P::K * P::DU * N / 8);
        let mut u = PolyVec::<P>::decompress(cu, P::DU);
        let mut v = Poly::decompress(cv, P::DV);
        u.ntt();

        // m = v - invntt(s ∘ u)
        let mut su = self.s.pointwise_acc(&u);
        su.inv_ntt();
        v.sub_assign(&su);
        v.to_message(msg);
        v.zeroize();
        su.zeroize();
    }

    /// Pack into `buf` as the 12-bit vector encoding of s.
    ///
    /// Panics if `buf` is not of length `SECRET_KEY_SIZE`.
    pub fn pack(&self, buf: &mut [u8]) {
        assert_eq!(
            buf.len(),
            P::SECRET_KEY_SIZE,
            "buf must be of length SECRET_KEY_SIZE"
        );
        self.s.write_bytes(buf);
    }

    /// Unpack from `buf`.
    ///
    /// Panics if `buf` is not of length `SECRET_KEY_SIZE`.
    pub fn unpack(buf: &[u8]) -> Self {
        assert_eq!(
            buf.len(),
            P::SECRET_KEY_SIZE,
            "buf must be of length SECRET_KEY_SIZE"
        );
        SecretKey {
            s: PolyVec::read_bytes(buf),
        }
    }

    /// Constant-time content equality.
    pub fn equals(&self, other: &Self) -> bool {
        let mut a = Zeroizing::new(vec![0u8; P::SECRET_KEY_SIZE]);
        let mut b = Zeroizing::new(vec![0u8; P::SECRET_KEY_SIZE]);
        self.pack(&mut a);
        other.pack(&mut b);
        pqcrypt_internal::ct_eq(&a, &b).into()
    }
}
