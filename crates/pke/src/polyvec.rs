// File: crates/pke/src/polyvec.rs

//! Vectors of ring elements of dimension K.

use core::marker::PhantomData;

use zeroize::Zeroize;

use crate::params::{ParamSet, N, POLY_BYTES};
use crate::poly::Poly;

/// A vector of K polynomials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PolyVec<P: ParamSet> {
    pub(crate) polys: Vec<Poly>,
    _params: PhantomData<fn() -> P>,
}

impl<P: ParamSet> PolyVec<P> {
    pub(crate) fn zero() -> Self {
        PolyVec {
            polys: vec![Poly::zero(); P::K],
            _params: PhantomData,
        }
    }

    /// Forward NTT on each component, in place.
    pub(crate) fn ntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.ntt();
        }
    }

    /// Inverse NTT on each component, in place.
    pub(crate) fn inv_ntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.inv_ntt();
        }
    }

    pub(crate) fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            a.add_assign(b);
        }
    }

    /// Inner product in the NTT domain: sum of pairwise basemuls.
    pub(crate) fn pointwise_acc(&self, other: &Self) -> Poly {
        let mut acc = Poly::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            acc.basemul_acc(a, b);
        }
        acc
    }

    /// Pack all components at 12 bits per coefficient.
    pub(crate) fn write_bytes(&self, out: &mut [u8]) {
        assert_eq!(out.len(), P::K * POLY_BYTES, "polyvec buffer size");
        for (p, chunk) in self.polys.iter().zip(out.chunks_exact_mut(POLY_BYTES)) {
            p.write_bytes(chunk);
        }
    }

    /// Unpack all components, reducing coefficients mod q.
    pub(crate) fn read_bytes(buf: &[u8]) -> Self {
        assert_eq!(buf.len(), P::K * POLY_BYTES, "polyvec buffer size");
        PolyVec {
            polys: buf.chunks_exact(POLY_BYTES).map(Poly::read_bytes).collect(),
            _params: PhantomData,
        }
    }

    /// Unpack all components, rejecting non-canonical coefficients.
    pub(crate) fn read_bytes_normalized(buf: &[u8]) -> Option<Self> {
        assert_eq!(buf.len(), P::K * POLY_BYTES, "polyvec buffer size");
        let polys = buf
            .chunks_exact(POLY_BYTES)
            .map(Poly::read_bytes_normalized)
            .collect::<Option<Vec<_>>>()?;
        Some(PolyVec {
            polys,
            _params: PhantomData,
        })
    }

    /// Compress all components at `d` bits per coefficient.
    pub(crate) fn compress_to(&self, d: usize, out: &mut [u8]) {
        assert_eq!(out.len(), P::K * d * N / 8, "compressed polyvec buffer size");
        for (p, chunk) in self.polys.iter().zip(out.chunks_exact_mut(d * N / 8)) {
            p.compress_to(d, chunk);
        }
    }

    /// Decompress all components from `d` bits per coefficient.
    pub(crate) fn decompress(buf: &[u8], d: usize) -> Self {
        assert_eq!(buf.len(), P::K * d * N / 8, "compressed polyvec buffer size");
        PolyVec {
            polys: buf
                .chunks_exact(d * N / 8)
                .map(|chunk| Poly::decompress(chunk, d))
                .collect(),
            _params: PhantomData,
        }
    }
}

impl<P: ParamSet> Zeroize for PolyVec<P> {
    fn zeroize(&mut self) {
        for p in self.polys.iter_mut() {
            p.zeroize();
        }
    }
}
