// File: crates/pke/src/sample.rs

//! Sampling of ring elements from extendable-output functions.
//!
//! The matrix A is expanded from a public seed by rejection-sampling 12-bit
//! candidates out of SHAKE128; noise comes from a centered binomial
//! distribution over SHAKE256 output. Both are deterministic in their seeds,
//! which key generation and the KEM's re-encryption step rely on.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake256};

use crate::params::{ParamSet, N, Q};
use crate::poly::Poly;
use crate::polyvec::PolyVec;

/// Expand the K x K matrix A (or its transpose) from `rho`.
///
/// Entry (i, j) of the sampled matrix is drawn from SHAKE128(rho ‖ j ‖ i);
/// the transposed expansion swaps the two index bytes, so encryption can
/// sample A^T without materializing A first.
pub(crate) fn matrix<P: ParamSet>(rho: &[u8; 32], transposed: bool) -> Vec<PolyVec<P>> {
    let mut rows = Vec::with_capacity(P::K);
    for i in 0..P::K {
        let mut row = PolyVec::<P>::zero();
        for j in 0..P::K {
            let mut xof = Shake128::default();
            xof.update(rho);
            if transposed {
                xof.update(&[i as u8, j as u8]);
            } else {
                xof.update(&[j as u8, i as u8]);
            }
            row.polys[j] = uniform_poly(xof.finalize_xof());
        }
        rows.push(row);
    }
    rows
}

/// Rejection-sample a uniform polynomial from an XOF stream.
fn uniform_poly(mut reader: impl XofReader) -> Poly {
    let mut poly = Poly::zero();
    let mut buf = [0u8; 3];
    let mut count = 0;

    while count < N {
        reader.read(&mut buf);

        // Two 12-bit candidates per 3-byte chunk.
        let d1 = (buf[0] as u32) | ((buf[1] as u32 & 0x0F) << 8);
        let d2 = ((buf[1] as u32) >> 4) | ((buf[2] as u32) << 4);

        if d1 < Q && count < N {
            poly.coeffs[count] = d1 as u16;
            count += 1;
        }
        if d2 < Q && count < N {
            poly.coeffs[count] = d2 as u16;
            count += 1;
        }
    }

    poly
}

/// Sample a noise polynomial from CBD_eta over SHAKE256(seed ‖ nonce).
pub(crate) fn noise_poly(seed: &[u8], nonce: u8, eta: usize) -> Poly {
    debug_assert!(eta == 2 || eta == 3);

    let mut xof = Shake256::default();
    xof.update(seed);
    xof.update(&[nonce]);
    let mut reader = xof.finalize_xof();

    let mut buf = vec![0u8; eta * N / 4];
    reader.read(&mut buf);

    // Centered binomial: difference of two eta-bit popcounts per coefficient.
    let mut poly = Poly::zero();
    let mut bit = 0;
    for c in poly.coeffs.iter_mut() {
        let mut a = 0u32;
        let mut b = 0u32;
        for _ in 0..eta {
            a += ((buf[bit / 8] >> (bit % 8)) & 1) as u32;
            bit += 1;
        }
        for _ in 0..eta {
            b += ((buf[bit / 8] >> (bit % 8)) & 1) as u32;
            bit += 1;
        }
        *c = ((a + Q - b) % Q) as u16;
    }

    poly
}

/// Sample a vector of K noise polynomials with consecutive nonces.
pub(crate) fn noise_vec<P: ParamSet>(seed: &[u8], nonce_base: u8, eta: usize) -> PolyVec<P> {
    let mut pv = PolyVec::<P>::zero();
    for (i, p) in pv.polys.iter_mut().enumerate() {
        *p = noise_poly(seed, nonce_base + i as u8, eta);
    }
    pv
}
