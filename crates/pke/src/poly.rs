// File: crates/pke/src/poly.rs

//! Arithmetic in the ring Z_q[X]/(X^256 + 1).
//!
//! Coefficients are kept canonical in `[0, q)` throughout, so every value
//! is directly serializable and the NTT works in the plain domain without
//! Montgomery bookkeeping. The forward transform is the incomplete
//! negacyclic NTT: seven butterfly layers mapping a polynomial onto 128
//! quadratic factors X^2 - zeta^(2*brv(i)+1), multiplied pairwise by
//! `basemul`.

use zeroize::Zeroize;

use crate::params::{N, POLY_BYTES, Q};

/// Primitive 256th root of unity mod q.
const ZETA: u64 = 17;

/// 128^-1 mod q, the final scaling of the inverse transform.
const INV_128: u16 = 3303;

const fn bitrev7(x: usize) -> usize {
    let mut r = 0;
    let mut i = 0;
    while i < 7 {
        r |= ((x >> i) & 1) << (6 - i);
        i += 1;
    }
    r
}

const fn pow_mod(base: u64, exp: usize) -> u16 {
    let mut acc = 1u64;
    let mut b = base;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            acc = acc * b % Q as u64;
        }
        b = b * b % Q as u64;
        e >>= 1;
    }
    acc as u16
}

const fn zeta_table() -> [u16; 128] {
    let mut t = [0u16; 128];
    let mut k = 0;
    while k < 128 {
        t[k] = pow_mod(ZETA, bitrev7(k));
        k += 1;
    }
    t
}

/// Twiddle factors zeta^brv(k), generated instead of embedded.
const ZETAS: [u16; 128] = zeta_table();

#[inline]
fn fqadd(a: u16, b: u16) -> u16 {
    ((a as u32 + b as u32) % Q) as u16
}

#[inline]
fn fqsub(a: u16, b: u16) -> u16 {
    ((a as u32 + Q - b as u32) % Q) as u16
}

#[inline]
fn fqmul(a: u16, b: u16) -> u16 {
    (a as u32 * b as u32 % Q) as u16
}

/// Compress a canonical coefficient to `d` bits: round(2^d / q * x) mod 2^d.
#[inline]
fn compress_coeff(x: u16, d: usize) -> u16 {
    let t = (((x as u64) << d) + Q as u64 / 2) / Q as u64;
    (t & ((1 << d) - 1)) as u16
}

/// Decompress a `d`-bit value back to a canonical coefficient.
#[inline]
fn decompress_coeff(y: u16, d: usize) -> u16 {
    (((y as u32) * Q + (1 << (d - 1))) >> d) as u16
}

/// A polynomial with canonical coefficients.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub(crate) struct Poly {
    pub(crate) coeffs: [u16; N],
}

impl Poly {
    pub(crate) fn zero() -> Self {
        Poly { coeffs: [0u16; N] }
    }

    pub(crate) fn add_assign(&mut self, other: &Poly) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a = fqadd(*a, *b);
        }
    }

    pub(crate) fn sub_assign(&mut self, other: &Poly) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a = fqsub(*a, *b);
        }
    }

    /// Forward NTT, in place.
    pub(crate) fn ntt(&mut self) {
        let mut k = 1;
        let mut len = 128;
        while len >= 2 {
            let mut start = 0;
            while start < N {
                let zeta = ZETAS[k];
                k += 1;
                for j in start..start + len {
                    let t = fqmul(zeta, self.coeffs[j + len]);
                    self.coeffs[j + len] = fqsub(self.coeffs[j], t);
                    self.coeffs[j] = fqadd(self.coeffs[j], t);
                }
                start += 2 * len;
            }
            len >>= 1;
        }
    }

    /// Inverse NTT, in place. Uses zeta^-e = -zeta^(128-e), so the forward
    /// twiddle table is walked backwards and the sign lands in the butterfly.
    pub(crate) fn inv_ntt(&mut self) {
        let mut k = 127;
        let mut len = 2;
        while len <= 128 {
            let mut start = 0;
            while start < N {
                let zeta = ZETAS[k];
                k -= 1;
                for j in start..start + len {
                    let t = self.coeffs[j];
                    self.coeffs[j] = fqadd(t, self.coeffs[j + len]);
                    self.coeffs[j + len] = fqmul(zeta, fqsub(self.coeffs[j + len], t));
                }
                start += 2 * len;
            }
            len <<= 1;
        }
        for c in self.coeffs.iter_mut() {
            *c = fqmul(*c, INV_128);
        }
    }

    /// Accumulate the NTT-domain product of `a` and `b` into `self`.
    ///
    /// Pairs (2i, 2i+1) live in Z_q[X]/(X^2 - zeta'), with zeta' running
    /// through the odd twiddles; consecutive pairs use +/- the same zeta.
    pub(crate) fn basemul_acc(&mut self, a: &Poly, b: &Poly) {
        for i in 0..N / 4 {
            let zeta = ZETAS[64 + i];
            let (r0, r1) = basemul(
                a.coeffs[4 * i],
                a.coeffs[4 * i + 1],
                b.coeffs[4 * i],
                b.coeffs[4 * i + 1],
                zeta,
            );
            self.coeffs[4 * i] = fqadd(self.coeffs[4 * i], r0);
            self.coeffs[4 * i + 1] = fqadd(self.coeffs[4 * i + 1], r1);

            let (r2, r3) = basemul(
                a.coeffs[4 * i + 2],
                a.coeffs[4 * i + 3],
                b.coeffs[4 * i + 2],
                b.coeffs[4 * i + 3],
                (Q as u16) - zeta,
            );
            self.coeffs[4 * i + 2] = fqadd(self.coeffs[4 * i + 2], r2);
            self.coeffs[4 * i + 3] = fqadd(self.coeffs[4 * i + 3], r3);
        }
    }

    /// Pack at 12 bits per coefficient into `out` (`POLY_BYTES` bytes).
    pub(crate) fn write_bytes(&self, out: &mut [u8]) {
        assert_eq!(out.len(), POLY_BYTES, "polynomial buffer size");
        pack_bits(&self.coeffs, 12, |c| c, out);
    }

    /// Unpack 12-bit coefficients, reducing each mod q.
    pub(crate) fn read_bytes(buf: &[u8]) -> Poly {
        assert_eq!(buf.len(), POLY_BYTES, "polynomial buffer size");
        let mut p = Poly::zero();
        unpack_bits(buf, 12, &mut p.coeffs, |v| (v as u32 % Q) as u16);
        p
    }

    /// Unpack 12-bit coefficients, rejecting any value outside `[0, q)`.
    ///
    /// Returns `None` for a non-normalized encoding; the standardized
    /// variant's canonicity check on public keys.
    pub(crate) fn read_bytes_normalized(buf: &[u8]) -> Option<Poly> {
        assert_eq!(buf.len(), POLY_BYTES, "polynomial buffer size");
        let mut p = Poly::zero();
        let mut in_range = true;
        unpack_bits(buf, 12, &mut p.coeffs, |v| {
            in_range &= (v as u32) < Q;
            v
        });
        in_range.then_some(p)
    }

    /// Compress to `d` bits per coefficient into `out` (`d * N / 8` bytes).
    pub(crate) fn compress_to(&self, d: usize, out: &mut [u8]) {
        assert_eq!(out.len(), d * N / 8, "compressed polynomial buffer size");
        pack_bits(&self.coeffs, d, |c| compress_coeff(c, d), out);
    }

    /// Decompress `d`-bit coefficients.
    pub(crate) fn decompress(buf: &[u8], d: usize) -> Poly {
        assert_eq!(buf.len(), d * N / 8, "compressed polynomial buffer size");
        let mut p = Poly::zero();
        unpack_bits(buf, d, &mut p.coeffs, |v| decompress_coeff(v, d));
        p
    }

    /// Encode a 32-byte message, one bit per coefficient at (q+1)/2.
    pub(crate) fn from_message(msg: &[u8]) -> Poly {
        assert_eq!(msg.len(), crate::MESSAGE_SIZE, "message size");
        let mut p = Poly::zero();
        for (i, c) in p.coeffs.iter_mut().enumerate() {
            let bit = (msg[i / 8] >> (i % 8)) & 1;
            *c = bit as u16 * ((Q as u16 + 1) / 2);
        }
        p
    }

    /// Decode back to a 32-byte message by rounding each coefficient.
    pub(crate) fn to_message(&self, msg: &mut [u8]) {
        assert_eq!(msg.len(), crate::MESSAGE_SIZE, "message size");
        msg.fill(0);
        for (i, &c) in self.coeffs.iter().enumerate() {
            let bit = compress_coeff(c, 1) as u8;
            msg[i / 8] |= bit << (i % 8);
        }
    }
}

fn basemul(a0: u16, a1: u16, b0: u16, b1: u16, zeta: u16) -> (u16, u16) {
    let r0 = fqadd(fqmul(fqmul(a1, b1), zeta), fqmul(a0, b0));
    let r1 = fqadd(fqmul(a0, b1), fqmul(a1, b0));
    (r0, r1)
}

/// Little-endian bit-packing of `N` mapped coefficients at `d` bits each.
fn pack_bits(coeffs: &[u16; N], d: usize, map: impl Fn(u16) -> u16, out: &mut [u8]) {
    let mut acc: u32 = 0;
    let mut acc_bits = 0;
    let mut idx = 0;
    for &c in coeffs {
        acc |= (map(c) as u32) << acc_bits;
        acc_bits += d;
        while acc_bits >= 8 {
            out[idx] = acc as u8;
            idx += 1;
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    debug_assert_eq!(idx, out.len());
}

/// Little-endian unpacking of `N` values at `d` bits each, through `map`.
fn unpack_bits(buf: &[u8], d: usize, coeffs: &mut [u16; N], mut map: impl FnMut(u16) -> u16) {
    let mut acc: u32 = 0;
    let mut acc_bits = 0;
    let mut idx = 0;
    for &b in buf {
        acc |= (b as u32) << acc_bits;
        acc_bits += 8;
        while acc_bits >= d && idx < N {
            coeffs[idx] = map((acc & ((1 << d) - 1)) as u16);
            acc >>= d;
            acc_bits -= d;
            idx += 1;
        }
    }
    debug_assert_eq!(idx, N);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeta_table_starts_at_one() {
        // brv(0) = 0, so the first twiddle is 17^0.
        assert_eq!(ZETAS[0], 1);
        // zeta^64 = 17^brv(1): the table is a permutation of distinct powers.
        let mut seen = ZETAS.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 128);
    }

    #[test]
    fn ntt_round_trips() {
        let mut p = Poly::zero();
        for (i, c) in p.coeffs.iter_mut().enumerate() {
            *c = (i as u32 * 7 % Q) as u16;
        }
        let original = p.clone();
        p.ntt();
        assert_ne!(p, original);
        p.inv_ntt();
        assert_eq!(p, original);
    }

    #[test]
    fn basemul_matches_schoolbook_on_constants() {
        // Constant polynomials stay constant under NTT-domain multiplication:
        // ntt(c) has all pairs equal to (c, 0) only after the transform, so
        // go the long way round and check inv(ntt(a) * ntt(b)) = a*b for
        // a = 3, b = 5 (degree-0 polynomials).
        let mut a = Poly::zero();
        let mut b = Poly::zero();
        a.coeffs[0] = 3;
        b.coeffs[0] = 5;
        a.ntt();
        b.ntt();
        let mut prod = Poly::zero();
        prod.basemul_acc(&a, &b);
        prod.inv_ntt();
        let mut expected = Poly::zero();
        expected.coeffs[0] = 15;
        assert_eq!(prod, expected);
    }

    #[test]
    fn basemul_matches_schoolbook_on_x_times_x() {
        // X * X = X^2.
        let mut a = Poly::zero();
        a.coeffs[1] = 1;
        let mut b = a.clone();
        a.ntt();
        b.ntt();
        let mut prod = Poly::zero();
        prod.basemul_acc(&a, &b);
        prod.inv_ntt();
        let mut expected = Poly::zero();
        expected.coeffs[2] = 1;
        assert_eq!(prod, expected);
    }

    #[test]
    fn negacyclic_wraparound() {
        // X^255 * X = X^256 = -1 in this ring.
        let mut a = Poly::zero();
        let mut b = Poly::zero();
        a.coeffs[255] = 1;
        b.coeffs[1] = 1;
        a.ntt();
        b.ntt();
        let mut prod = Poly::zero();
        prod.basemul_acc(&a, &b);
        prod.inv_ntt();
        let mut expected = Poly::zero();
        expected.coeffs[0] = (Q - 1) as u16;
        assert_eq!(prod, expected);
    }

    #[test]
    fn serialization_round_trips() {
        let mut p = Poly::zero();
        for (i, c) in p.coeffs.iter_mut().enumerate() {
            *c = (i as u32 * 13 % Q) as u16;
        }
        let mut buf = [0u8; POLY_BYTES];
        p.write_bytes(&mut buf);
        assert_eq!(Poly::read_bytes(&buf), p);
        assert_eq!(Poly::read_bytes_normalized(&buf), Some(p));
    }

    #[test]
    fn normalized_read_rejects_out_of_range() {
        // First coefficient = q, one past the canonical range.
        let mut buf = [0u8; POLY_BYTES];
        buf[0] = (Q & 0xFF) as u8;
        buf[1] = (Q >> 8) as u8;
        assert_eq!(Poly::read_bytes_normalized(&buf), None);
        // The permissive reader reduces instead.
        assert_eq!(Poly::read_bytes(&buf).coeffs[0], 0);
    }

    #[test]
    fn message_round_trips() {
        let msg: Vec<u8> = (0..32).map(|i| i as u8 ^ 0x5A).collect();
        let p = Poly::from_message(&msg);
        let mut out = [0u8; 32];
        p.to_message(&mut out);
        assert_eq!(out.as_slice(), msg.as_slice());
    }

    #[test]
    fn compression_error_is_bounded() {
        for d in [4usize, 5, 10, 11] {
            let bound = (Q as i32 + (1 << (d + 1)) - 1) / (1 << (d + 1));
            for x in (0..Q as u16).step_by(17) {
                let y = decompress_coeff(compress_coeff(x, d), d);
                let diff = (x as i32 - y as i32).rem_euclid(Q as i32);
                let dist = diff.min(Q as i32 - diff);
                assert!(dist <= bound, "d={} x={} y={} dist={}", d, x, y, dist);
            }
        }
    }
}
