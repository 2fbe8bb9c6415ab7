//! Constant-time operations to prevent timing attacks
//!
//! The selection primitive here is the load-bearing piece of implicit
//! rejection in the KEM core: "select A or B based on equality" must never
//! become a branch. Results stay in `subtle::Choice` form for as long as
//! possible so callers are not tempted to collapse a secret-derived bit into
//! a branchable `bool`.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time comparison of two byte slices.
///
/// Returns a `Choice` of 1 if the slices are equal, 0 otherwise. The
/// comparison runs in time independent of the slice contents. Slices of
/// different lengths compare unequal; length itself is not a secret.
pub fn ct_eq(a: &[u8], b: &[u8]) -> Choice {
    if a.len() != b.len() {
        return Choice::from(0);
    }
    a.ct_eq(b)
}

/// Constant-time conditional copy.
///
/// Overwrites `dst` with `src` when `choice` is 1 and leaves it unchanged
/// when `choice` is 0, touching the same memory in the same order either
/// way.
///
/// Panics if the slices differ in length; lengths are fixed by the caller's
/// buffer contract and never data-dependent.
pub fn ct_copy(dst: &mut [u8], src: &[u8], choice: Choice) {
    assert_eq!(
        dst.len(),
        src.len(),
        "ct_copy requires equal-length slices"
    );

    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = u8::conditional_select(d, s, choice);
    }
}
