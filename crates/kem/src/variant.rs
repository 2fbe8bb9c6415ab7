// File: crates/kem/src/variant.rs

//! The two standardized transform targets and their hash-schedule policies.
//!
//! Each policy difference of the transform lives behind a method here, so
//! the key generation / encapsulation / decapsulation flows in `kem.rs`
//! stay linear and identical for both variants. Both arms of every method
//! perform the same pattern of memory writes for a given input length;
//! nothing branches on secret data.

use sha3::digest::{Digest, ExtendableOutput, Update, XofReader};
use sha3::{Sha3_256, Shake256};
use subtle::Choice;

use crate::kem::SHARED_KEY_SIZE;

/// Selects between the two standardized hash schedules.
///
/// Injected into keys at construction; keys of different variants are
/// distinct scheme instances even at the same security level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Round-3 Kyber, as submitted to the NIST PQC competition.
    Round3,
    /// ML-KEM, the FIPS-style standard.
    MlKem,
}

impl Variant {
    /// Derive the 32-byte transform message from the encapsulation seed.
    ///
    /// Round-3 hashes the seed (a multi-target defense the standard later
    /// dropped); ML-KEM uses it directly.
    pub(crate) fn derive_message(self, seed: &[u8]) -> [u8; 32] {
        let mut m = [0u8; 32];
        match self {
            Variant::Round3 => m.copy_from_slice(&Sha3_256::digest(seed)),
            Variant::MlKem => m.copy_from_slice(seed),
        }
        m
    }

    /// Produce the encapsulation shared key from the 64-byte G digest
    /// `kr = K' ‖ r` and the transmitted ciphertext.
    ///
    /// `kr` is consumed scratch: the round-3 schedule overwrites its second
    /// half with H(ct) before the final XOF.
    pub(crate) fn encaps_shared_key(self, kr: &mut [u8; 64], ct: &[u8], ss: &mut [u8]) {
        match self {
            Variant::MlKem => ss.copy_from_slice(&kr[..SHARED_KEY_SIZE]),
            Variant::Round3 => {
                // K = KDF(K' ‖ H(ct))
                kr[32..].copy_from_slice(&Sha3_256::digest(ct));
                let mut kdf = Shake256::default();
                kdf.update(&kr[..]);
                kdf.finalize_xof().read(ss);
            }
        }
    }

    /// Produce the decapsulation shared key, substituting the implicit
    /// rejection value when `matched` is 0.
    ///
    /// `kr2` is the re-derived `K'' ‖ r'` digest (consumed scratch), `z` the
    /// rejection secret, `ct` the received ciphertext. Substitution is a
    /// branchless conditional copy; both outcomes run the same code.
    pub(crate) fn decaps_shared_key(
        self,
        kr2: &mut [u8; 64],
        z: &[u8; 32],
        ct: &[u8],
        matched: Choice,
        ss: &mut [u8],
    ) {
        match self {
            Variant::MlKem => {
                // ss = PRF(z ‖ ct), overwritten by K'' iff ct matched.
                let mut prf = Shake256::default();
                prf.update(z);
                prf.update(ct);
                prf.finalize_xof().read(ss);
                pqcrypt_internal::ct_copy(ss, &kr2[..SHARED_KEY_SIZE], matched);
            }
            Variant::Round3 => {
                // K = KDF(K''/z ‖ H(ct)): replace K'' by z iff ct mismatched,
                // then bind the ciphertext hash either way.
                kr2[32..].copy_from_slice(&Sha3_256::digest(ct));
                pqcrypt_internal::ct_copy(&mut kr2[..32], z, !matched);
                let mut kdf = Shake256::default();
                kdf.update(&kr2[..]);
                kdf.finalize_xof().read(ss);
            }
        }
    }

    /// Whether unpacking validates key encodings (normalized public keys,
    /// private-key hash consistency). The pre-standard variant accepts
    /// malformed input as-is; a known compatibility difference, not a bug.
    pub(crate) fn validates_encodings(self) -> bool {
        matches!(self, Variant::MlKem)
    }
}
