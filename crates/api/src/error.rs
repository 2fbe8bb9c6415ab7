// File: crates/api/src/error.rs

//! Error type definitions for KEM operations

use core::fmt;

/// Primary error type for KEM operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An input buffer did not match its required fixed length.
    ///
    /// Detected before any cryptographic computation; the input is never
    /// truncated or padded.
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A key failed the structural checks performed while unpacking.
    ///
    /// Only the standardized (ML-KEM) variant performs these checks: a
    /// non-normalized public key encoding, or a private key whose embedded
    /// hash disagrees with its embedded public key.
    InvalidKey {
        context: &'static str,
    },

    /// A key belonging to a different scheme instance was supplied.
    TypeMismatch {
        context: &'static str,
    },

    /// The underlying randomness source failed to produce bytes.
    ///
    /// Propagated verbatim; never substituted with a deterministic fallback.
    RandomGeneration {
        context: &'static str,
    },
}

/// Result type for KEM operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLength {
                context,
                expected,
                actual,
            } => write!(
                f,
                "{}: invalid length, expected {} bytes, got {}",
                context, expected, actual
            ),
            Error::InvalidKey { context } => {
                write!(f, "{}: key failed validation", context)
            }
            Error::TypeMismatch { context } => {
                write!(f, "{}: key belongs to a different scheme", context)
            }
            Error::RandomGeneration { context } => {
                write!(f, "{}: randomness source failure", context)
            }
        }
    }
}

impl std::error::Error for Error {}
