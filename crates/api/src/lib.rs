//! Public API traits and types for the pqcrypt library
//!
//! This crate provides the public API surface for the pqcrypt ecosystem: the
//! variant-erased KEM scheme interface and the error types shared by every
//! crate in the workspace.

pub mod error;
pub mod kem;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use kem::{PrivateKey, PublicKey, Scheme};
