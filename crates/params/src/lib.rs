//! Parameter constants for the pqcrypt library
//!
//! Pure constant tables; no code here performs cryptography. Each algorithm
//! crate pins its compile-time sizes to these values so a parameter typo
//! shows up as a single-source diff instead of a scattered one.

pub mod kyber;
