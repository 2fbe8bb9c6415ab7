//! Internal building blocks shared by the pqcrypt crates
//!
//! Nothing in here is a public contract of the library; the modules exist so
//! the higher-level crates agree on one implementation of the operations
//! where a second, subtly different copy would be a liability.

pub mod constant_time;

pub use constant_time::{ct_copy, ct_eq};
