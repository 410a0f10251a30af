//! Configuration types
//!
//! Network settings are fixed at build time; timings are compile-time
//! constants.

pub mod types;

pub use types::*;
