//! Triad CLI library: CSV bar loading and run export.
//!
//! The binary in `main.rs` wires these to the engine; they live in a library
//! so integration tests can exercise them without spawning the binary.

pub mod export;
pub mod loader;
