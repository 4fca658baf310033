//! Shared utilities for the Karton packaging tool.
//!
//! This crate provides cross-cutting concerns used by all other Karton
//! crates: error types, filesystem helpers, cryptographic hashing, process
//! spawning for manifest hooks, and terminal progress indicators.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;
pub mod progress;
