//! Core data types for the Karton packaging tool.
//!
//! This crate defines the fundamental types that represent a Karton project:
//! manifest parsing, application identity, SDK and Java compatibility levels,
//! dependency archive declarations, packaging excludes, signing configs,
//! build types, and the embedded project template.
//!
//! This crate is intentionally free of async code and archive I/O.

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "Karton.toml";

/// File name of the per-project env overrides file.
pub const ENV_FILE: &str = ".karton.env";

pub mod buildtype;
pub mod manifest;
pub mod properties;
pub mod template;
