//! Bundle merge core: the merge namespace keyed by archive-relative path,
//! the packaging exclude policy, the resource conflict engine, and the
//! deterministic bundle emitter.

pub mod emit;
pub mod engine;
pub mod namespace;
pub mod policy;
