//! Dependency archive resolution: expands manifest dependency entries into
//! an ordered, deduplicated set of archives and indexes their contents.

pub mod archive;
pub mod resolver;
