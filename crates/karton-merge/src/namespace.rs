use std::collections::BTreeMap;

/// A single file contributed by a dependency archive. Immutable once read.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Id of the contributing archive (`name@sha256-prefix`).
    pub archive_id: String,
    /// Archive-relative path, forward-slash separated.
    pub relative_path: String,
    pub data: Vec<u8>,
}

/// The union of all archive contents, keyed by archive-relative path.
///
/// Each path maps to the ordered list of candidate entries contributing it;
/// candidate order is archive resolution order. Keys iterate in sorted
/// order, which keeps every downstream step deterministic.
#[derive(Debug, Default)]
pub struct MergeNamespace {
    entries: BTreeMap<String, Vec<ArchiveEntry>>,
}

impl MergeNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one entry, appending to the candidate list for its path.
    pub fn insert(&mut self, entry: ArchiveEntry) {
        self.entries
            .entry(entry.relative_path.clone())
            .or_default()
            .push(entry);
    }

    /// Insert all entries of one archive, preserving their order.
    pub fn add_archive(&mut self, entries: impl IntoIterator<Item = ArchiveEntry>) {
        for entry in entries {
            self.insert(entry);
        }
    }

    /// Candidate entries for a path, in archive resolution order.
    pub fn candidates(&self, path: &str) -> Option<&[ArchiveEntry]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    /// All paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct paths in the namespace.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(path, candidates)` in sorted path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ArchiveEntry])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Consume the namespace, yielding `(path, candidates)` in sorted order.
    pub fn into_iter_sorted(self) -> impl Iterator<Item = (String, Vec<ArchiveEntry>)> {
        self.entries.into_iter()
    }
}
