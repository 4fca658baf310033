//! Conflict policy engine: applies the exclude policy to a merge namespace
//! and guarantees every surviving path has exactly one entry.

use std::fmt;

use karton_util::errors::KartonError;

use crate::namespace::{ArchiveEntry, MergeNamespace};
use crate::policy::PackagingPolicy;

/// The deduplicated file set surviving policy application.
///
/// Entries are sorted by path and each path appears exactly once.
#[derive(Debug, Default)]
pub struct MergePlan {
    pub entries: Vec<ArchiveEntry>,
    /// Paths dropped by the exclude policy, in sorted order.
    pub excluded: Vec<String>,
}

/// A single unresolved collision: one path contributed by several archives
/// with no exclude rule covering it.
#[derive(Debug, Clone)]
pub struct ResourceConflict {
    pub path: String,
    pub archives: Vec<String>,
}

/// A report of all unresolved resource conflicts in a namespace.
#[derive(Debug, Default)]
pub struct ConflictReport {
    pub conflicts: Vec<ResourceConflict>,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, conflict: ResourceConflict) {
        self.conflicts.push(conflict);
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflicts.is_empty() {
            return write!(f, "No resource conflicts.");
        }
        writeln!(f, "Resource conflicts ({}):", self.conflicts.len())?;
        for c in &self.conflicts {
            writeln!(f, "  {} <- {}", c.path, c.archives.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for ResourceConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.path, self.archives.join(", "))
    }
}

/// Apply the exclude policy and resolve the namespace to one entry per path.
///
/// For each path: if it matches an exclude rule, all candidates are dropped;
/// otherwise a single candidate survives as-is, and more than one candidate
/// fails with [`KartonError::DuplicateResource`] naming the path and every
/// contributing archive. Paths iterate in sorted order, so the first failure
/// is deterministic for a given input set.
pub fn apply(namespace: MergeNamespace, policy: &PackagingPolicy) -> miette::Result<MergePlan> {
    let mut plan = MergePlan::default();

    for (path, mut candidates) in namespace.into_iter_sorted() {
        if policy.is_excluded(&path) {
            tracing::debug!(%path, candidates = candidates.len(), "excluded by policy");
            plan.excluded.push(path);
            continue;
        }
        match candidates.len() {
            1 => plan.entries.push(candidates.remove(0)),
            _ => {
                return Err(KartonError::DuplicateResource {
                    path,
                    archives: candidates.into_iter().map(|e| e.archive_id).collect(),
                }
                .into())
            }
        }
    }

    Ok(plan)
}

/// Collect every unresolved collision without failing. Used by `karton
/// check` to report all conflicts at once.
pub fn detect_conflicts(namespace: &MergeNamespace, policy: &PackagingPolicy) -> ConflictReport {
    let mut report = ConflictReport::new();
    for (path, candidates) in namespace.iter() {
        if candidates.len() > 1 && !policy.is_excluded(path) {
            report.add(ResourceConflict {
                path: path.to_string(),
                archives: candidates.iter().map(|e| e.archive_id.clone()).collect(),
            });
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(archive: &str, path: &str, data: &[u8]) -> ArchiveEntry {
        ArchiveEntry {
            archive_id: archive.to_string(),
            relative_path: path.to_string(),
            data: data.to_vec(),
        }
    }

    fn policy(patterns: &[&str]) -> PackagingPolicy {
        let patterns: Vec<String> = patterns.iter().map(|s| s.to_string()).collect();
        PackagingPolicy::new(&patterns).unwrap()
    }

    #[test]
    fn every_surviving_path_has_one_entry() {
        let mut ns = MergeNamespace::new();
        ns.insert(entry("a@1", "classes/App.class", b"a"));
        ns.insert(entry("b@2", "assets/logo.png", b"b"));
        ns.insert(entry("a@1", "META-INF/LICENSE", b"l1"));
        ns.insert(entry("b@2", "META-INF/LICENSE", b"l2"));

        let plan = apply(ns, &policy(&["META-INF/LICENSE"])).unwrap();
        let mut paths: Vec<&str> = plan.entries.iter().map(|e| e.relative_path.as_str()).collect();
        let distinct: std::collections::BTreeSet<&str> = paths.iter().copied().collect();
        assert_eq!(paths.len(), distinct.len());
        paths.sort();
        assert_eq!(paths, vec!["assets/logo.png", "classes/App.class"]);
    }

    #[test]
    fn excluded_path_dropped_even_with_single_candidate() {
        let mut ns = MergeNamespace::new();
        ns.insert(entry("a@1", "META-INF/NOTICE", b"n"));
        let plan = apply(ns, &policy(&["META-INF/NOTICE"])).unwrap();
        assert!(plan.entries.is_empty());
        assert_eq!(plan.excluded, vec!["META-INF/NOTICE"]);
    }

    #[test]
    fn unresolved_collision_fails_naming_all_archives() {
        let mut ns = MergeNamespace::new();
        let path = "org/bouncycastle/x509/CertPathReviewerMessages.properties";
        ns.insert(entry("stripe@ab", path, b"x"));
        ns.insert(entry("bcprov@cd", path, b"y"));

        let err = apply(ns, &PackagingPolicy::empty()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(path), "got: {msg}");
        assert!(msg.contains("stripe@ab"), "got: {msg}");
        assert!(msg.contains("bcprov@cd"), "got: {msg}");
    }

    #[test]
    fn first_failure_is_deterministic_sorted_order() {
        let mut ns = MergeNamespace::new();
        ns.insert(entry("a", "zz/dup", b""));
        ns.insert(entry("b", "zz/dup", b""));
        ns.insert(entry("a", "aa/dup", b""));
        ns.insert(entry("b", "aa/dup", b""));

        let err = apply(ns, &PackagingPolicy::empty()).unwrap_err();
        assert!(err.to_string().contains("aa/dup"), "got: {err}");
    }

    #[test]
    fn detect_conflicts_reports_all() {
        let mut ns = MergeNamespace::new();
        ns.insert(entry("a", "one", b""));
        ns.insert(entry("b", "one", b""));
        ns.insert(entry("a", "two", b""));
        ns.insert(entry("b", "two", b""));
        ns.insert(entry("a", "clean", b""));

        let report = detect_conflicts(&ns, &PackagingPolicy::empty());
        assert_eq!(report.len(), 2);
        let s = report.to_string();
        assert!(s.contains("one") && s.contains("two"), "got: {s}");
    }

    #[test]
    fn detect_conflicts_respects_excludes() {
        let mut ns = MergeNamespace::new();
        ns.insert(entry("a", "META-INF/LICENSE", b""));
        ns.insert(entry("b", "META-INF/LICENSE", b""));
        let report = detect_conflicts(&ns, &policy(&["META-INF/LICENSE"]));
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "No resource conflicts.");
    }
}
