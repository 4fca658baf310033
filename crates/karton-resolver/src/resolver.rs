//! Archive set resolution: expand manifest dependencies into an ordered,
//! deduplicated list of indexed archives.
//!
//! Expansion is deterministic: dependencies are processed in manifest
//! (name-sorted) order, directories expand in sorted path order, and
//! duplicate paths or byte-identical archives are dropped. Indexing runs
//! in parallel with bounded concurrency, then results are reassembled in
//! resolution order before the merge step.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use karton_core::manifest::{ArchiveDependency, Manifest};
use karton_util::errors::KartonError;
use karton_util::fs::collect_archive_files;

use crate::archive::{index_archive, IndexedArchive};

const MAX_CONCURRENT_READS: usize = 8;

/// Expand the manifest's dependency archives into candidate file paths.
///
/// A missing path is fatal unless the dependency is marked `optional`.
pub fn expand_dependencies(
    manifest: &Manifest,
    project_dir: &Path,
) -> miette::Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();
    let mut seen = HashSet::new();

    for (name, dep) in &manifest.dependencies {
        let (path, dir, optional) = match dep {
            ArchiveDependency::Path(p) => (Some(p.as_str()), None, false),
            ArchiveDependency::Detailed {
                path,
                dir,
                optional,
            } => (path.as_deref(), dir.as_deref(), *optional),
        };

        if path.is_none() && dir.is_none() {
            return Err(KartonError::Manifest {
                message: format!("dependency '{name}' declares neither 'path' nor 'dir'"),
            }
            .into());
        }

        if let Some(rel) = path {
            let full = project_dir.join(rel);
            if !full.is_file() {
                if optional {
                    tracing::debug!(dep = %name, path = rel, "optional archive missing, skipped");
                    continue;
                }
                return Err(KartonError::Archive {
                    message: format!("dependency '{name}': archive {rel} not found"),
                }
                .into());
            }
            push_unique(&mut candidates, &mut seen, full);
        }

        if let Some(rel) = dir {
            let full = project_dir.join(rel);
            if !full.is_dir() {
                if optional {
                    continue;
                }
                return Err(KartonError::Archive {
                    message: format!("dependency '{name}': directory {rel} not found"),
                }
                .into());
            }
            let mut found = Vec::new();
            collect_archive_files(&full, &mut found);
            for file in found {
                push_unique(&mut candidates, &mut seen, file);
            }
        }
    }

    Ok(candidates)
}

fn push_unique(candidates: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>, path: PathBuf) {
    let key = path.canonicalize().unwrap_or_else(|_| path.clone());
    if seen.insert(key) {
        candidates.push(path);
    }
}

/// Resolve and index the full archive set for a project.
///
/// Archives are indexed in parallel (at most [`MAX_CONCURRENT_READS`] reads
/// in flight) and returned in resolution order. Byte-identical archives
/// encountered under different paths are deduplicated by checksum.
pub async fn resolve(
    manifest: &Manifest,
    project_dir: &Path,
) -> miette::Result<Vec<IndexedArchive>> {
    let candidates = expand_dependencies(manifest, project_dir)?;

    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_READS));
    let mut join_set = JoinSet::new();

    for (order, path) in candidates.into_iter().enumerate() {
        let sem = semaphore.clone();
        join_set.spawn(async move {
            let _permit = sem.acquire().await;
            let result = tokio::task::spawn_blocking(move || index_archive(&path)).await;
            (order, result)
        });
    }

    let mut indexed: Vec<(usize, IndexedArchive)> = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        let (order, result) = joined.map_err(|e| KartonError::Generic {
            message: format!("archive indexing task failed: {e}"),
        })?;
        let archive = result.map_err(|e| KartonError::Generic {
            message: format!("archive indexing task failed: {e}"),
        })??;
        indexed.push((order, archive));
    }

    // Reassemble resolution order before the serialized merge step.
    indexed.sort_by_key(|(order, _)| *order);

    let mut seen_checksums = HashSet::new();
    let mut archives = Vec::with_capacity(indexed.len());
    for (_, archive) in indexed {
        if !seen_checksums.insert(archive.checksum.clone()) {
            tracing::debug!(archive = %archive.id, "byte-identical archive skipped");
            continue;
        }
        archives.push(archive);
    }

    Ok(archives)
}
