//! Reading and indexing a single dependency archive.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use karton_merge::namespace::ArchiveEntry;
use karton_util::errors::KartonError;
use karton_util::hash;

/// A dependency archive read into memory: identity plus every file entry.
#[derive(Debug)]
pub struct IndexedArchive {
    /// Stable id: `file-stem@sha256-prefix`. Distinguishes same-named
    /// archives in conflict messages.
    pub id: String,
    /// Archive file name without extension.
    pub name: String,
    pub path: PathBuf,
    /// Full SHA-256 of the archive file, lowercase hex.
    pub checksum: String,
    /// Archive file size in bytes.
    pub size: u64,
    pub entries: Vec<ArchiveEntry>,
}

/// Derive an archive id from its name and content checksum.
pub fn archive_id(name: &str, checksum: &str) -> String {
    format!("{name}@{}", &checksum[..12.min(checksum.len())])
}

/// Read an archive from disk and index all of its file entries.
///
/// Directory entries are skipped; entry paths are taken verbatim from the
/// archive (zip paths are already forward-slash separated).
pub fn index_archive(path: &Path) -> Result<IndexedArchive, KartonError> {
    let checksum = hash::sha256_file(path).map_err(|e| KartonError::Archive {
        message: format!("failed to read {}: {e}", path.display()),
    })?;
    let size = path
        .metadata()
        .map_err(|e| KartonError::Archive {
            message: format!("failed to stat {}: {e}", path.display()),
        })?
        .len();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "archive".to_string());
    let id = archive_id(&name, &checksum);

    let file = File::open(path).map_err(|e| KartonError::Archive {
        message: format!("failed to open {}: {e}", path.display()),
    })?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| KartonError::Archive {
        message: format!("{} is not a readable archive: {e}", path.display()),
    })?;

    let mut entries = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| KartonError::Archive {
            message: format!("failed to read entry {i} of {}: {e}", path.display()),
        })?;
        if entry.is_dir() {
            continue;
        }
        let relative_path = entry.name().to_string();
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data).map_err(|e| KartonError::Archive {
            message: format!(
                "failed to read '{relative_path}' from {}: {e}",
                path.display()
            ),
        })?;
        entries.push(ArchiveEntry {
            archive_id: id.clone(),
            relative_path,
            data,
        });
    }

    tracing::debug!(archive = %id, entries = entries.len(), "indexed archive");

    Ok(IndexedArchive {
        id,
        name,
        path: path.to_path_buf(),
        checksum,
        size,
        entries,
    })
}
