//! Bundle emitter: writes the deduplicated file set to the output artifact.
//!
//! Output is byte-identical across repeated invocations on the same inputs:
//! entries are written in sorted path order with fixed timestamps,
//! permissions, and compression settings.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use karton_util::errors::KartonError;

use crate::engine::MergePlan;

/// Reserved path of the bundle metadata entry.
pub const METADATA_ENTRY: &str = "META-INF/karton/bundle.json";

/// Identity and configuration stamped into the bundle.
///
/// Contains no timestamps or host-specific values, so the serialized form
/// is stable across invocations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BundleMetadata {
    pub application_id: String,
    pub version_code: u32,
    pub version_name: String,
    pub build_type: String,
    pub signing_config: Option<String>,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub compile_sdk: u32,
}

/// Write `plan` and `metadata` to a bundle at `out_path`.
///
/// The metadata entry is written first, then every surviving entry in
/// sorted path order.
pub fn write_bundle(
    plan: &MergePlan,
    metadata: &BundleMetadata,
    out_path: &Path,
) -> miette::Result<()> {
    if plan
        .entries
        .iter()
        .any(|e| e.relative_path == METADATA_ENTRY)
    {
        return Err(KartonError::Archive {
            message: format!("an archive contributes the reserved path '{METADATA_ENTRY}'"),
        }
        .into());
    }

    let file = File::create(out_path).map_err(KartonError::Io)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        // Fixed epoch timestamp keeps repeated runs byte-identical.
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    let metadata_json =
        serde_json::to_vec_pretty(metadata).map_err(|e| KartonError::Generic {
            message: format!("failed to serialize bundle metadata: {e}"),
        })?;
    writer
        .start_file(METADATA_ENTRY, options)
        .map_err(zip_err)?;
    writer.write_all(&metadata_json).map_err(KartonError::Io)?;

    for entry in &plan.entries {
        writer
            .start_file(entry.relative_path.as_str(), options)
            .map_err(zip_err)?;
        writer.write_all(&entry.data).map_err(KartonError::Io)?;
    }

    writer.finish().map_err(zip_err)?;
    Ok(())
}

fn zip_err(e: zip::result::ZipError) -> KartonError {
    KartonError::Archive {
        message: format!("failed to write bundle: {e}"),
    }
}
