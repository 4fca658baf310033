//! High-level operations wiring CLI commands to the Karton subsystems.

pub mod ops_archives;
pub mod ops_bundle;
pub mod ops_check;
pub mod ops_clean;
pub mod ops_exclude;
pub mod ops_init;
pub mod ops_new;

use std::path::{Path, PathBuf};

use karton_core::buildtype::ResolvedBuildType;
use karton_core::manifest::Manifest;
use karton_util::errors::KartonError;
use karton_util::fs::find_ancestor_with;

/// Shared per-invocation context: project root, parsed manifest, and the
/// selected build type.
pub struct ProjectContext {
    pub project_dir: PathBuf,
    pub manifest: Manifest,
    pub build_type: ResolvedBuildType,
    pub build_dir: PathBuf,
}

impl ProjectContext {
    /// Locate the project root upward from `start`, load and validate the
    /// manifest, and resolve the selected build type (default `debug`).
    pub fn load(start: &Path, build_type: Option<&str>) -> miette::Result<Self> {
        let project_dir = find_project_root(start)?;
        let manifest = Manifest::from_path(&project_dir.join(karton_core::MANIFEST_FILE))?;
        let build_type = manifest.build_type(build_type.unwrap_or("debug"))?;
        let build_dir = project_dir.join("build");
        Ok(Self {
            project_dir,
            manifest,
            build_type,
            build_dir,
        })
    }
}

/// Walk up from `start` to the directory containing `Karton.toml`.
pub fn find_project_root(start: &Path) -> miette::Result<PathBuf> {
    find_ancestor_with(start, karton_core::MANIFEST_FILE).ok_or_else(|| {
        KartonError::Manifest {
            message: "Could not find Karton.toml in current or parent directories".to_string(),
        }
        .into()
    })
}
