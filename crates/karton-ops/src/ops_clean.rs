//! Operation: remove build artifacts.

use std::path::Path;

use karton_util::errors::KartonError;

use crate::find_project_root;

/// Remove the project's `build/` directory.
pub fn clean(start_dir: &Path) -> miette::Result<()> {
    let project_root = find_project_root(start_dir)?;
    let build_dir = project_root.join("build");

    if build_dir.exists() {
        std::fs::remove_dir_all(&build_dir).map_err(KartonError::Io)?;
        println!("Cleaned build directory");
    } else {
        println!("Nothing to clean");
    }

    Ok(())
}
