//! Bundle command implementation.

use std::path::PathBuf;

use miette::Result;

use karton_ops::ops_bundle::{bundle, BundleOptions};
use karton_util::errors::KartonError;

pub async fn exec(
    build_type: Option<&str>,
    output: Option<PathBuf>,
    quiet: bool,
    verbose: bool,
) -> Result<()> {
    let cwd = std::env::current_dir().map_err(KartonError::Io)?;
    let opts = BundleOptions {
        build_type: build_type.map(str::to_string),
        output,
        verbose,
        quiet,
    };
    bundle(&cwd, &opts).await?;
    Ok(())
}
