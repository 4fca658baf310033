//! Archives command implementation.

use miette::Result;

use karton_util::errors::KartonError;

pub async fn exec() -> Result<()> {
    let cwd = std::env::current_dir().map_err(KartonError::Io)?;
    karton_ops::ops_archives::archives(&cwd).await
}
