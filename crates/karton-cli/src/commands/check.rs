//! Check command implementation.

use miette::Result;

use karton_util::errors::KartonError;

pub async fn exec(_verbose: bool) -> Result<()> {
    let cwd = std::env::current_dir().map_err(KartonError::Io)?;
    let report = karton_ops::ops_check::check(&cwd, false).await?;
    if !report.is_empty() {
        return Err(KartonError::Generic {
            message: format!("{} unresolved resource conflict(s)", report.len()),
        }
        .into());
    }
    Ok(())
}
