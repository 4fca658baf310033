//! Operation: list the resolved dependency archive set.

use std::path::Path;

use crate::ProjectContext;

/// Print each resolved archive with its entry count, size, and checksum.
pub async fn archives(start_dir: &Path) -> miette::Result<()> {
    let ctx = ProjectContext::load(start_dir, None)?;
    let archives = karton_resolver::resolver::resolve(&ctx.manifest, &ctx.project_dir).await?;

    if archives.is_empty() {
        println!("No dependency archives resolved.");
        return Ok(());
    }

    for archive in &archives {
        println!(
            "{}  {} entries  {} bytes  sha256:{}",
            archive.id,
            archive.entries.len(),
            archive.size,
            &archive.checksum[..12]
        );
    }
    Ok(())
}
