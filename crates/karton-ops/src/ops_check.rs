//! Operation: report all unresolved resource conflicts without writing a
//! bundle.

use std::path::Path;

use karton_merge::engine::{detect_conflicts, ConflictReport};
use karton_merge::namespace::MergeNamespace;
use karton_merge::policy::PackagingPolicy;
use karton_util::progress::status;

use crate::ProjectContext;

/// Resolve the archive set, merge, and collect every collision the current
/// exclude policy leaves unresolved. Prints the report; the caller decides
/// the exit status.
pub async fn check(start_dir: &Path, quiet: bool) -> miette::Result<ConflictReport> {
    let ctx = ProjectContext::load(start_dir, None)?;

    let archives = karton_resolver::resolver::resolve(&ctx.manifest, &ctx.project_dir).await?;
    let archive_count = archives.len();

    let mut namespace = MergeNamespace::new();
    for archive in archives {
        namespace.add_archive(archive.entries);
    }

    let policy = PackagingPolicy::new(&ctx.manifest.packaging.excludes)?;
    let report = detect_conflicts(&namespace, &policy);

    if !quiet {
        status(
            "Checked",
            &format!(
                "{} path(s) across {} archive(s), {} exclude rule(s)",
                namespace.len(),
                archive_count,
                policy.rules().len()
            ),
        );
        println!("{report}");
    }

    Ok(report)
}
