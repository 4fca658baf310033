//! Operation: produce the application bundle (resolve, merge, apply
//! policy, emit).
//!
//! The pipeline runs in phases: pre-bundle hooks -> archive resolution ->
//! namespace merge -> conflict policy -> bundle emission -> post-bundle
//! hooks. A failure in any phase aborts the invocation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use karton_merge::emit::{write_bundle, BundleMetadata};
use karton_merge::engine;
use karton_merge::namespace::MergeNamespace;
use karton_merge::policy::PackagingPolicy;
use karton_util::errors::KartonError;
use karton_util::process::run_hook_line;
use karton_util::progress::{spinner, status, status_info, status_warn};

use crate::ProjectContext;

/// Options for a bundle invocation.
#[derive(Default)]
pub struct BundleOptions {
    pub build_type: Option<String>,
    pub output: Option<PathBuf>,
    pub verbose: bool,
    /// Suppress non-error output (used by tests and scripting).
    pub quiet: bool,
}

/// Result of a bundle operation.
#[derive(Debug)]
pub struct BundleResult {
    pub output: PathBuf,
    /// Archives contributing to the bundle.
    pub archive_count: usize,
    /// Surviving entries written to the bundle (metadata excluded).
    pub entry_count: usize,
    /// Paths dropped by the exclude policy.
    pub excluded_count: usize,
}

/// Run the full bundling pipeline.
pub async fn bundle(start_dir: &Path, opts: &BundleOptions) -> miette::Result<BundleResult> {
    let start = Instant::now();
    let ctx = ProjectContext::load(start_dir, opts.build_type.as_deref())?;

    if !opts.quiet {
        status(
            "Bundling",
            &format!(
                "{} v{} ({})",
                ctx.manifest.package.application_id,
                ctx.manifest.package.version_name,
                ctx.build_type.name
            ),
        );
    }

    check_signing(&ctx, opts)?;
    run_hooks(&ctx, "pre-bundle", opts)?;

    let pb = (!opts.quiet).then(|| spinner("Indexing dependency archives"));
    let archives = karton_resolver::resolver::resolve(&ctx.manifest, &ctx.project_dir).await?;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    tracing::debug!(archives = archives.len(), "archive set resolved");

    if opts.verbose {
        for archive in &archives {
            println!("  {} ({} entries)", archive.id, archive.entries.len());
        }
    }

    let archive_count = archives.len();
    let mut namespace = MergeNamespace::new();
    for archive in archives {
        namespace.add_archive(archive.entries);
    }

    let policy = PackagingPolicy::new(&ctx.manifest.packaging.excludes)?;
    let plan = engine::apply(namespace, &policy)?;

    let output = output_path(&ctx, opts);
    if let Some(parent) = output.parent() {
        karton_util::fs::ensure_dir(parent).map_err(KartonError::Io)?;
    }

    let metadata = BundleMetadata {
        application_id: ctx
            .build_type
            .application_id(&ctx.manifest.package.application_id),
        version_code: ctx.manifest.package.version_code,
        version_name: ctx.manifest.package.version_name.clone(),
        build_type: ctx.build_type.name.clone(),
        signing_config: ctx.build_type.signing_name.clone(),
        min_sdk: ctx.manifest.sdk.min,
        target_sdk: ctx.manifest.sdk.target,
        compile_sdk: ctx.manifest.sdk.compile,
    };
    write_bundle(&plan, &metadata, &output)?;

    run_hooks(&ctx, "post-bundle", opts)?;

    let result = BundleResult {
        output,
        archive_count,
        entry_count: plan.entries.len(),
        excluded_count: plan.excluded.len(),
    };

    if !opts.quiet {
        status(
            "Finished",
            &format!(
                "{} entries from {} archive(s), {} excluded, in {:.2}s",
                result.entry_count,
                result.archive_count,
                result.excluded_count,
                start.elapsed().as_secs_f64()
            ),
        );
        status_info("Output", &result.output.display().to_string());
    }

    Ok(result)
}

/// Validate the selected signing config before doing any work.
///
/// A referenced keystore that does not exist is fatal. A non-debuggable
/// build type wired to debug credentials (as the original project was) is
/// surfaced loudly but allowed; an unsigned non-debuggable bundle gets a
/// quieter warning.
fn check_signing(ctx: &ProjectContext, opts: &BundleOptions) -> miette::Result<()> {
    if let Some(ref signing) = ctx.build_type.signing {
        let keystore = ctx.project_dir.join(&signing.keystore);
        if !keystore.is_file() {
            return Err(KartonError::Config {
                message: format!(
                    "build type '{}': keystore {} not found",
                    ctx.build_type.name, signing.keystore
                ),
            }
            .into());
        }
    }

    if ctx.build_type.release_signed_with_debug() {
        status_warn(
            "Warning",
            &format!(
                "build type '{}' is using debug signing credentials",
                ctx.build_type.name
            ),
        );
    } else if !ctx.build_type.is_debuggable() && ctx.build_type.signing.is_none() && !opts.quiet {
        status_warn(
            "Warning",
            &format!("build type '{}' has no signing config", ctx.build_type.name),
        );
    }

    Ok(())
}

fn run_hooks(ctx: &ProjectContext, hook: &str, opts: &BundleOptions) -> miette::Result<()> {
    let Some(lines) = ctx.manifest.hooks.get(hook) else {
        return Ok(());
    };
    for line in lines {
        if !opts.quiet {
            status("Running", &format!("{hook} hook: {line}"));
        }
        run_hook_line(line, &ctx.project_dir, hook)?;
    }
    Ok(())
}

fn output_path(ctx: &ProjectContext, opts: &BundleOptions) -> PathBuf {
    match opts.output {
        Some(ref path) => path.clone(),
        None => ctx.build_dir.join("bundles").join(format!(
            "{}-{}-{}.kab",
            ctx.manifest.package.application_id,
            ctx.manifest.package.version_name,
            ctx.build_type.name
        )),
    }
}
