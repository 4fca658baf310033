//! Operation: initialize Karton in an existing directory.

use std::path::Path;

use karton_core::template::{ProjectTemplate, TemplateContext};
use karton_util::errors::KartonError;
use karton_util::progress::status;

/// Render the core project files into `dir` without touching anything that
/// already exists.
pub fn init_project(dir: &Path) -> miette::Result<()> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| KartonError::Generic {
            message: "cannot derive a project name from the current directory".to_string(),
        })?;

    let template = ProjectTemplate::embedded()?;
    let ctx = TemplateContext::new(&name);
    template.render_core_only(dir, &ctx)?;

    status("Initialized", &format!("Karton project '{name}'"));
    Ok(())
}
