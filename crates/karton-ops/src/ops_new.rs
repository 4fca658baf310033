//! Operation: scaffold a new Karton project.

use std::path::Path;

use karton_core::template::{ProjectTemplate, TemplateContext};
use karton_util::errors::KartonError;
use karton_util::progress::status;

/// Create a new project directory under `parent` and render the embedded
/// application template into it.
pub fn new_project(parent: &Path, name: &str) -> miette::Result<()> {
    let root = parent.join(name);
    if root.exists() {
        return Err(KartonError::Generic {
            message: format!("destination '{name}' already exists"),
        }
        .into());
    }
    std::fs::create_dir_all(&root).map_err(KartonError::Io)?;

    let template = ProjectTemplate::embedded()?;
    let ctx = TemplateContext::new(name);
    template.render(&root, &ctx)?;

    status("Created", &format!("application project '{name}'"));
    Ok(())
}
