//! Embedded project template for `karton new` / `karton init`.
//!
//! The template is a TOML descriptor compiled into the binary via
//! `include_str!`. It declares the directories, files, and `Karton.toml`
//! content to generate for a new project. Simple `{{variable}}`
//! interpolation is performed at render time.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use karton_util::errors::KartonError;

/// The manifest section: raw `Karton.toml` content with `{{variable}}`
/// placeholders.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestTemplate {
    pub content: String,
}

/// A directory to create during project scaffolding.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEntry {
    pub path: String,
}

/// A file to create during project scaffolding, with interpolated content.
#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
}

/// The complete project template parsed from the embedded TOML descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectTemplate {
    pub manifest: ManifestTemplate,
    #[serde(default)]
    pub directories: Vec<DirectoryEntry>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// Variables available for `{{variable}}` interpolation in template content.
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    /// Create a context with the standard project variables.
    pub fn new(project_name: &str) -> Self {
        let mut vars = BTreeMap::new();
        vars.insert("project_name".to_string(), project_name.to_string());
        vars.insert(
            "application_id".to_string(),
            format!("com.example.{}", project_name.replace('-', "")),
        );
        Self { vars }
    }

    /// Add or override a variable in the context.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}

/// Replace all `{{key}}` placeholders in `input` with values from `ctx`.
pub fn interpolate(input: &str, ctx: &TemplateContext) -> String {
    let mut result = input.to_string();
    for (key, value) in &ctx.vars {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

impl ProjectTemplate {
    /// Load the embedded application template.
    pub fn embedded() -> miette::Result<Self> {
        Self::parse_toml(include_str!("../templates/app.toml"))
    }

    /// Parse a template from a TOML string.
    pub fn parse_toml(toml_str: &str) -> miette::Result<Self> {
        toml::from_str(toml_str).map_err(|e| {
            KartonError::Generic {
                message: format!("Failed to parse project template: {e}"),
            }
            .into()
        })
    }

    /// Render the full template (directories, files, and core files) into a
    /// directory. Used by `karton new`.
    pub fn render(&self, root: &Path, ctx: &TemplateContext) -> miette::Result<()> {
        for dir in &self.directories {
            let path = root.join(&dir.path);
            std::fs::create_dir_all(&path).map_err(KartonError::Io)?;
        }

        self.write_core_files(root, ctx, false)?;

        for file in &self.files {
            let path = root.join(&file.path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(KartonError::Io)?;
            }
            let content = interpolate(&file.content, ctx);
            std::fs::write(&path, content).map_err(KartonError::Io)?;
        }

        Ok(())
    }

    /// Render only the core project files (`Karton.toml`, `.karton.env`,
    /// `.gitignore`) into an existing directory. Used by `karton init`.
    ///
    /// Existing files are never overwritten.
    pub fn render_core_only(&self, root: &Path, ctx: &TemplateContext) -> miette::Result<()> {
        self.write_core_files(root, ctx, true)
    }

    fn write_core_files(
        &self,
        root: &Path,
        ctx: &TemplateContext,
        skip_existing: bool,
    ) -> miette::Result<()> {
        let write = |path: std::path::PathBuf, content: &str| -> miette::Result<()> {
            if skip_existing && path.exists() {
                return Ok(());
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(KartonError::Io)?;
            }
            std::fs::write(&path, content).map_err(KartonError::Io)?;
            Ok(())
        };

        write(
            root.join(crate::MANIFEST_FILE),
            &interpolate(&self.manifest.content, ctx),
        )?;

        write(root.join(".gitignore"), "build/\n.karton.env\n")?;

        write(
            root.join(crate::ENV_FILE),
            "# Per-machine values and secrets (this file is gitignored)\n\
             # Values here are available via ${env:VAR} in Karton.toml\n\
             # and as regular env vars during hooks.\n",
        )?;

        Ok(())
    }
}
