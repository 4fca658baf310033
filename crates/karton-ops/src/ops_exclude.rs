//! Operation: edit the `[packaging] excludes` list in Karton.toml using
//! format-preserving edits.

use std::path::Path;

use toml_edit::{Array, DocumentMut, Item, Table, Value};

use karton_merge::policy::PackagingPolicy;
use karton_util::errors::KartonError;

use crate::find_project_root;

/// Add an exclude pattern. The pattern is compiled first so malformed
/// globs never land in the manifest. Returns false if already present.
pub fn add(start_dir: &Path, pattern: &str) -> miette::Result<bool> {
    PackagingPolicy::new(&[pattern.to_string()])?;

    edit_manifest(start_dir, |excludes| {
        if excludes.iter().any(|v| v.as_str() == Some(pattern)) {
            return false;
        }
        excludes.push(pattern);
        true
    })
}

/// Remove an exclude pattern. Returns false if it was not present.
pub fn remove(start_dir: &Path, pattern: &str) -> miette::Result<bool> {
    edit_manifest(start_dir, |excludes| {
        let before = excludes.len();
        excludes.retain(|v| v.as_str() != Some(pattern));
        excludes.len() != before
    })
}

/// List the configured exclude patterns.
pub fn list(start_dir: &Path) -> miette::Result<Vec<String>> {
    let ctx = crate::ProjectContext::load(start_dir, None)?;
    Ok(ctx.manifest.packaging.excludes)
}

fn edit_manifest(
    start_dir: &Path,
    edit: impl FnOnce(&mut Array) -> bool,
) -> miette::Result<bool> {
    let project_root = find_project_root(start_dir)?;
    let manifest_path = project_root.join(karton_core::MANIFEST_FILE);

    let content = std::fs::read_to_string(&manifest_path).map_err(|e| KartonError::Manifest {
        message: format!("Failed to read {}: {e}", manifest_path.display()),
    })?;

    let mut doc: DocumentMut = content.parse().map_err(|e| KartonError::Manifest {
        message: format!("Failed to parse Karton.toml: {e}"),
    })?;

    if !doc.contains_key("packaging") {
        doc.insert("packaging", Item::Table(Table::new()));
    }
    let packaging = doc["packaging"]
        .as_table_mut()
        .ok_or_else(|| KartonError::Manifest {
            message: "[packaging] is not a table".to_string(),
        })?;
    if !packaging.contains_key("excludes") {
        packaging.insert("excludes", Item::Value(Value::Array(Array::new())));
    }
    let excludes = packaging["excludes"]
        .as_array_mut()
        .ok_or_else(|| KartonError::Manifest {
            message: "packaging.excludes is not an array".to_string(),
        })?;

    let changed = edit(excludes);
    if changed {
        std::fs::write(&manifest_path, doc.to_string()).map_err(KartonError::Io)?;
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"[package]
application-id = "com.example.app"
version-code = 1
version-name = "1.0"

[sdk]
min = 26
target = 34
compile = 34

[packaging]
excludes = ["META-INF/LICENSE"]
"#;

    fn project(content: &str) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("Karton.toml"), content).unwrap();
        tmp
    }

    #[test]
    fn add_appends_pattern() {
        let tmp = project(MANIFEST);
        assert!(add(tmp.path(), "META-INF/NOTICE").unwrap());
        let content = std::fs::read_to_string(tmp.path().join("Karton.toml")).unwrap();
        assert!(content.contains("META-INF/NOTICE"));
        assert!(content.contains("META-INF/LICENSE"));
    }

    #[test]
    fn add_is_idempotent() {
        let tmp = project(MANIFEST);
        assert!(!add(tmp.path(), "META-INF/LICENSE").unwrap());
    }

    #[test]
    fn add_rejects_malformed_glob() {
        let tmp = project(MANIFEST);
        assert!(add(tmp.path(), "META-INF/[").is_err());
    }

    #[test]
    fn remove_deletes_pattern() {
        let tmp = project(MANIFEST);
        assert!(remove(tmp.path(), "META-INF/LICENSE").unwrap());
        let content = std::fs::read_to_string(tmp.path().join("Karton.toml")).unwrap();
        assert!(!content.contains("META-INF/LICENSE"));
    }

    #[test]
    fn remove_missing_pattern_reports_unchanged() {
        let tmp = project(MANIFEST);
        assert!(!remove(tmp.path(), "META-INF/NOTICE").unwrap());
    }

    #[test]
    fn add_creates_packaging_section() {
        let without = MANIFEST.replace("[packaging]\nexcludes = [\"META-INF/LICENSE\"]\n", "");
        let tmp = project(&without);
        assert!(add(tmp.path(), "META-INF/LICENSE").unwrap());
        let listed = list(tmp.path()).unwrap();
        assert_eq!(listed, vec!["META-INF/LICENSE"]);
    }
}
