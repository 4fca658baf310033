use std::io::Write;
use std::path::Path;

use karton_core::manifest::Manifest;
use karton_resolver::archive::index_archive;
use karton_resolver::resolver::{expand_dependencies, resolve};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn write_jar(path: &Path, entries: &[(&str, &[u8])]) {
    let file = std::fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    for (name, data) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
}

fn manifest(deps: &str) -> Manifest {
    Manifest::parse(&format!(
        r#"
[package]
application-id = "com.example.app"
version-code = 1
version-name = "1.0"

[sdk]
min = 26
target = 34
compile = 34

[dependencies]
{deps}
"#
    ))
    .unwrap()
}

#[test]
fn index_archive_reads_entries_and_skips_dirs() {
    let tmp = TempDir::new().unwrap();
    let jar = tmp.path().join("stripe.jar");
    write_jar(
        &jar,
        &[
            ("META-INF/LICENSE", b"apache" as &[u8]),
            ("classes/Pay.class", b"bytecode"),
        ],
    );

    let archive = index_archive(&jar).unwrap();
    assert_eq!(archive.name, "stripe");
    assert!(archive.id.starts_with("stripe@"));
    assert_eq!(archive.id.len(), "stripe@".len() + 12);
    assert_eq!(archive.entries.len(), 2);
    assert!(archive
        .entries
        .iter()
        .all(|e| e.archive_id == archive.id));
}

#[test]
fn index_archive_rejects_non_archive() {
    let tmp = TempDir::new().unwrap();
    let bogus = tmp.path().join("notes.jar");
    std::fs::write(&bogus, "not a zip").unwrap();
    let err = index_archive(&bogus).unwrap_err();
    assert!(err.to_string().contains("not a readable archive"), "got: {err}");
}

#[test]
fn expansion_is_name_sorted_and_deduplicated() {
    let tmp = TempDir::new().unwrap();
    write_jar(&tmp.path().join("zeta.jar"), &[("z", b"z" as &[u8])]);
    write_jar(&tmp.path().join("alpha.jar"), &[("a", b"a" as &[u8])]);

    // 'beta' and 'zed' point at the same file; it must appear once, at the
    // position of the first dependency that mentions it.
    let m = manifest(
        "beta = \"zeta.jar\"\nfirst = \"alpha.jar\"\nzed = { path = \"zeta.jar\" }",
    );
    let paths = expand_dependencies(&m, tmp.path()).unwrap();
    let names: Vec<&str> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(names, vec!["zeta.jar", "alpha.jar"]);
}

#[test]
fn dir_dependency_expands_sorted_archives_only() {
    let tmp = TempDir::new().unwrap();
    let libs = tmp.path().join("libs");
    std::fs::create_dir(&libs).unwrap();
    write_jar(&libs.join("b.jar"), &[("b", b"b" as &[u8])]);
    write_jar(&libs.join("a.aar"), &[("a", b"a" as &[u8])]);
    std::fs::write(libs.join("readme.txt"), "skip me").unwrap();

    let m = manifest("libs = { dir = \"libs\" }");
    let paths = expand_dependencies(&m, tmp.path()).unwrap();
    let names: Vec<&str> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a.aar", "b.jar"]);
}

#[test]
fn missing_required_archive_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let m = manifest("stripe = \"libs/stripe.jar\"");
    let err = expand_dependencies(&m, tmp.path()).unwrap_err();
    assert!(err.to_string().contains("stripe"), "got: {err}");
}

#[test]
fn missing_optional_archive_is_skipped() {
    let tmp = TempDir::new().unwrap();
    let m = manifest("stripe = { path = \"libs/stripe.jar\", optional = true }");
    let paths = expand_dependencies(&m, tmp.path()).unwrap();
    assert!(paths.is_empty());
}

#[tokio::test]
async fn resolve_returns_resolution_order() {
    let tmp = TempDir::new().unwrap();
    write_jar(&tmp.path().join("one.jar"), &[("1", b"1" as &[u8])]);
    write_jar(&tmp.path().join("two.jar"), &[("2", b"2" as &[u8])]);
    write_jar(&tmp.path().join("three.jar"), &[("3", b"3" as &[u8])]);

    let m = manifest("a = \"one.jar\"\nb = \"two.jar\"\nc = \"three.jar\"");
    let archives = resolve(&m, tmp.path()).await.unwrap();
    let names: Vec<&str> = archives.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn byte_identical_archives_deduplicated_by_checksum() {
    let tmp = TempDir::new().unwrap();
    write_jar(&tmp.path().join("lib.jar"), &[("x", b"x" as &[u8])]);
    std::fs::copy(tmp.path().join("lib.jar"), tmp.path().join("copy.jar")).unwrap();

    let m = manifest("a = \"lib.jar\"\nb = \"copy.jar\"");
    let archives = resolve(&m, tmp.path()).await.unwrap();
    assert_eq!(archives.len(), 1);
}
