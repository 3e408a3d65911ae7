use std::fs;
use std::path::Path;

use saboteurs::{infer_design_name, resolve_path, sha256_bytes, sha256_file};
use tempfile::tempdir;

#[test]
fn resolve_path_returns_cwd_for_dot() {
    let result = resolve_path(".").expect("resolve");
    let cwd = std::env::current_dir().expect("cwd").canonicalize().expect("canonicalize cwd");
    assert_eq!(result, cwd);
}

#[test]
fn resolve_path_resolves_existing_path() {
    let tmp = tempdir().expect("tempdir");
    let subdir = tmp.path().join("nested");
    fs::create_dir_all(&subdir).expect("create nested");

    let result = resolve_path(subdir.to_str().expect("utf8 path")).expect("canonicalize");
    assert_eq!(result, subdir.canonicalize().expect("canonicalize subdir"));
}

#[test]
fn resolve_path_keeps_missing_paths() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("not-yet").join("out");

    let result = resolve_path(missing.to_str().expect("utf8 path")).expect("resolve");
    assert!(result.ends_with("not-yet/out"));
    assert!(!result.exists());
}

#[test]
fn infer_design_name_uses_file_stem() {
    assert_eq!(infer_design_name(Path::new("/tmp/specs/plasmids.yaml")), "plasmids");
    assert_eq!(infer_design_name(Path::new("results.csv")), "results");
    assert_eq!(infer_design_name(Path::new("/")), "unnamed-design");
}

#[test]
fn sha256_bytes_matches_known_hash() {
    let hash = sha256_bytes(b"abc");
    assert_eq!(hash, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[test]
fn sha256_file_matches_in_memory_hash() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("groups.csv");
    let contents = b"group,elements\ng1,A,B\n";
    fs::write(&path, contents).expect("write file");

    assert_eq!(sha256_file(&path).expect("hash"), sha256_bytes(contents));
}

#[test]
fn sha256_file_reports_missing_input() {
    let tmp = tempdir().expect("tempdir");
    let err = sha256_file(&tmp.path().join("missing.csv")).unwrap_err();
    assert!(err.to_string().contains("Failed to open input for hashing"));
}
