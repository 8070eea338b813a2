use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_refdocs")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Write a parameter file naming `fixtures` and `output` into `dir`.
fn param_file(dir: &Path, fixtures: &[&str], output: &str) -> PathBuf {
    let sources: Vec<String> = fixtures.iter().map(|f| fixture_path(f)).collect();
    let path = dir.join("params.txt");
    std::fs::write(&path, format!("{}\n{}\n", sources.join(","), output)).unwrap();
    path
}

fn list_files(root: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }

    let mut out = Vec::new();
    if root.exists() {
        walk(root, root, &mut out);
    }
    out.sort();
    out
}

// -- arguments --

#[test]
fn help_prints_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"))
        .stdout(predicate::str::contains("<param-file>"));
}

#[test]
fn missing_param_file_argument_fails() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing <param-file>"));
}

#[test]
fn unreadable_param_file_fails() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid parameter file"));
}

#[test]
fn param_file_without_output_dir_fails() {
    let dir = TempDir::new().unwrap();
    let params = dir.path().join("params.txt");
    std::fs::write(&params, fixture_path("core.json")).unwrap();

    cmd().arg(&params).assert().failure();
}

// -- rendering --

#[test]
fn renders_single_class() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let params = param_file(dir.path(), &["core.json"], out.to_str().unwrap());

    cmd()
        .arg(&params)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 1 of 1 entries"));

    assert_eq!(list_files(&out), vec!["angular_core_Foo_class.html"]);
    let html = std::fs::read_to_string(out.join("angular_core_Foo_class.html")).unwrap();
    assert!(html.contains("<h1>Foo</h1>"));
    assert!(html.contains("A class with no members."));
    assert!(!html.contains("<!DOCTYPE html>"));
    // The example is TypeScript and gets real token spans.
    assert!(html.contains("storage type"));
}

#[test]
fn renders_cli_tree() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let params = param_file(dir.path(), &["cli.json"], out.to_str().unwrap());

    cmd().arg(&params).assert().success();

    assert_eq!(list_files(&out), vec!["ng.html", "ng/build.html"]);
    let root = std::fs::read_to_string(out.join("ng.html")).unwrap();
    assert!(root.contains("href=\"ng/build.html\""));
    let build = std::fs::read_to_string(out.join("ng/build.html")).unwrap();
    assert!(build.contains("href=\"../ng.html\""));
    assert!(build.contains("--watch"));
}

#[test]
fn renders_multiple_inputs() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let params = param_file(dir.path(), &["core.json", "cli.json"], out.to_str().unwrap());

    cmd().arg(&params).assert().success();

    assert_eq!(
        list_files(&out),
        vec!["angular_core_Foo_class.html", "ng.html", "ng/build.html"]
    );
}

#[test]
fn output_dir_is_relative_to_working_directory() {
    let dir = TempDir::new().unwrap();
    let params = param_file(dir.path(), &["core.json"], "site/api");

    cmd().current_dir(dir.path()).arg(&params).assert().success();

    assert!(dir.path().join("site/api/angular_core_Foo_class.html").is_file());
}

#[test]
fn standalone_pages_link_stylesheet() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let params = param_file(dir.path(), &["core.json"], out.to_str().unwrap());

    cmd()
        .args(["--standalone", "--stylesheet", "docs.css"])
        .arg(&params)
        .assert()
        .success();

    let html = std::fs::read_to_string(out.join("angular_core_Foo_class.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("href=\"docs.css\""));
}

// -- failures --

#[test]
fn malformed_json_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let params = param_file(
        dir.path(),
        &["core.json", "malformed.json"],
        out.to_str().unwrap(),
    );

    cmd()
        .arg(&params)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed.json"));

    assert!(list_files(&out).is_empty());
}

#[test]
fn missing_input_file_aborts() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let params = param_file(dir.path(), &["absent.json"], out.to_str().unwrap());

    cmd().arg(&params).assert().failure();
    assert!(!out.exists());
}

#[test]
fn unknown_entry_is_reported_and_others_written() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let params = param_file(dir.path(), &["mixed.json"], out.to_str().unwrap());

    cmd()
        .arg(&params)
        .assert()
        .failure()
        .stderr(predicate::str::contains("RouterModule"))
        .stderr(predicate::str::contains("1 error(s)"));

    assert_eq!(
        list_files(&out),
        vec![
            "angular_router_ROUTES_constant.html",
            "angular_router_provideRouter_function.html",
        ]
    );
}
