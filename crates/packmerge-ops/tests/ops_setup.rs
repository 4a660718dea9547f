use std::fs;
use std::path::Path;

use packmerge_core::manifest::Manifest;
use packmerge_ops::ops_setup::{find_project_root, load_settings, settings_from_manifest};
use tempfile::TempDir;

const BASE: &str = r#"
[package]
name = "vyra"
version = "1.0"

[android]
namespace = "com.example.vyra"
compile-sdk = 36
min-sdk = 21
target-sdk = 36

[signing.debug]
store-file = "debug.keystore"
key-alias = "androiddebugkey"

[packaging]
pick-first = ["**/libc++_shared.so"]

[[packaging.inputs]]
origin = "app"
path = "app"
"#;

fn settings_err(toml: &str, build_type: &str) -> String {
    let manifest = Manifest::from_str(toml).unwrap();
    settings_from_manifest(Path::new("/project"), manifest, build_type)
        .unwrap_err()
        .to_string()
}

#[test]
fn test_settings_resolve_inputs_and_output() {
    let manifest = Manifest::from_str(BASE).unwrap();
    let settings = settings_from_manifest(Path::new("/project"), manifest, "debug").unwrap();
    assert_eq!(settings.name, "vyra");
    assert_eq!(settings.inputs.len(), 1);
    assert_eq!(settings.inputs[0].origin, "app");
    assert_eq!(settings.inputs[0].path, Path::new("/project/app"));
    assert_eq!(settings.rules.len(), 1);
    assert_eq!(
        settings.output_path(),
        Path::new("/project/build/outputs/vyra-debug.apk")
    );
    let (name, signing) = settings.signing.as_ref().unwrap();
    assert_eq!(name, "debug");
    assert_eq!(signing.key_alias, "androiddebugkey");
    assert!(settings.build_type.is_debuggable());
}

#[test]
fn test_release_is_unsigned_by_default() {
    let manifest = Manifest::from_str(BASE).unwrap();
    let settings = settings_from_manifest(Path::new("/project"), manifest, "release").unwrap();
    assert!(settings.signing.is_none());
    assert!(settings.build_type.is_minified());
}

#[test]
fn test_min_sdk_above_target_rejected() {
    let toml = BASE.replace("min-sdk = 21", "min-sdk = 37");
    let err = settings_err(&toml, "debug");
    assert!(err.contains("min-sdk 37 is greater than target-sdk 36"), "got: {err}");
}

#[test]
fn test_unknown_build_type_rejected() {
    let err = settings_err(BASE, "staging");
    assert!(err.contains("Unknown build type `staging`"), "got: {err}");
    assert!(err.contains("debug, release"), "got: {err}");
}

#[test]
fn test_missing_signing_config_rejected() {
    let toml = format!("{BASE}\n[build-types.release]\nsigning-config = \"upload\"\n");
    let err = settings_err(&toml, "release");
    assert!(err.contains("unknown signing config `upload`"), "got: {err}");
}

#[test]
fn test_shrink_without_minify_rejected() {
    let toml = format!("{BASE}\n[build-types.release]\nminify = false\n");
    let err = settings_err(&toml, "release");
    assert!(err.contains("shrink-resources without minify"), "got: {err}");
}

#[test]
fn test_invalid_rule_pattern_rejected() {
    let toml = BASE.replace("**/libc++_shared.so", "lib/[x.so");
    let err = settings_err(&toml, "debug");
    assert!(err.contains("Invalid packaging rule pattern `lib/[x.so`"), "got: {err}");
}

#[test]
fn test_unknown_strategy_rejected() {
    let toml = format!("{BASE}\n[[packaging.rules]]\npattern = \"**/*.so\"\nstrategy = \"exclude\"\n");
    let err = settings_err(&toml, "debug");
    assert!(err.contains("Unknown packaging strategy `exclude`"), "got: {err}");
}

#[test]
fn test_no_inputs_rejected() {
    let toml = BASE.replace("[[packaging.inputs]]\norigin = \"app\"\npath = \"app\"\n", "");
    let err = settings_err(&toml, "debug");
    assert!(err.contains("No [[packaging.inputs]] declared"), "got: {err}");
}

#[test]
fn test_load_settings_and_find_root() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Packmerge.toml"), BASE).unwrap();
    let nested = tmp.path().join("app").join("src");
    fs::create_dir_all(&nested).unwrap();

    let root = find_project_root(&nested).unwrap();
    assert_eq!(root, tmp.path());
    let settings = load_settings(&root, "debug").unwrap();
    assert_eq!(settings.project_dir, tmp.path());
}

#[test]
fn test_output_dir_outside_project_rejected() {
    for output_dir in [".", "", "..", "/", "build/../.."] {
        let toml = BASE.replace(
            "[packaging]\n",
            &format!("[packaging]\noutput-dir = \"{output_dir}\"\n"),
        );
        let err = settings_err(&toml, "debug");
        assert!(
            err.contains("must be a relative path below the project directory"),
            "{output_dir}: {err}"
        );
    }
}

#[test]
fn test_output_dir_inside_directory_input_rejected() {
    let toml = BASE.replace("[packaging]\n", "[packaging]\noutput-dir = \"app/out\"\n");
    let err = settings_err(&toml, "debug");
    assert!(err.contains("lies inside input `app`"), "got: {err}");

    let toml = BASE.replace("path = \"app\"", "path = \"./app/../build\"");
    let err = settings_err(&toml, "debug");
    assert!(err.contains("lies inside input `app`"), "got: {err}");
}

#[test]
fn test_output_dir_next_to_input_accepted() {
    let toml = BASE.replace("[packaging]\n", "[packaging]\noutput-dir = \"application/out\"\n");
    let manifest = Manifest::from_str(&toml).unwrap();
    let settings = settings_from_manifest(Path::new("/project"), manifest, "debug").unwrap();
    assert_eq!(settings.output_dir, Path::new("/project/application/out"));
}
