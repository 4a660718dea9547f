use packmerge_core::manifest::Manifest;

const MINIMAL: &str = r#"
[package]
name = "shell"
version = "0.1.0"

[android]
namespace = "org.example.shell"
compile-sdk = 34
min-sdk = 24
"#;

#[test]
fn test_minimal_manifest_defaults() {
    let manifest = Manifest::from_str(MINIMAL).unwrap();
    assert_eq!(manifest.android.application_id(), "org.example.shell");
    assert_eq!(manifest.android.target_sdk(), 34);
    assert_eq!(manifest.android.version_code, 1);
    assert!(!manifest.android.multidex);
    assert!(manifest.signing.is_empty());
    assert!(manifest.packaging.inputs.is_empty());
    assert!(manifest.packaging.rule_entries().is_empty());
    assert_eq!(manifest.packaging.output_dir, "build/outputs");
}

#[test]
fn test_missing_android_section_is_error() {
    let err = Manifest::from_str("[package]\nname = \"x\"\nversion = \"1\"\n").unwrap_err();
    assert!(err.to_string().contains("Manifest error"), "got: {err}");
}

#[test]
fn test_builtin_build_types_available() {
    let manifest = Manifest::from_str(MINIMAL).unwrap();
    assert_eq!(manifest.build_type_names(), vec!["debug", "release"]);

    let debug = manifest.build_type("debug").unwrap();
    assert!(debug.is_debuggable());
    assert!(!debug.is_minified());
    assert!(debug.signing_config.is_none());

    let release = manifest.build_type("release").unwrap();
    assert!(release.is_minified());
    assert!(release.shrinks_resources());

    assert!(manifest.build_type("staging").is_none());
}

#[test]
fn test_debug_build_type_picks_up_debug_signing() {
    let toml = format!(
        "{MINIMAL}\n[signing.debug]\nstore-file = \"debug.keystore\"\nkey-alias = \"androiddebugkey\"\n"
    );
    let manifest = Manifest::from_str(&toml).unwrap();
    let debug = manifest.build_type("debug").unwrap();
    assert_eq!(debug.signing_config.as_deref(), Some("debug"));
}

#[test]
fn test_declared_build_type_overlays_builtin() {
    let toml = format!("{MINIMAL}\n[build-types.release]\nshrink-resources = false\n");
    let manifest = Manifest::from_str(&toml).unwrap();
    let release = manifest.build_type("release").unwrap();
    assert!(release.is_minified());
    assert!(!release.shrinks_resources());
}

#[test]
fn test_custom_build_type_listed() {
    let toml = format!("{MINIMAL}\n[build-types.staging]\ndebuggable = true\n");
    let manifest = Manifest::from_str(&toml).unwrap();
    assert_eq!(
        manifest.build_type_names(),
        vec!["debug", "release", "staging"]
    );
    let staging = manifest.build_type("staging").unwrap();
    assert!(staging.is_debuggable());
    assert!(!staging.is_minified());
}

#[test]
fn test_sdk_level_checks() {
    let mut manifest = Manifest::from_str(MINIMAL).unwrap();
    assert!(manifest.android.check_sdk_levels().is_ok());

    manifest.android.target_sdk = Some(21);
    let err = manifest.android.check_sdk_levels().unwrap_err();
    assert_eq!(err, "min-sdk 24 is greater than target-sdk 21");

    manifest.android.target_sdk = Some(35);
    let err = manifest.android.check_sdk_levels().unwrap_err();
    assert_eq!(err, "target-sdk 35 is greater than compile-sdk 34");
}

#[test]
fn test_signing_debug_output_redacts_passwords() {
    let toml = format!(
        "{MINIMAL}\n[signing.upload]\nstore-file = \"upload.jks\"\nstore-password = \"hunter2\"\nkey-alias = \"upload\"\nkey-password = \"hunter3\"\n"
    );
    let manifest = Manifest::from_str(&toml).unwrap();
    let rendered = format!("{:?}", manifest.signing["upload"]);
    assert!(rendered.contains("upload.jks"));
    assert!(!rendered.contains("hunter2"));
    assert!(!rendered.contains("hunter3"));
}

#[test]
fn test_output_dir_must_be_below_project() {
    let mut manifest = Manifest::from_str(MINIMAL).unwrap();
    assert!(manifest.packaging.check_output_dir().is_ok());

    for accepted in ["out", "./build/apk", "build/outputs/"] {
        manifest.packaging.output_dir = accepted.to_string();
        assert!(manifest.packaging.check_output_dir().is_ok(), "{accepted}");
    }
    for rejected in [".", "", "./", "..", "/", "/tmp/out", "build/../..", "build/.."] {
        manifest.packaging.output_dir = rejected.to_string();
        let err = manifest.packaging.check_output_dir().unwrap_err();
        assert!(err.contains("must be a relative path below the project directory"), "{rejected}: {err}");
    }
}
