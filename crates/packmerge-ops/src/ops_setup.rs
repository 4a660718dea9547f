//! Loading and validating the per-invocation build settings.
//!
//! [`load_settings`] turns a `Packmerge.toml` into an immutable
//! [`BuildSettings`] for one build type. Every later stage (input
//! collection, conflict resolution, package writing) receives the settings
//! explicitly; nothing reads the manifest a second time.

use std::path::{Path, PathBuf};

use packmerge_core::android::AndroidConfig;
use packmerge_core::build_type::BuildType;
use packmerge_core::manifest::Manifest;
use packmerge_core::signing::SigningConfig;
use packmerge_core::MANIFEST_FILE;
use packmerge_merge::source::InputSource;
use packmerge_merge::RuleSet;
use packmerge_util::errors::PackmergeError;
use packmerge_util::fs::normalize_lexically;

/// Validated configuration for one packaging pass.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    pub project_dir: PathBuf,
    pub name: String,
    pub version: String,
    pub android: AndroidConfig,
    pub build_type_name: String,
    pub build_type: BuildType,
    /// Name and contents of the signing config used by the build type.
    pub signing: Option<(String, SigningConfig)>,
    pub rules: RuleSet,
    /// Inputs in declaration order, paths resolved against the project dir.
    pub inputs: Vec<InputSource>,
    pub output_dir: PathBuf,
}

impl BuildSettings {
    /// Path of the package written for this build type.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}-{}.apk", self.name, self.build_type_name))
    }
}

/// Find the directory holding `Packmerge.toml`, starting at `start`.
pub fn find_project_root(start: &Path) -> miette::Result<PathBuf> {
    packmerge_util::fs::find_ancestor_with(start, MANIFEST_FILE).ok_or_else(|| {
        PackmergeError::Manifest {
            message: format!("No {MANIFEST_FILE} found in this directory or any parent"),
        }
        .into()
    })
}

/// Load `Packmerge.toml` from `project_dir` and validate it for `build_type`.
pub fn load_settings(project_dir: &Path, build_type: &str) -> miette::Result<BuildSettings> {
    let manifest = Manifest::from_path(&project_dir.join(MANIFEST_FILE))?;
    settings_from_manifest(project_dir, manifest, build_type)
}

/// Validate an already-parsed manifest and build the settings.
pub fn settings_from_manifest(
    project_dir: &Path,
    manifest: Manifest,
    build_type_name: &str,
) -> miette::Result<BuildSettings> {
    manifest
        .android
        .check_sdk_levels()
        .map_err(|message| PackmergeError::Config { message })?;

    let build_type = manifest.build_type(build_type_name).ok_or_else(|| {
        PackmergeError::Config {
            message: format!(
                "Unknown build type `{build_type_name}` (available: {})",
                manifest.build_type_names().join(", ")
            ),
        }
    })?;

    if build_type.shrinks_resources() && !build_type.is_minified() {
        return Err(PackmergeError::Config {
            message: format!(
                "Build type `{build_type_name}` enables shrink-resources without minify"
            ),
        }
        .into());
    }

    let signing = match &build_type.signing_config {
        Some(name) => {
            let config = manifest.signing.get(name).ok_or_else(|| PackmergeError::Config {
                message: format!(
                    "Build type `{build_type_name}` references unknown signing config `{name}`"
                ),
            })?;
            if !project_dir.join(&config.store_file).is_file() {
                tracing::warn!(
                    "Keystore {} for signing config `{name}` does not exist",
                    config.store_file
                );
            }
            Some((name.clone(), config.clone()))
        }
        None => None,
    };

    manifest
        .packaging
        .check_output_dir()
        .map_err(|message| PackmergeError::Config { message })?;

    let entries = manifest.packaging.rule_entries();
    let rules = RuleSet::from_pairs(
        entries
            .iter()
            .map(|e| (e.pattern.as_str(), e.strategy.as_str())),
    )?;

    if manifest.packaging.inputs.is_empty() {
        return Err(PackmergeError::Config {
            message: "No [[packaging.inputs]] declared".to_string(),
        }
        .into());
    }
    let inputs: Vec<InputSource> = manifest
        .packaging
        .inputs
        .iter()
        .map(|input| InputSource::new(input.origin(), project_dir.join(&input.path)))
        .collect();
    warn_duplicate_origins(&inputs);

    let output_dir = project_dir.join(&manifest.packaging.output_dir);
    check_output_outside_inputs(&output_dir, &inputs)?;

    Ok(BuildSettings {
        project_dir: project_dir.to_path_buf(),
        name: manifest.package.name,
        version: manifest.package.version,
        android: manifest.android,
        build_type_name: build_type_name.to_string(),
        build_type,
        signing,
        rules,
        inputs,
        output_dir,
    })
}

/// A package written inside an input directory would be collected as a
/// candidate by the next run.
fn check_output_outside_inputs(output_dir: &Path, inputs: &[InputSource]) -> miette::Result<()> {
    let output = normalize_lexically(output_dir);
    for input in inputs {
        if output.starts_with(normalize_lexically(&input.path)) {
            return Err(PackmergeError::Config {
                message: format!(
                    "output-dir {} lies inside input `{}` ({})",
                    output.display(),
                    input.origin,
                    input.path.display()
                ),
            }
            .into());
        }
    }
    Ok(())
}

fn warn_duplicate_origins(inputs: &[InputSource]) {
    for (i, input) in inputs.iter().enumerate() {
        if inputs[..i].iter().any(|earlier| earlier.origin == input.origin) {
            tracing::warn!(
                "Origin `{}` is used by more than one input; conflict reports will be ambiguous",
                input.origin
            );
        }
    }
}

/// Print the settings that shape the package, one line each.
pub fn print_settings_summary(settings: &BuildSettings) {
    let android = &settings.android;
    println!(
        "  {} ({}) version {} ({})",
        android.application_id(),
        android.namespace,
        android.version_name.as_deref().unwrap_or(&settings.version),
        android.version_code
    );
    println!(
        "  SDK min {} / target {} / compile {}{}",
        android.min_sdk,
        android.target_sdk(),
        android.compile_sdk,
        android
            .ndk_version
            .as_deref()
            .map(|ndk| format!(", NDK {ndk}"))
            .unwrap_or_default()
    );
    let bt = &settings.build_type;
    println!(
        "  build type {}: debuggable={} minify={} shrink-resources={}",
        settings.build_type_name,
        bt.is_debuggable(),
        bt.is_minified(),
        bt.shrinks_resources()
    );
    match &settings.signing {
        Some((name, config)) => println!(
            "  signing config {name}: {} (alias {})",
            config.store_file, config.key_alias
        ),
        None => println!("  unsigned"),
    }
    println!(
        "  {} inputs, {} packaging rules",
        settings.inputs.len(),
        settings.rules.len()
    );
}
