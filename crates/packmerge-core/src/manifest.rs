use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use packmerge_util::errors::PackmergeError;

use crate::android::AndroidConfig;
use crate::build_type::BuildType;
use crate::packaging::PackagingConfig;
use crate::signing::SigningConfig;

/// The parsed representation of a `Packmerge.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub package: PackageMetadata,

    pub android: AndroidConfig,

    #[serde(default)]
    pub signing: BTreeMap<String, SigningConfig>,

    #[serde(default, rename = "build-types")]
    pub build_types: BTreeMap<String, BuildType>,

    #[serde(default)]
    pub packaging: PackagingConfig,
}

/// Package identity from the `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Manifest {
    /// Load and parse a `Packmerge.toml` file from the given path.
    ///
    /// After parsing, `${env:VAR}` references inside string values are
    /// resolved using `.packmerge.env` (if present alongside the manifest)
    /// and the process environment.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PackmergeError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let env_vars = crate::properties::load_env_file(&dir.join(crate::ENV_FILE))?;
        let mut value: toml::Value = toml::from_str(&content).map_err(parse_error)?;
        crate::properties::interpolate_value(&mut value, &env_vars);

        Ok(value.try_into::<Self>().map_err(parse_error)?)
    }

    /// Parse a `Packmerge.toml` from a string (no interpolation).
    pub fn from_str(content: &str) -> miette::Result<Self> {
        Ok(toml::from_str(content).map_err(parse_error)?)
    }

    /// Resolve a build type by name, layering manifest settings over the
    /// built-in `debug`/`release` defaults.
    ///
    /// The built-in `debug` type signs with the `debug` signing config when
    /// one is declared. Returns `None` for an unknown name.
    pub fn build_type(&self, name: &str) -> Option<BuildType> {
        let builtin = BuildType::builtin(name).map(|mut bt| {
            if name == "debug" && self.signing.contains_key("debug") {
                bt.signing_config = Some("debug".to_string());
            }
            bt
        });
        match (self.build_types.get(name), builtin) {
            (Some(declared), Some(base)) => Some(declared.clone().over(base)),
            (Some(declared), None) => Some(declared.clone()),
            (None, builtin) => builtin,
        }
    }

    /// Names of every available build type, built-in ones included, sorted.
    pub fn build_type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.build_types.keys().cloned().collect();
        for builtin in ["debug", "release"] {
            if !self.build_types.contains_key(builtin) {
                names.push(builtin.to_string());
            }
        }
        names.sort();
        names
    }
}

fn parse_error(e: impl std::fmt::Display) -> PackmergeError {
    PackmergeError::Manifest {
        message: format!("Failed to parse {}: {e}", crate::MANIFEST_FILE),
    }
}
