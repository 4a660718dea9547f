use serde::{Deserialize, Serialize};

/// A build type from `[build-types.<name>]`.
///
/// Fields left unset in the manifest inherit from the built-in `debug` or
/// `release` defaults when the name matches one of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildType {
    #[serde(default)]
    pub debuggable: Option<bool>,

    #[serde(default)]
    pub minify: Option<bool>,

    #[serde(default, rename = "shrink-resources")]
    pub shrink_resources: Option<bool>,

    #[serde(default, rename = "signing-config")]
    pub signing_config: Option<String>,

    #[serde(default, rename = "proguard-files")]
    pub proguard_files: Vec<String>,
}

impl BuildType {
    /// The built-in debug build type: debuggable, no minification.
    pub fn debug() -> Self {
        Self {
            debuggable: Some(true),
            minify: Some(false),
            shrink_resources: Some(false),
            signing_config: None,
            proguard_files: Vec::new(),
        }
    }

    /// The built-in release build type: minified and resource-shrunk.
    pub fn release() -> Self {
        Self {
            debuggable: Some(false),
            minify: Some(true),
            shrink_resources: Some(true),
            signing_config: None,
            proguard_files: Vec::new(),
        }
    }

    /// The built-in defaults for `name`, if it is `debug` or `release`.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "debug" => Some(Self::debug()),
            "release" => Some(Self::release()),
            _ => None,
        }
    }

    /// Overlay the fields set in `self` on top of `base`.
    pub fn over(self, base: BuildType) -> BuildType {
        BuildType {
            debuggable: self.debuggable.or(base.debuggable),
            minify: self.minify.or(base.minify),
            shrink_resources: self.shrink_resources.or(base.shrink_resources),
            signing_config: self.signing_config.or(base.signing_config),
            proguard_files: if self.proguard_files.is_empty() {
                base.proguard_files
            } else {
                self.proguard_files
            },
        }
    }

    pub fn is_debuggable(&self) -> bool {
        self.debuggable.unwrap_or(false)
    }

    pub fn is_minified(&self) -> bool {
        self.minify.unwrap_or(false)
    }

    pub fn shrinks_resources(&self) -> bool {
        self.shrink_resources.unwrap_or(false)
    }
}
