use serde::{Deserialize, Serialize};

/// Application identity and SDK levels from the `[android]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidConfig {
    pub namespace: String,

    #[serde(default, rename = "application-id")]
    pub application_id: Option<String>,

    #[serde(rename = "compile-sdk")]
    pub compile_sdk: u32,

    #[serde(rename = "min-sdk")]
    pub min_sdk: u32,

    #[serde(default, rename = "target-sdk")]
    pub target_sdk: Option<u32>,

    #[serde(default, rename = "ndk-version")]
    pub ndk_version: Option<String>,

    #[serde(default = "default_version_code", rename = "version-code")]
    pub version_code: u32,

    #[serde(default, rename = "version-name")]
    pub version_name: Option<String>,

    #[serde(default)]
    pub multidex: bool,

    #[serde(default, rename = "java-target")]
    pub java_target: Option<String>,
}

fn default_version_code() -> u32 {
    1
}

impl AndroidConfig {
    /// The application ID, falling back to the namespace.
    pub fn application_id(&self) -> &str {
        self.application_id.as_deref().unwrap_or(&self.namespace)
    }

    /// The target SDK, falling back to the compile SDK.
    pub fn target_sdk(&self) -> u32 {
        self.target_sdk.unwrap_or(self.compile_sdk)
    }

    /// Check that `min-sdk <= target-sdk <= compile-sdk`.
    ///
    /// Returns a human-readable description of the first violation.
    pub fn check_sdk_levels(&self) -> Result<(), String> {
        let target = self.target_sdk();
        if self.min_sdk > target {
            return Err(format!(
                "min-sdk {} is greater than target-sdk {target}",
                self.min_sdk
            ));
        }
        if target > self.compile_sdk {
            return Err(format!(
                "target-sdk {target} is greater than compile-sdk {}",
                self.compile_sdk
            ));
        }
        Ok(())
    }
}
