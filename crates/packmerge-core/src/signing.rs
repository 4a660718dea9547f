use serde::{Deserialize, Serialize};
use std::fmt;

/// A named signing configuration from `[signing.<name>]`.
///
/// Signing material is carried through to the build summary only; packmerge
/// never applies it. Passwords are redacted from `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct SigningConfig {
    #[serde(rename = "store-file")]
    pub store_file: String,

    #[serde(default, rename = "store-password")]
    pub store_password: Option<String>,

    #[serde(rename = "key-alias")]
    pub key_alias: String,

    #[serde(default, rename = "key-password")]
    pub key_password: Option<String>,
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("store_file", &self.store_file)
            .field("store_password", &redact(&self.store_password))
            .field("key_alias", &self.key_alias)
            .field("key_password", &redact(&self.key_password))
            .finish()
    }
}

fn redact(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "****")
}
