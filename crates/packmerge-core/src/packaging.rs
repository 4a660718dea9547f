use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

/// Packaging configuration from the `[packaging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagingConfig {
    #[serde(default = "default_output_dir", rename = "output-dir")]
    pub output_dir: String,

    /// Conflict rules in declaration order.
    #[serde(default)]
    pub rules: Vec<RuleEntry>,

    /// Shorthand for `pick-first` rules, appended after `rules`.
    #[serde(default, rename = "pick-first")]
    pub pick_first: Vec<String>,

    /// Packaging inputs in declaration order.
    #[serde(default)]
    pub inputs: Vec<InputEntry>,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            rules: Vec::new(),
            pick_first: Vec::new(),
            inputs: Vec::new(),
        }
    }
}

fn default_output_dir() -> String {
    "build/outputs".to_string()
}

/// A `[[packaging.rules]]` entry. The strategy name is validated when the
/// rule set is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub pattern: String,
    pub strategy: String,
}

/// A `[[packaging.inputs]]` entry: a directory or archive contributing files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputEntry {
    pub path: String,

    /// Identifier reported in conflicts, e.g. a Maven coordinate.
    /// Defaults to `path`.
    #[serde(default)]
    pub origin: Option<String>,
}

impl InputEntry {
    pub fn origin(&self) -> &str {
        self.origin.as_deref().unwrap_or(&self.path)
    }
}

impl PackagingConfig {
    /// All conflict rules in evaluation order: explicit `rules` first, then
    /// the `pick-first` shorthand patterns.
    pub fn rule_entries(&self) -> Vec<RuleEntry> {
        let mut entries = self.rules.clone();
        entries.extend(self.pick_first.iter().map(|pattern| RuleEntry {
            pattern: pattern.clone(),
            strategy: "pick-first".to_string(),
        }));
        entries
    }

    /// Check that `output-dir` names a directory strictly below the project
    /// directory: relative, no `..`, and not the project directory itself.
    ///
    /// `clean` removes this directory recursively.
    pub fn check_output_dir(&self) -> Result<(), String> {
        let path = Path::new(&self.output_dir);
        let relative = path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        let nested = path.components().any(|c| matches!(c, Component::Normal(_)));
        if !(relative && nested) {
            return Err(format!(
                "output-dir `{}` must be a relative path below the project directory",
                self.output_dir
            ));
        }
        Ok(())
    }
}
