//! Operation: validate the build settings and report packaging conflicts
//! without writing a package.

use std::path::Path;

use serde::Serialize;

use packmerge_merge::conflict::ConflictReport;
use packmerge_merge::{plan, source};
use packmerge_util::errors::PackmergeError;

use crate::ops_setup::{self, BuildSettings};

/// Machine-readable result of a check, printed by `packmerge check --json`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckSummary {
    pub name: String,
    pub version: String,
    #[serde(rename = "application-id")]
    pub application_id: String,
    #[serde(rename = "build-type")]
    pub build_type: String,
    #[serde(rename = "min-sdk")]
    pub min_sdk: u32,
    #[serde(rename = "target-sdk")]
    pub target_sdk: u32,
    #[serde(rename = "compile-sdk")]
    pub compile_sdk: u32,
    pub debuggable: bool,
    pub minify: bool,
    #[serde(rename = "shrink-resources")]
    pub shrink_resources: bool,
    #[serde(rename = "signing-config")]
    pub signing_config: Option<String>,
    pub inputs: usize,
    pub candidates: usize,
    pub conflicts: ConflictReport,
}

impl CheckSummary {
    fn new(settings: &BuildSettings, candidates: usize, conflicts: ConflictReport) -> Self {
        Self {
            name: settings.name.clone(),
            version: settings.version.clone(),
            application_id: settings.android.application_id().to_string(),
            build_type: settings.build_type_name.clone(),
            min_sdk: settings.android.min_sdk,
            target_sdk: settings.android.target_sdk(),
            compile_sdk: settings.android.compile_sdk,
            debuggable: settings.build_type.is_debuggable(),
            minify: settings.build_type.is_minified(),
            shrink_resources: settings.build_type.shrinks_resources(),
            signing_config: settings.signing.as_ref().map(|(name, _)| name.clone()),
            inputs: settings.inputs.len(),
            candidates,
            conflicts,
        }
    }

    pub fn is_clean(&self) -> bool {
        !self.conflicts.has_unresolved()
    }

    pub fn to_json(&self) -> miette::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PackmergeError::Generic {
                message: format!("Failed to serialize check result: {e}"),
            }
            .into()
        })
    }
}

/// Validate the project in `project_dir` and plan conflict resolution.
///
/// Unresolved conflicts do not make this fail; inspect
/// [`CheckSummary::is_clean`].
pub fn check(project_dir: &Path, build_type: &str, verbose: bool) -> miette::Result<CheckSummary> {
    let settings = ops_setup::load_settings(project_dir, build_type)?;
    if verbose {
        ops_setup::print_settings_summary(&settings);
    }

    let candidates = source::collect(&settings.inputs)?;
    let report = plan(&candidates, &settings.rules);
    tracing::info!(
        "Checked {} candidates: {} conflicts, {} unresolved",
        candidates.len(),
        report.len(),
        report.unresolved().count()
    );
    Ok(CheckSummary::new(&settings, candidates.len(), report))
}
