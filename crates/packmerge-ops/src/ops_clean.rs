//! Operation: remove written packages.

use std::path::Path;

use packmerge_core::manifest::Manifest;
use packmerge_core::MANIFEST_FILE;
use packmerge_util::errors::PackmergeError;

/// Remove the packaging output directory of the project in `project_dir`.
///
/// With `build_type`, only that build type's package is removed.
pub fn clean(project_dir: &Path, build_type: Option<&str>) -> miette::Result<CleanResult> {
    let manifest = Manifest::from_path(&project_dir.join(MANIFEST_FILE))?;
    manifest
        .packaging
        .check_output_dir()
        .map_err(|message| PackmergeError::Config { message })?;
    let output_dir = project_dir.join(&manifest.packaging.output_dir);

    if let Some(name) = build_type {
        let package = output_dir.join(format!("{}-{name}.apk", manifest.package.name));
        if package.is_file() {
            std::fs::remove_file(&package).map_err(PackmergeError::Io)?;
            Ok(CleanResult::PackageRemoved(name.to_string()))
        } else {
            Ok(CleanResult::PackageNotFound(name.to_string()))
        }
    } else if output_dir.exists() {
        std::fs::remove_dir_all(&output_dir).map_err(PackmergeError::Io)?;
        Ok(CleanResult::AllCleaned)
    } else {
        Ok(CleanResult::NothingToClean)
    }
}

/// Result of a clean operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanResult {
    AllCleaned,
    PackageRemoved(String),
    PackageNotFound(String),
    NothingToClean,
}
