//! Operation: collect inputs, resolve conflicts and write the package.
//!
//! The package is a zip archive with entries in path order and fixed
//! timestamps, so identical inputs produce byte-identical packages. Native
//! libraries are stored uncompressed, everything else is deflated. The
//! archive is written to a temporary file next to its destination and
//! renamed into place once complete.

use std::io::Write;
use std::path::{Path, PathBuf};

use packmerge_merge::conflict::ConflictReport;
use packmerge_merge::{resolve, source, MergeResult};
use packmerge_util::errors::PackmergeError;
use packmerge_util::hash::{sha256_file, short_digest};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use crate::ops_setup::{self, BuildSettings};

/// Options for [`package`].
#[derive(Debug, Clone)]
pub struct PackageOptions {
    pub build_type: String,
    pub verbose: bool,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            build_type: "debug".to_string(),
            verbose: false,
        }
    }
}

/// Outcome of a successful packaging pass.
#[derive(Debug, Clone)]
pub struct PackageResult {
    pub output: PathBuf,
    pub entries: usize,
    pub sha256: String,
    pub report: ConflictReport,
}

/// Package the project in `project_dir`.
pub fn package(project_dir: &Path, opts: &PackageOptions) -> miette::Result<PackageResult> {
    let settings = ops_setup::load_settings(project_dir, &opts.build_type)?;
    packmerge_util::progress::status(
        "Packaging",
        &format!(
            "{} v{} ({})",
            settings.name, settings.version, settings.build_type_name
        ),
    );
    if opts.verbose {
        ops_setup::print_settings_summary(&settings);
    }
    package_with_settings(&settings, opts.verbose)
}

/// Run the collect, resolve and write stages for already-loaded settings.
pub fn package_with_settings(
    settings: &BuildSettings,
    verbose: bool,
) -> miette::Result<PackageResult> {
    let candidates = source::collect(&settings.inputs)?;
    let candidate_count = candidates.len();
    let merged = resolve(candidates, &settings.rules)?;

    if verbose {
        for conflict in &merged.report().conflicts {
            packmerge_util::progress::status_info("Resolved", &conflict.to_string());
        }
    }

    let output = settings.output_path();
    let spinner = packmerge_util::progress::spinner(&format!("Writing {}", output.display()));
    let written = write_package(&merged, &output);
    spinner.finish_and_clear();
    written?;

    let sha256 = sha256_file(&output).map_err(PackmergeError::Io)?;
    packmerge_util::progress::status(
        "Finished",
        &format!(
            "{} ({} entries from {candidate_count} candidates, sha256 {})",
            output.display(),
            merged.len(),
            short_digest(&sha256)
        ),
    );

    Ok(PackageResult {
        output,
        entries: merged.len(),
        sha256,
        report: merged.report().clone(),
    })
}

/// Write `merged` to `output` as a deterministic zip archive.
pub fn write_package(merged: &MergeResult, output: &Path) -> miette::Result<()> {
    let dir = output.parent().unwrap_or(Path::new("."));
    packmerge_util::fs::ensure_dir(dir).map_err(PackmergeError::Io)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(PackmergeError::Io)?;
    {
        let mut zip = zip::ZipWriter::new(tmp.as_file_mut());
        for file in merged.files() {
            zip.start_file(file.path(), entry_options(file.path()))
                .map_err(|e| archive_error(output, e))?;
            zip.write_all(file.content()).map_err(PackmergeError::Io)?;
        }
        zip.finish().map_err(|e| archive_error(output, e))?;
    }

    tmp.persist(output)
        .map_err(|e| PackmergeError::Io(e.error))?;
    tracing::debug!("Wrote {} entries to {}", merged.len(), output.display());
    Ok(())
}

fn entry_options(path: &str) -> SimpleFileOptions {
    let method = if path.ends_with(".so") {
        CompressionMethod::Stored
    } else {
        CompressionMethod::Deflated
    };
    SimpleFileOptions::default()
        .compression_method(method)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644)
}

fn archive_error(output: &Path, e: impl std::fmt::Display) -> PackmergeError {
    PackmergeError::Archive {
        message: format!("Failed to write {}: {e}", output.display()),
    }
}
