//! Flattening packaging inputs (directories and archives) into an ordered
//! list of candidates.
//!
//! Inputs are visited in declaration order. Within one input, files are
//! sorted by path, so the candidate order only depends on the inputs
//! themselves and never on filesystem or archive iteration order.

use std::io::Read;
use std::path::{Path, PathBuf};

use packmerge_util::errors::PackmergeError;

use crate::candidate::CandidateFile;

/// A directory or archive contributing files to the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSource {
    /// Identifier reported in conflicts (e.g. a Maven coordinate).
    pub origin: String,
    pub path: PathBuf,
}

impl InputSource {
    pub fn new(origin: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            origin: origin.into(),
            path: path.into(),
        }
    }
}

/// The layout of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Directory,
    /// Android library archive; `jni/` entries are native libraries.
    Aar,
    /// Any other zip-based archive (`.jar`, `.zip`, `.apk`), taken as-is.
    Archive,
}

impl InputKind {
    /// Determine the kind of `path` from the filesystem and its extension.
    pub fn detect(path: &Path) -> Option<Self> {
        if path.is_dir() {
            return Some(Self::Directory);
        }
        let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
        match ext.as_str() {
            "aar" => Some(Self::Aar),
            "jar" | "zip" | "apk" => Some(Self::Archive),
            _ => None,
        }
    }
}

/// Map an entry of an Android library archive to its package path.
///
/// Native libraries live under `jni/<abi>/` in an `.aar` and under
/// `lib/<abi>/` in the package.
pub fn aar_package_path(entry: &str) -> String {
    match entry.strip_prefix("jni/") {
        Some(rest) => format!("lib/{rest}"),
        None => entry.to_string(),
    }
}

/// Collect the candidates of every input, in input order.
pub fn collect(sources: &[InputSource]) -> miette::Result<Vec<CandidateFile>> {
    let mut candidates = Vec::new();
    for source in sources {
        let files = collect_one(source)?;
        tracing::debug!(
            "Collected {} files from {} ({})",
            files.len(),
            source.origin,
            source.path.display()
        );
        candidates.extend(files);
    }
    Ok(candidates)
}

/// Collect the candidates of a single input, sorted by path.
pub fn collect_one(source: &InputSource) -> miette::Result<Vec<CandidateFile>> {
    if !source.path.exists() {
        return Err(PackmergeError::Archive {
            message: format!(
                "Input `{}` not found at {}",
                source.origin,
                source.path.display()
            ),
        }
        .into());
    }
    let kind = InputKind::detect(&source.path).ok_or_else(|| PackmergeError::Archive {
        message: format!(
            "Unsupported input {} (expected a directory, .aar, .jar, .zip or .apk)",
            source.path.display()
        ),
    })?;

    let mut files = match kind {
        InputKind::Directory => read_directory(source)?,
        InputKind::Aar => read_archive(source, true)?,
        InputKind::Archive => read_archive(source, false)?,
    };
    files.sort_by(|a, b| a.path().cmp(b.path()));
    Ok(files)
}

fn read_directory(source: &InputSource) -> miette::Result<Vec<CandidateFile>> {
    let paths = packmerge_util::fs::list_files_sorted(&source.path).map_err(PackmergeError::Io)?;
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(rel) = packmerge_util::fs::relative_slash_path(&source.path, &path) else {
            continue;
        };
        let content = std::fs::read(&path).map_err(PackmergeError::Io)?;
        files.push(CandidateFile::new(rel, source.origin.clone(), content));
    }
    Ok(files)
}

fn read_archive(source: &InputSource, is_aar: bool) -> miette::Result<Vec<CandidateFile>> {
    let file = std::fs::File::open(&source.path).map_err(PackmergeError::Io)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| archive_error(&source.path, e))?;

    let mut files = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| archive_error(&source.path, e))?;
        if entry.is_dir() {
            continue;
        }
        if entry.enclosed_name().is_none() {
            tracing::warn!(
                "Skipping entry with unsafe path {:?} in {}",
                entry.name(),
                source.path.display()
            );
            continue;
        }
        let name = entry.name().to_string();
        let mut content = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut content)
            .map_err(|e| archive_error(&source.path, e))?;

        let path = if is_aar { aar_package_path(&name) } else { name };
        files.push(CandidateFile::new(path, source.origin.clone(), content));
    }
    Ok(files)
}

fn archive_error(path: &Path, e: impl std::fmt::Display) -> PackmergeError {
    PackmergeError::Archive {
        message: format!("{}: {e}", path.display()),
    }
}
