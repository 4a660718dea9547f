//! One file contributed by one packaging input.

use std::fmt;

/// A file destined for the output package, before conflict resolution.
///
/// The destination path is normalised on construction: `\` separators become
/// `/`, empty or `.` segments (including a leading `/` or `./`) are dropped,
/// and `..` removes the preceding segment. The result never leaves the
/// package root.
#[derive(Clone, PartialEq, Eq)]
pub struct CandidateFile {
    path: String,
    origin: String,
    content: Vec<u8>,
}

impl CandidateFile {
    pub fn new(
        path: impl AsRef<str>,
        origin: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            origin: origin.into(),
            content: content.into(),
        }
    }

    /// Destination path relative to the package root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Identifier of the input that contributed this file.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}

impl fmt::Debug for CandidateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateFile")
            .field("path", &self.path)
            .field("origin", &self.origin)
            .field("len", &self.content.len())
            .finish()
    }
}

/// Normalise a package path to `/`-separated segments with no empty, `.` or
/// `..` segments. A `..` with nothing left to remove is dropped.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    segments.join("/")
}
