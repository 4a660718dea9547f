use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for packmerge operations.
#[derive(Debug, Error, Diagnostic)]
pub enum PackmergeError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Packmerge.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Packmerge.toml for syntax errors"))]
    Manifest { message: String },

    /// The manifest parsed but describes an inconsistent build.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An input archive could not be read, or the output package could not be written.
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type PackmergeResult<T> = miette::Result<T>;
