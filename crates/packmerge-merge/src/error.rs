use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while building a rule set or resolving candidates.
///
/// Only [`MergeError::UnresolvedConflict`] can come out of
/// [`crate::resolver::resolve`]; the other variants are raised while the
/// rule set is built from configuration.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum MergeError {
    /// Two or more candidates with different content share a path that no
    /// rule covers.
    #[error("Unresolved packaging conflict at `{path}` (contributed by {})", .origins.join(", "))]
    #[diagnostic(
        code(packmerge::unresolved_conflict),
        help("Add a [[packaging.rules]] entry whose pattern matches this path, e.g. strategy = \"pick-first\"")
    )]
    UnresolvedConflict { path: String, origins: Vec<String> },

    /// A rule pattern is not a valid glob.
    #[error("Invalid packaging rule pattern `{pattern}`: {message}")]
    #[diagnostic(code(packmerge::invalid_pattern))]
    InvalidPattern { pattern: String, message: String },

    /// A rule names a strategy that does not exist.
    #[error("Unknown packaging strategy `{name}` for pattern `{pattern}`")]
    #[diagnostic(
        code(packmerge::unknown_strategy),
        help("Supported strategies: pick-first, merge")
    )]
    UnknownStrategy { name: String, pattern: String },
}
