//! Packaging conflict resolution: decides which single file survives when
//! several packaging inputs place a file at the same path in the output
//! package.
//!
//! The pipeline is `source::collect` (inputs to ordered candidates), then
//! `resolver::resolve` (candidates plus rules to a deduplicated merge result).
//! The resolver itself is a pure function and performs no I/O.

pub mod candidate;
pub mod conflict;
pub mod error;
pub mod resolver;
pub mod rule;
pub mod source;

pub use candidate::CandidateFile;
pub use error::MergeError;
pub use resolver::{plan, resolve, MergeResult};
pub use rule::{ConflictRule, RuleSet, Strategy};
