//! Shared utilities for packmerge.
//!
//! This crate provides cross-cutting concerns used by all other packmerge
//! crates: error types, filesystem helpers, content hashing, and terminal
//! status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;
