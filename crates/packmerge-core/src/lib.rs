//! Core data types for packmerge.
//!
//! This crate defines the types that represent a packmerge project:
//! manifest parsing, application identity and SDK levels, signing
//! configurations, build types, packaging rules and inputs, and
//! `${env:VAR}` interpolation.
//!
//! This crate performs no archive I/O; it only reads the manifest and its
//! companion `.packmerge.env` file.

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "Packmerge.toml";

/// File name of the optional secrets file read for `${env:VAR}` interpolation.
pub const ENV_FILE: &str = ".packmerge.env";

pub mod android;
pub mod build_type;
pub mod manifest;
pub mod packaging;
pub mod properties;
pub mod signing;
