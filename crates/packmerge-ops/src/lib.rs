//! High-level operations wiring CLI commands to the packmerge crates.

pub mod ops_check;
pub mod ops_clean;
pub mod ops_package;
pub mod ops_setup;
