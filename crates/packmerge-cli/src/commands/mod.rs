//! Command dispatch and handler modules.

mod check;
mod clean;
mod package;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Package {
            build_type,
            release,
        } => {
            let build_type = if release { "release" } else { build_type.as_str() };
            package::exec(build_type, cli.verbose)
        }
        Command::Check { build_type, json } => check::exec(&build_type, json, cli.verbose),
        Command::Clean { build_type } => clean::exec(build_type.as_deref()),
    }
}

/// Locate the project root from the current directory.
fn project_root() -> Result<std::path::PathBuf> {
    let cwd = std::env::current_dir().map_err(packmerge_util::errors::PackmergeError::Io)?;
    packmerge_ops::ops_setup::find_project_root(&cwd)
}
