//! Check command implementation.

use miette::Result;

use packmerge_util::errors::PackmergeError;

pub fn exec(build_type: &str, json: bool, verbose: bool) -> Result<()> {
    let root = super::project_root()?;
    let summary = packmerge_ops::ops_check::check(&root, build_type, verbose)?;

    if json {
        println!("{}", summary.to_json()?);
    } else {
        print!("{}", summary.conflicts);
        if summary.conflicts.is_empty() {
            println!();
        }
    }

    let unresolved = summary.conflicts.unresolved().count();
    if unresolved > 0 {
        return Err(PackmergeError::Generic {
            message: format!(
                "{unresolved} unresolved packaging conflict(s); add [[packaging.rules]] entries for them"
            ),
        }
        .into());
    }
    if !json {
        packmerge_util::progress::status(
            "Finished",
            &format!(
                "check passed ({} candidates, {} conflicts resolved)",
                summary.candidates,
                summary.conflicts.len()
            ),
        );
    }
    Ok(())
}
