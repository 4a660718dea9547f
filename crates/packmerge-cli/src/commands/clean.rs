//! Clean command implementation.

use miette::Result;

use packmerge_ops::ops_clean::{self, CleanResult};

pub fn exec(build_type: Option<&str>) -> Result<()> {
    let root = super::project_root()?;
    match ops_clean::clean(&root, build_type)? {
        CleanResult::AllCleaned => println!("Cleaned packaging outputs"),
        CleanResult::PackageRemoved(name) => println!("Removed {name} package"),
        CleanResult::PackageNotFound(name) => println!("No {name} package to remove"),
        CleanResult::NothingToClean => println!("Nothing to clean"),
    }
    Ok(())
}
