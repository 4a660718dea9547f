//! Package command implementation.

use miette::Result;

use packmerge_ops::ops_package::{self, PackageOptions};

pub fn exec(build_type: &str, verbose: bool) -> Result<()> {
    let root = super::project_root()?;
    let opts = PackageOptions {
        build_type: build_type.to_string(),
        verbose,
    };
    let result = ops_package::package(&root, &opts)?;
    println!("{}", result.output.display());
    Ok(())
}
