use anyhow::Context;

use crate::install::{Entry, Installation};
use crate::runner::CommandRunner;

/// Runs clash in the foreground with the installation directory as its home.
pub(crate) fn run_clash(install: &Installation, runner: &dyn CommandRunner) -> anyhow::Result<()> {
    let binary = install.path_of(Entry::ClashBinary);
    let binary = binary.to_str().context("Invalid clash binary path")?;
    let home = install.dir().to_str().context("Invalid installation path")?;

    runner.run("sudo", &[binary, "-d", home])?;

    Ok(())
}
