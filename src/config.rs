use std::fs::File;
use std::io::{self, Write};

use anyhow::Context;

use crate::args;
use crate::assets::AssetSource;
use crate::error::Error;
use crate::install::{Entry, Installation};
use crate::runner::CommandRunner;

/// Editor lookup order for `config edit`.
const EDITOR_VARS: [&str; 2] = ["EDITOR", "VISUAL"];
const FALLBACK_EDITOR: &str = "nano";

pub(crate) fn handle_config_command(
    args: &args::ConfigCommandArgs,
    install: &Installation,
    assets: &dyn AssetSource,
    runner: &dyn CommandRunner,
) -> anyhow::Result<()> {
    let config_path = install.path_of(Entry::LiveConfig);

    match args.command {
        args::ConfigCommands::Path => println!("{}", config_path.display()),
        args::ConfigCommands::Cat => print_contents(install, &mut io::stdout().lock())?,
        args::ConfigCommands::Edit => edit_config(install, |name| std::env::var(name).ok(), runner)?,
        args::ConfigCommands::Reset => {
            install.reset_live_config(assets)?;
            println!("configuration reset from template");
        }
    }

    Ok(())
}

/// Opens the live config in the editor picked by [`select_editor`].
pub(crate) fn edit_config(
    install: &Installation,
    lookup: impl Fn(&str) -> Option<String>,
    runner: &dyn CommandRunner,
) -> anyhow::Result<()> {
    let editor = select_editor(lookup);
    let config_path = install.path_of(Entry::LiveConfig);
    let config_path = config_path.to_str().context("Invalid config path")?;

    runner.run(&editor, &[config_path])?;

    Ok(())
}

/// Streams the live config to `out`.
pub(crate) fn print_contents(
    install: &Installation,
    out: &mut impl Write,
) -> crate::error::Result<()> {
    let path = install.path_of(Entry::LiveConfig);
    let io_error = |source| Error::Io {
        path: path.clone(),
        source,
    };

    let mut file = File::open(&path).map_err(io_error)?;
    io::copy(&mut file, out).map_err(io_error)?;
    out.flush().map_err(io_error)
}

/// First non-empty value among `EDITOR` and `VISUAL`, else `nano`.
pub(crate) fn select_editor(lookup: impl Fn(&str) -> Option<String>) -> String {
    EDITOR_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}
