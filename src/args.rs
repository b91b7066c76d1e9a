use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::install::DEFAULT_INSTALL_DIR;

#[derive(Parser, Debug)]
#[command(name = "clash-tools", version, about = "Clash tools CLI for managing clash", long_about = None)]
pub(crate) struct Config {
    /// Installation directory holding the clash binary and its configuration
    #[arg(long, global = true, env = "CLASH_TOOLS_DIR", default_value = DEFAULT_INSTALL_DIR)]
    pub dir: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Manage clash configuration
    Config(ConfigCommandArgs),
    /// Print shell proxy exports, use with eval "$(clash-tools proxy)"
    Proxy,
    /// Run clash server
    Run,
    /// Manage Docker daemon proxy
    Docker(DockerCommandArgs),
    /// Print clash-tools version
    Version,
}

#[derive(Args, Debug)]
pub(crate) struct ConfigCommandArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ConfigCommands {
    /// Print the absolute path to the clash configuration file
    Path,
    /// Print the content of the clash configuration file
    Cat,
    /// Edit the clash configuration using the default editor
    Edit,
    /// Reset the clash configuration to the embedded template
    Reset,
}

#[derive(Args, Debug)]
pub(crate) struct DockerCommandArgs {
    /// HTTP proxy for Docker daemon (default http://127.0.0.1:7890)
    #[arg(long, global = true, default_value = "")]
    pub http_proxy: String,

    /// HTTPS proxy for Docker daemon (default http://127.0.0.1:7890)
    #[arg(long, global = true, default_value = "")]
    pub https_proxy: String,

    /// NO_PROXY for Docker daemon (default localhost,127.0.0.1,::1)
    #[arg(long, global = true, default_value = "")]
    pub no_proxy: String,

    #[command(subcommand)]
    pub command: DockerCommands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum DockerCommands {
    /// Write the systemd drop-in and restart Docker
    Enable,
    /// Remove the systemd drop-in and restart Docker
    Disable,
    /// Show the systemd drop-in if it exists
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Config::command().debug_assert();
    }

    #[test]
    fn docker_flags_follow_the_subcommand() {
        let config = Config::try_parse_from([
            "clash-tools",
            "docker",
            "enable",
            "--http-proxy",
            "http://x:1",
            "--no-proxy",
            "a,b",
        ])
        .unwrap();

        match config.command {
            Commands::Docker(args) => {
                assert!(matches!(args.command, DockerCommands::Enable));
                assert_eq!(args.http_proxy, "http://x:1");
                assert_eq!(args.https_proxy, "");
                assert_eq!(args.no_proxy, "a,b");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn dir_defaults_to_system_location() {
        let config = Config::try_parse_from(["clash-tools", "config", "path"]).unwrap();

        if std::env::var_os("CLASH_TOOLS_DIR").is_none() {
            assert_eq!(config.dir, PathBuf::from(DEFAULT_INSTALL_DIR));
        }
        assert!(matches!(
            config.command,
            Commands::Config(ConfigCommandArgs {
                command: ConfigCommands::Path
            })
        ));
    }
}
