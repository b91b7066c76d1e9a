#[cfg(target_os = "linux")]
mod args;
#[cfg(target_os = "linux")]
mod assets;
#[cfg(target_os = "linux")]
mod config;
#[cfg(target_os = "linux")]
mod docker;
#[cfg(target_os = "linux")]
mod engine;
#[cfg(target_os = "linux")]
mod error;
#[cfg(target_os = "linux")]
mod exports;
#[cfg(target_os = "linux")]
mod install;
#[cfg(target_os = "linux")]
mod logging;
#[cfg(target_os = "linux")]
mod ports;
#[cfg(target_os = "linux")]
mod runner;

#[cfg(target_os = "linux")]
use anyhow::Context;
#[cfg(target_os = "linux")]
use clap::Parser;

#[cfg(target_os = "linux")]
use crate::assets::EmbeddedAssets;
#[cfg(target_os = "linux")]
use crate::install::{Entry, Installation};
#[cfg(target_os = "linux")]
use crate::runner::SystemRunner;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(target_os = "linux")]
fn run() -> anyhow::Result<()> {
    if !nix::unistd::Uid::effective().is_root() {
        println!("{}", error::Error::PrivilegeDenied);
        std::process::exit(1);
    }

    let config = args::Config::parse();

    logging::init_logger(config.verbose);

    let install = Installation::new(&config.dir);
    install
        .ensure(&EmbeddedAssets)
        .context("failed to prepare clash installation")?;

    match config.command {
        args::Commands::Config(args) => {
            config::handle_config_command(&args, &install, &EmbeddedAssets, &SystemRunner)
        }
        args::Commands::Proxy => print_proxy_exports(&install),
        args::Commands::Run => engine::run_clash(&install, &SystemRunner),
        args::Commands::Docker(args) => handle_docker_command(&args),
        args::Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn run() -> anyhow::Result<()> {
    anyhow::bail!("clash-tools is only supported on Linux");
}

#[cfg(target_os = "linux")]
fn print_proxy_exports(install: &Installation) -> anyhow::Result<()> {
    let (http_port, socks_port) = ports::read_ports(&install.path_of(Entry::LiveConfig))?;

    exports::write_shell_exports(&mut std::io::stdout().lock(), http_port, socks_port)?;

    Ok(())
}

#[cfg(target_os = "linux")]
fn handle_docker_command(args: &args::DockerCommandArgs) -> anyhow::Result<()> {
    let drop_in = docker::DropIn::new(docker::DOCKER_SERVICE_DIR);

    match args.command {
        args::DockerCommands::Enable => {
            let settings =
                docker::ProxySettings::new(&args.http_proxy, &args.https_proxy, &args.no_proxy);

            drop_in
                .enable(&settings, &SystemRunner)
                .context("failed to enable Docker daemon proxy")?;

            println!("Enabled Docker daemon proxy");
            println!("  HTTP_PROXY={}", settings.http_proxy);
            println!("  HTTPS_PROXY={}", settings.https_proxy);
            println!("  NO_PROXY={}", settings.no_proxy);
        }
        args::DockerCommands::Disable => {
            drop_in
                .disable(&SystemRunner)
                .context("failed to disable Docker daemon proxy")?;

            println!("Disabled Docker daemon proxy");
        }
        args::DockerCommands::Status => match drop_in.status()? {
            docker::DropInStatus::Enabled(content) => {
                println!("Docker daemon proxy: Enabled");
                println!("{content}");
            }
            docker::DropInStatus::Disabled => println!("Docker daemon proxy: Disabled"),
        },
    }

    Ok(())
}
