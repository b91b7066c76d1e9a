use std::fs;
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::install::{write_atomic, DIR_MODE, FILE_MODE};
use crate::runner::CommandRunner;

/// systemd drop-in directory of the docker service.
pub(crate) const DOCKER_SERVICE_DIR: &str = "/etc/systemd/system/docker.service.d";
pub(crate) const DOCKER_PROXY_CONFIG_NAME: &str = "http-proxy.conf";
const DOCKER_SERVICE: &str = "docker";

pub(crate) const DEFAULT_HTTP_PROXY: &str = "http://127.0.0.1:7890";
pub(crate) const DEFAULT_HTTPS_PROXY: &str = "http://127.0.0.1:7890";
pub(crate) const DEFAULT_NO_PROXY: &str = "localhost,127.0.0.1,::1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ProxySettings {
    pub http_proxy: String,
    pub https_proxy: String,
    pub no_proxy: String,
}

impl ProxySettings {
    /// Empty values fall back to the local clash listener.
    pub(crate) fn new(http_proxy: &str, https_proxy: &str, no_proxy: &str) -> Self {
        fn or_default(value: &str, default: &str) -> String {
            let value = if value.is_empty() { default } else { value };
            value.to_string()
        }

        ProxySettings {
            http_proxy: or_default(http_proxy, DEFAULT_HTTP_PROXY),
            https_proxy: or_default(https_proxy, DEFAULT_HTTPS_PROXY),
            no_proxy: or_default(no_proxy, DEFAULT_NO_PROXY),
        }
    }

    fn render(&self) -> String {
        let ProxySettings {
            http_proxy,
            https_proxy,
            no_proxy,
        } = self;

        format!(
            r#"[Service]
Environment="HTTP_PROXY={http_proxy}"
Environment="HTTPS_PROXY={https_proxy}"
Environment="NO_PROXY={no_proxy}"
"#
        )
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum DropInStatus {
    Enabled(String),
    Disabled,
}

/// The `http-proxy.conf` drop-in of the docker service.
pub(crate) struct DropIn {
    dir: PathBuf,
}

impl DropIn {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        DropIn { dir: dir.into() }
    }

    pub(crate) fn path(&self) -> PathBuf {
        self.dir.join(DOCKER_PROXY_CONFIG_NAME)
    }

    /// Writes the drop-in, then reloads systemd and restarts docker. The file
    /// stays in place if the restart fails.
    pub(crate) fn enable(
        &self,
        settings: &ProxySettings,
        runner: &dyn CommandRunner,
    ) -> Result<()> {
        fs::DirBuilder::new()
            .recursive(true)
            .mode(DIR_MODE)
            .create(&self.dir)
            .map_err(|source| Error::DirectoryCreate {
                path: self.dir.clone(),
                source,
            })?;

        write_atomic(&self.path(), settings.render().as_bytes(), FILE_MODE)?;
        log::info!("wrote {}", self.path().display());

        restart_docker(runner)
    }

    /// Removes the drop-in if present, then reloads systemd and restarts docker.
    pub(crate) fn disable(&self, runner: &dyn CommandRunner) -> Result<()> {
        let path = self.path();

        match fs::remove_file(&path) {
            Ok(()) => log::info!("removed {}", path.display()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} already absent", path.display())
            }
            Err(source) => return Err(Error::Io { path, source }),
        }

        restart_docker(runner)
    }

    pub(crate) fn status(&self) -> Result<DropInStatus> {
        read_status(&self.path())
    }
}

fn read_status(path: &Path) -> Result<DropInStatus> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(DropInStatus::Enabled(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(DropInStatus::Disabled),
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn restart_docker(runner: &dyn CommandRunner) -> Result<()> {
    println!("Restarting Docker daemon...");
    runner.run("systemctl", &["daemon-reload"])?;
    runner.run("systemctl", &["restart", DOCKER_SERVICE])?;
    println!("Docker daemon restarted");

    Ok(())
}
