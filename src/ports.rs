use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// The only two fields of the clash config this tool cares about.
#[derive(Debug, Deserialize)]
struct ListenerPorts {
    #[serde(default)]
    port: Option<u32>,
    #[serde(default, rename = "socks-port")]
    socks_port: Option<u32>,
}

/// Returns `(port, socks-port)` from the clash config at `path`.
pub(crate) fn read_ports(path: &Path) -> Result<(u32, u32)> {
    let data = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::ConfigMissing(path.to_path_buf()),
        _ => Error::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let ports: ListenerPorts =
        serde_yaml_ng::from_slice(&data).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let required = |value: Option<u32>, field: &'static str| match value {
        Some(port) if port != 0 => Ok(port),
        _ => Err(Error::FieldMissing {
            field,
            path: path.to_path_buf(),
        }),
    };

    Ok((
        required(ports.port, "port")?,
        required(ports.socks_port, "socks-port")?,
    ))
}
