use std::fs::{self, OpenOptions, Permissions};
use std::io::{self, Write};
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use crate::assets::{self, AssetSource};
use crate::error::{Error, Result};

/// Directory where clash-tools keeps the clash binary and its configuration.
pub(crate) const DEFAULT_INSTALL_DIR: &str = "/var/lib/clash_tools/clash";

pub(crate) const CONFIG_FILE_NAME: &str = "config.yaml";

pub(crate) const DIR_MODE: u32 = 0o755;
const EXECUTABLE_MODE: u32 = 0o755;
pub(crate) const FILE_MODE: u32 = 0o644;

/// The four files that make up an installation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Entry {
    ClashBinary,
    CountryMmdb,
    Template,
    LiveConfig,
}

impl Entry {
    fn file_name(self) -> &'static str {
        match self {
            Entry::ClashBinary => assets::CLASH_BINARY,
            Entry::CountryMmdb => assets::COUNTRY_MMDB,
            Entry::Template => assets::CONFIG_TEMPLATE,
            Entry::LiveConfig => CONFIG_FILE_NAME,
        }
    }

    /// The bundled blob an entry is seeded from. The live config is seeded
    /// from the template blob, never from the template file on disk.
    fn asset(self) -> &'static str {
        match self {
            Entry::ClashBinary => assets::CLASH_BINARY,
            Entry::CountryMmdb => assets::COUNTRY_MMDB,
            Entry::Template | Entry::LiveConfig => assets::CONFIG_TEMPLATE,
        }
    }

    fn mode(self) -> u32 {
        match self {
            Entry::ClashBinary => EXECUTABLE_MODE,
            _ => FILE_MODE,
        }
    }
}

/// Install order used by [`Installation::ensure`].
const ENSURE_ORDER: [Entry; 4] = [
    Entry::Template,
    Entry::LiveConfig,
    Entry::CountryMmdb,
    Entry::ClashBinary,
];

/// Owns every write into the installation directory.
#[derive(Clone, Debug)]
pub(crate) struct Installation {
    dir: PathBuf,
}

impl Installation {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Installation { dir: dir.into() }
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn path_of(&self, entry: Entry) -> PathBuf {
        self.dir.join(entry.file_name())
    }

    /// Creates the directory and any missing file, then makes sure the clash
    /// binary is still executable. Existing files are left untouched.
    pub(crate) fn ensure(&self, assets: &dyn AssetSource) -> Result<()> {
        fs::DirBuilder::new()
            .recursive(true)
            .mode(DIR_MODE)
            .create(&self.dir)
            .map_err(|source| Error::DirectoryCreate {
                path: self.dir.clone(),
                source,
            })?;

        for entry in ENSURE_ORDER {
            self.ensure_entry(entry, assets)?;
        }

        let binary = self.path_of(Entry::ClashBinary);
        fs::set_permissions(&binary, Permissions::from_mode(EXECUTABLE_MODE))
            .map_err(|source| Error::Chmod {
                path: binary,
                source,
            })
    }

    /// Overwrites the live config with the template file currently on disk.
    pub(crate) fn reset_live_config(&self, assets: &dyn AssetSource) -> Result<()> {
        self.ensure_entry(Entry::Template, assets)?;

        let template = self.path_of(Entry::Template);
        let data = fs::read(&template).map_err(|source| Error::TemplateUnavailable {
            path: template,
            source,
        })?;

        let live = self.path_of(Entry::LiveConfig);
        write_atomic(&live, &data, FILE_MODE)?;
        log::info!("reset {} from template", live.display());

        Ok(())
    }

    fn ensure_entry(&self, entry: Entry, assets: &dyn AssetSource) -> Result<()> {
        let path = self.path_of(entry);

        match fs::symlink_metadata(&path) {
            Ok(_) => {
                log::debug!("{} already present", path.display());
                return Ok(());
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(Error::Io { path, source }),
        }

        let data = assets.read(entry.asset())?;
        write_atomic(&path, &data, entry.mode())?;
        log::info!("installed {}", path.display());

        Ok(())
    }
}

/// Writes `data` next to `path` with a `.tmp` suffix and renames it into
/// place. The temporary file is removed if anything fails after it exists.
pub(crate) fn write_atomic(path: &Path, data: &[u8], mode: u32) -> Result<()> {
    let tmp_path = tmp_path_for(path);

    let written = write_tmp(&tmp_path, data, mode).map_err(|source| Error::Write {
        path: tmp_path.clone(),
        source,
    });
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::Rename {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn write_tmp(tmp_path: &Path, data: &[u8], mode: u32) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(tmp_path)?;

    file.write_all(data)?;
    file.sync_all()?;

    // umask may have stripped bits from the creation mode
    file.set_permissions(Permissions::from_mode(mode))
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
