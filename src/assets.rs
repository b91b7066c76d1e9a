use std::borrow::Cow;

use rust_embed::Embed;

use crate::error::{Error, Result};

pub(crate) const CLASH_BINARY: &str = "clash";
pub(crate) const COUNTRY_MMDB: &str = "Country.mmdb";
pub(crate) const CONFIG_TEMPLATE: &str = "config.template.yaml";

#[derive(Embed)]
#[folder = "assets"]
struct Assets;

/// Read-only source of the bundled blobs.
pub(crate) trait AssetSource {
    fn read(&self, name: &str) -> Result<Cow<'static, [u8]>>;
}

/// The blobs compiled into this executable.
pub(crate) struct EmbeddedAssets;

impl AssetSource for EmbeddedAssets {
    fn read(&self, name: &str) -> Result<Cow<'static, [u8]>> {
        Assets::get(name)
            .map(|file| file.data)
            .ok_or_else(|| Error::AssetMissing(name.to_string()))
    }
}
