// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{Manifest, RawManifest};
use crate::errors::Result;

/// Load a manifest from a given path and return the unvalidated
/// [`RawManifest`].
///
/// This only performs TOML deserialization. Use [`load_and_validate`] to also
/// check provider references and cycles.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawManifest> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let manifest: RawManifest = toml::from_str(&contents)?;

    Ok(manifest)
}

/// Load a manifest from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - at least one provider,
///   - providers needing themselves,
///   - unknown needs (subject to `[config].missing`),
///   - dependency cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Manifest> {
    let raw = load_from_path(&path)?;
    let manifest = Manifest::try_from(raw)?;
    Ok(manifest)
}

/// `Vixen.toml` in the current working directory.
pub fn default_manifest_path() -> PathBuf {
    PathBuf::from("Vixen.toml")
}
