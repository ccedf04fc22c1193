//! Subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use gfs_core::{GfsConfig, ReferenceTable};

/// Load the config file if one was given, defaults otherwise.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<GfsConfig> {
    match config_path {
        Some(path) => Ok(GfsConfig::from_file(Path::new(path))?),
        None => Ok(GfsConfig::default()),
    }
}

/// Load the reference table from `--reference` or the configured path.
pub fn load_reference(
    config: &GfsConfig,
    reference: Option<&PathBuf>,
) -> anyhow::Result<ReferenceTable> {
    let path = reference.unwrap_or(&config.reference.path);
    if !path.exists() {
        anyhow::bail!("Reference table not found: {}", path.display());
    }
    Ok(ReferenceTable::from_path(path, &config.reference)?)
}
