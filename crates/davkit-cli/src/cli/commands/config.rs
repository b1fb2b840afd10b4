//! `davkit config` – show where the config lives and what it says.

use anyhow::Result;
use davkit_core::config::{self, DavkitConfig};
use std::path::Path;

/// Config file path as a comment line, followed by the effective config as TOML.
pub fn render(path: &Path, cfg: &DavkitConfig) -> Result<String> {
    Ok(format!(
        "# {}\n{}",
        path.display(),
        toml::to_string_pretty(cfg)?
    ))
}

pub fn run_config(cfg: &DavkitConfig) -> Result<()> {
    let path = config::config_path()?;
    print!("{}", render(&path, cfg)?);
    Ok(())
}
