use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::stable::DEFAULT_STABLE_MARKERS;

/// How strictly the locator factory checks its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Empty/parse/label checks plus scheme allow-list and stable-URL misuse.
    #[default]
    Strict,
    /// Only empty/parse/label checks; stable-URL misuse is left to the caller.
    Lenient,
}

/// Output format for `davkit locate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Global configuration loaded from `~/.config/davkit/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DavkitConfig {
    pub validation: ValidationMode,
    /// Path segments that identify server-issued stable URLs.
    pub stable_markers: Vec<String>,
    /// URL schemes accepted in strict mode.
    pub allowed_schemes: Vec<String>,
    pub default_output: OutputFormat,
}

impl Default for DavkitConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Strict,
            stable_markers: DEFAULT_STABLE_MARKERS.iter().map(|s| s.to_string()).collect(),
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
            default_output: OutputFormat::Text,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("davkit")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DavkitConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<DavkitConfig> {
    if !path.exists() {
        let default_cfg = DavkitConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DavkitConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
