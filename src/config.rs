// Settings resolution. Precedence, lowest to highest: built-in defaults,
// TOML config file, `API_BASE` environment variable, command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
pub const API_BASE_ENV: &str = "API_BASE";
const CONFIG_DIR_NAME: &str = "smartrelief";
const CONFIG_FILE_NAME: &str = "admin.toml";

/// How overlapping refreshes of the same list are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Whichever response completes last is shown, even if it was issued
    /// first.
    #[default]
    LastCompletionWins,
    /// Each refresh gets a sequence number and a completion older than one
    /// already applied is dropped.
    LatestIssuedWins,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub refresh_policy: RefreshPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            refresh_policy: RefreshPolicy::default(),
        }
    }
}

/// Shape of `admin.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub api_base: Option<String>,
    pub discard_stale_refreshes: Option<bool>,
}

/// Values coming from the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub discard_stale_refreshes: bool,
}

/// `<config_dir>/smartrelief/admin.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Read a config file. A missing file yields `None`; a malformed one is an
/// error so a typo does not silently point the client somewhere else.
pub fn read_file_settings(path: &Path) -> Result<Option<FileSettings>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()))
        }
    };
    let parsed = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(Some(parsed))
}

/// Merge the layers. Empty strings are treated as unset.
pub fn resolve(
    file: Option<FileSettings>,
    env_api_base: Option<String>,
    overrides: Overrides,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(file) = file {
        if let Some(v) = file.api_base.filter(|v| !v.trim().is_empty()) {
            settings.api_base = v;
        }
        if file.discard_stale_refreshes == Some(true) {
            settings.refresh_policy = RefreshPolicy::LatestIssuedWins;
        }
    }

    if let Some(v) = env_api_base.filter(|v| !v.trim().is_empty()) {
        settings.api_base = v;
    }

    if let Some(v) = overrides.api_base.filter(|v| !v.trim().is_empty()) {
        settings.api_base = v;
    }
    if overrides.discard_stale_refreshes {
        settings.refresh_policy = RefreshPolicy::LatestIssuedWins;
    }

    settings.api_base = settings.api_base.trim().trim_end_matches('/').to_string();
    settings
}

/// Load settings from the real environment: the given or default config
/// file, then `API_BASE`, then the overrides.
pub fn load_settings(config_path: Option<&Path>, overrides: Overrides) -> Result<Settings> {
    let path = config_path.map(Path::to_path_buf).or_else(default_config_path);
    let file = match path {
        Some(p) => read_file_settings(&p)?,
        None => None,
    };
    Ok(resolve(file, std::env::var(API_BASE_ENV).ok(), overrides))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
