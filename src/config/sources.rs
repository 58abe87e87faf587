//! Settings-file source discovery.
//!
//! Source order: explicit path > local file > global file > built-in defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::SETTINGS_FILE_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    /// Loaded from an explicit `--settings` path.
    Explicit(PathBuf),
    /// Loaded from `./mlssh.toml`.
    Local,
    /// Loaded from the per-user config directory.
    Global(PathBuf),
    /// No file found; defaults were used.
    BuiltInDefaults,
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::Global(path) => write!(f, "{}", path.display()),
            Self::Local => f.write_str(SETTINGS_FILE_NAME),
            Self::BuiltInDefaults => f.write_str("built-in defaults"),
        }
    }
}

/// Per-user settings path under `config_root` (`<root>/mlssh/mlssh.toml`).
pub fn global_settings_path(config_root: &Path) -> PathBuf {
    config_root.join("mlssh").join(SETTINGS_FILE_NAME)
}

/// Read settings text from the highest-precedence available source.
pub(super) fn read_settings_text_with_sources<FRead, FRoot>(
    path_override: Option<&Path>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, SettingsSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    // An explicit path must exist.
    if let Some(path) = path_override {
        let text = read_file(path)?;
        return Ok((text, SettingsSource::Explicit(path.to_path_buf())));
    }

    if let Ok(text) = read_file(Path::new(SETTINGS_FILE_NAME)) {
        return Ok((text, SettingsSource::Local));
    }
    if let Some(root) = config_root() {
        let global = global_settings_path(&root);
        if let Ok(text) = read_file(&global) {
            return Ok((text, SettingsSource::Global(global)));
        }
    }

    Ok((String::new(), SettingsSource::BuiltInDefaults))
}
