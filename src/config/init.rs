//! Config-path helpers and scaffolding.
//!
//! Writes use `create_new` so an existing file is never clobbered, even when
//! another process creates it between the check and the write.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::ConfigError;

use super::defaults::{example_hosts_file, DEFAULT_SETTINGS_TEMPLATE};
use super::sources::global_settings_path;

/// Write the example hosts file to `path`.
///
/// Fails with [`ConfigError::AlreadyExists`] instead of overwriting.
pub fn create_hosts_file(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    write_new_file(path, &example_hosts_json()?)
}

/// Example hosts file as JSON with 4-space indentation.
pub fn example_hosts_json() -> Result<Vec<u8>, ConfigError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    example_hosts_file().serialize(&mut serializer)?;
    Ok(buf)
}

/// Default per-user settings path (`~/.config/mlssh/mlssh.toml`).
pub fn default_global_settings_path() -> Option<PathBuf> {
    config_root_dir().map(|root| global_settings_path(&root))
}

/// Write the commented settings template to `path`, creating parent
/// directories. Fails with [`ConfigError::AlreadyExists`] instead of
/// overwriting.
pub fn create_settings_file(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_new_file(path, DEFAULT_SETTINGS_TEMPLATE.as_bytes())
}

fn write_new_file(path: &Path, contents: &[u8]) -> Result<(), ConfigError> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(contents)?;
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(ConfigError::AlreadyExists(path.to_path_buf()))
        }
        Err(e) => Err(ConfigError::Io(e)),
    }
}

/// Resolve the base config directory from env/home conventions.
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}
