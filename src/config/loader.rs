//! Settings loading pipeline.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

use super::env::apply_env_overrides;
use super::init::config_root_dir;
use super::sources::read_settings_text_with_sources;
use super::{LoadedSettings, Settings};

/// Load settings from disk and environment.
///
/// `path_override` is an explicit settings file (from `--settings`).
pub fn load_settings(path_override: Option<&Path>) -> Result<LoadedSettings, ConfigError> {
    load_settings_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_settings_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&Path>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedSettings, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (text, source) = read_settings_text_with_sources(path_override, &read_file, &config_root)?;
    let mut settings: Settings = toml::from_str(&text)?;
    apply_env_overrides(&mut settings, &env_lookup)?;
    debug!(%source, ?settings, "settings loaded");
    Ok(LoadedSettings { settings, source })
}
