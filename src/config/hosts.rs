//! Hosts file loading and workspace discovery.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::layout::DEFAULT_SCHEDULE;
use crate::registry::targets_from_entries;

use super::defaults::DEFAULT_HOSTS_FILE;
use super::{HostEntry, LoadedHosts};

/// Resolve the workspace root: `explicit` or the current directory.
///
/// The result must be an existing directory.
pub fn resolve_workspace(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let root = match explicit {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(ConfigError::MissingWorkspace(root));
    }
    Ok(root)
}

/// Default hosts file inside `workspace`.
pub fn default_hosts_path(workspace: &Path) -> PathBuf {
    workspace.join(DEFAULT_HOSTS_FILE)
}

/// `*.json` files directly inside `workspace`, sorted by file name.
pub fn list_hosts_files(workspace: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(workspace)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(ConfigError::NoHostsFiles(workspace.to_path_buf()));
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read, parse, and validate a hosts file.
pub fn load_hosts_file(path: &Path) -> Result<LoadedHosts, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    let loaded = parse_hosts_text(&text, path)?;
    debug!(
        path = %path.display(),
        targets = loaded.targets.len(),
        schedule = ?loaded.schedule,
        "hosts file loaded"
    );
    Ok(loaded)
}

/// Parse hosts-file JSON. `path` is only recorded on the result.
pub fn parse_hosts_text(text: &str, path: &Path) -> Result<LoadedHosts, ConfigError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(mut object) = value else {
        return Err(ConfigError::MissingKeys);
    };
    let (Some(cols), Some(hosts)) = (object.remove("cols"), object.remove("hosts")) else {
        return Err(ConfigError::MissingKeys);
    };

    let mut schedule: Vec<i64> = match cols {
        Value::Null => Vec::new(),
        other => serde_json::from_value(other)?,
    };
    if schedule.is_empty() {
        schedule = DEFAULT_SCHEDULE.to_vec();
    }
    for (row, cols) in schedule.iter().enumerate() {
        if *cols <= 0 {
            warn!(row, cols, "non-positive column count; row will be empty");
        }
    }

    let entries: Vec<HostEntry> = serde_json::from_value(hosts)?;
    let targets = targets_from_entries(&entries).map_err(ConfigError::InvalidHosts)?;

    Ok(LoadedHosts {
        path: path.to_path_buf(),
        schedule,
        targets,
    })
}
