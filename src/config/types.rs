//! Configuration data model.
//!
//! Hosts files are JSON and describe what to connect to. Settings are TOML
//! and tune how mlssh drives tmux and paces commands.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::types::Target;

use super::defaults::{
    DEFAULT_COMMAND, DEFAULT_DELAY_MS, DEFAULT_TMUX_SESSION, DEFAULT_TMUX_WINDOW,
};
use super::sources::SettingsSource;

// ---------------------------------------------------------------------------
// Hosts file
// ---------------------------------------------------------------------------

/// One raw `hosts[]` entry. Every field is optional so validation can report
/// all missing fields at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Hostname or IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// `true` selects key auth; anything else means password auth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usekey: Option<bool>,
}

impl HostEntry {
    pub fn uses_key(&self) -> bool {
        self.usekey == Some(true)
    }
}

/// On-disk hosts file shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostsFile {
    /// Column count per row.
    pub cols: Vec<i64>,
    pub hosts: Vec<HostEntry>,
}

/// A hosts file that parsed and validated.
#[derive(Debug, Clone)]
pub struct LoadedHosts {
    pub path: PathBuf,
    /// Layout schedule, `[3]` when the file left it empty.
    pub schedule: Vec<i64>,
    pub targets: Vec<Target>,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Resolved tool settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub tmux: TmuxSettings,
    pub dispatch: DispatchSettings,
    pub display: DisplaySettings,
}

/// `[tmux]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TmuxSettings {
    pub session: String,
    pub window: String,
}

impl Default for TmuxSettings {
    fn default() -> Self {
        Self {
            session: DEFAULT_TMUX_SESSION.to_string(),
            window: DEFAULT_TMUX_WINDOW.to_string(),
        }
    }
}

/// `[dispatch]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchSettings {
    /// Gap between consecutive lines sent to one session.
    pub delay_ms: u64,
    /// Pre-filled command for `send`.
    pub default_command: String,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            default_command: DEFAULT_COMMAND.to_string(),
        }
    }
}

impl DispatchSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySettings {
    pub color: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Settings plus the file they came from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub source: SettingsSource,
}
