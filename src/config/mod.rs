//! Configuration: hosts files and tool settings.
//!
//! Hosts files (`mlssh.json`) live in the workspace root and list the targets
//! plus the column schedule. Settings are loaded in this order of precedence
//! (highest wins):
//! 1. CLI flags (applied by the caller)
//! 2. Environment variables (`MLSSH_TMUX_SESSION`, `MLSSH_DELAY_MS`, `NO_COLOR`)
//! 3. TOML file given via `--settings`
//! 4. `./mlssh.toml` in the current directory
//! 5. `$XDG_CONFIG_HOME/mlssh/mlssh.toml` (or `~/.config/mlssh/mlssh.toml`)
//! 6. Built-in defaults

mod defaults;
mod env;
mod hosts;
mod init;
mod loader;
mod sources;
mod types;

pub use defaults::{
    example_hosts_file, DEFAULT_COMMAND, DEFAULT_DELAY_MS, DEFAULT_HOSTS_FILE,
    DEFAULT_TMUX_SESSION, DEFAULT_TMUX_WINDOW,
};
pub use env::{ENV_DELAY_MS, ENV_NO_COLOR, ENV_TMUX_SESSION};
pub use hosts::{
    default_hosts_path, list_hosts_files, load_hosts_file, parse_hosts_text, resolve_workspace,
};
pub use init::{
    config_root_dir, create_hosts_file, create_settings_file, default_global_settings_path,
    example_hosts_json,
};
pub use loader::load_settings;
pub use sources::{global_settings_path, SettingsSource};
pub use types::{
    DispatchSettings, DisplaySettings, HostEntry, HostsFile, LoadedHosts, LoadedSettings,
    Settings, TmuxSettings,
};
