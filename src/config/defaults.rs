//! Default configuration constants and templates.

use super::{HostEntry, HostsFile};

/// Embedded settings template written next to the user config on request.
pub const DEFAULT_SETTINGS_TEMPLATE: &str = include_str!("../templates/mlssh.toml");
/// Settings file name, both locally and under the user config root.
pub const SETTINGS_FILE_NAME: &str = "mlssh.toml";
/// Hosts file looked up in the workspace root.
pub const DEFAULT_HOSTS_FILE: &str = "mlssh.json";
/// tmux session that holds mlssh windows.
pub const DEFAULT_TMUX_SESSION: &str = "mlssh";
/// Name of each window mlssh opens.
pub const DEFAULT_TMUX_WINDOW: &str = "mlssh";
/// Gap between consecutive lines sent to one session.
pub const DEFAULT_DELAY_MS: u64 = 300;
/// Command pre-filled when `send` prompts for one.
pub const DEFAULT_COMMAND: &str = "whoami;hostname;uptime;pwd;ls";

/// Example hosts file written by `mlssh init`.
pub fn example_hosts_file() -> HostsFile {
    let password_host = |name: &str| HostEntry {
        name: Some(name.to_string()),
        host: Some(name.to_string()),
        username: Some("ml".to_string()),
        password: Some("pass".to_string()),
        usekey: None,
    };
    HostsFile {
        cols: vec![1, 2],
        hosts: vec![
            password_host("host1"),
            HostEntry {
                name: Some("host2".to_string()),
                host: Some("192.168.1.2".to_string()),
                username: Some("ml".to_string()),
                password: None,
                usekey: Some(true),
            },
            password_host("host3"),
            password_host("host4"),
        ],
    }
}
