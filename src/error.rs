//! Unified error types for layout, launch, and dispatch.

use std::fmt;
use std::path::PathBuf;

use crate::registry::ValidationError;

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors raised by a session host while opening, renaming, or writing to a
/// session.
#[derive(Debug)]
pub enum SessionError {
    /// The host environment itself is not usable (e.g. tmux is not installed).
    Unavailable(String),
    /// A host command ran but failed.
    ExecutionFailed(String),
    /// The addressed session no longer exists.
    Closed(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "session host unavailable: {msg}"),
            Self::ExecutionFailed(msg) => write!(f, "execution failed: {msg}"),
            Self::Closed(handle) => write!(f, "session {handle} is closed"),
        }
    }
}

impl std::error::Error for SessionError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when locating, parsing, validating, or scaffolding configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Toml(toml::de::Error),
    Invalid(String),
    /// One or more host entries failed validation.
    InvalidHosts(Vec<ValidationError>),
    /// Hosts file does not exist.
    NotFound(PathBuf),
    /// Scaffold target already exists.
    AlreadyExists(PathBuf),
    /// Workspace root is missing or not a directory.
    MissingWorkspace(PathBuf),
    /// Hosts file lacks the `cols` or `hosts` key.
    MissingKeys,
    /// Workspace holds no `*.json` hosts file to choose from.
    NoHostsFiles(PathBuf),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Json(_) => write!(f, "failed to parse config file. please check it."),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
            Self::InvalidHosts(errors) => {
                let joined = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "errors in hosts: {joined}")
            }
            Self::NotFound(path) => write!(f, "file not exists: {}", path.display()),
            Self::AlreadyExists(path) => write!(
                f,
                "config file {} already exists, please rename it.",
                path.display()
            ),
            Self::MissingWorkspace(path) => write!(
                f,
                "workspace folder {} does not exist. please select a work folder first.",
                path.display()
            ),
            Self::MissingKeys => write!(f, "no required props in config file: cols, hosts"),
            Self::NoHostsFiles(_) => write!(f, "no config file found"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// MlsshError — top-level
// ---------------------------------------------------------------------------

/// Top-level error type for user-facing commands.
#[derive(Debug)]
pub enum MlsshError {
    Config(ConfigError),
    Session(SessionError),
    /// Interactive prompt I/O failed.
    Prompt(std::io::Error),
}

impl fmt::Display for MlsshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Session(e) => write!(f, "{e}"),
            Self::Prompt(e) => write!(f, "prompt: {e}"),
        }
    }
}

impl std::error::Error for MlsshError {}

impl From<ConfigError> for MlsshError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SessionError> for MlsshError {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MissingField, ValidationError};

    #[test]
    fn session_error_display() {
        assert_eq!(
            SessionError::Closed("%4".into()).to_string(),
            "session %4 is closed"
        );
        assert_eq!(
            SessionError::ExecutionFailed("boom".into()).to_string(),
            "execution failed: boom"
        );
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = ConfigError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("file not found"));
    }

    #[test]
    fn config_error_from_json_hides_parser_details() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let e = ConfigError::from(json_err);
        assert_eq!(e.to_string(), "failed to parse config file. please check it.");
    }

    #[test]
    fn invalid_hosts_joins_every_message() {
        let e = ConfigError::InvalidHosts(vec![
            ValidationError::new("web", MissingField::Address),
            ValidationError::new("?", MissingField::Password),
        ]);
        assert_eq!(
            e.to_string(),
            "errors in hosts: no host for web, no password for ?"
        );
    }

    #[test]
    fn already_exists_mentions_path() {
        let e = ConfigError::AlreadyExists(PathBuf::from("/tmp/mlssh.json"));
        assert_eq!(
            e.to_string(),
            "config file /tmp/mlssh.json already exists, please rename it."
        );
    }

    #[test]
    fn top_level_error_wraps_without_prefix() {
        let e = MlsshError::from(SessionError::Unavailable("tmux not found".into()));
        assert_eq!(e.to_string(), "session host unavailable: tmux not found");
    }
}
