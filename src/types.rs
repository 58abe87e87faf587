//! Core data model shared by the layout, launch, and dispatch engine.

use std::fmt;

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// How a target authenticates when the login line is typed.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Password handed to `sshpass -p`.
    Password(String),
    /// Key-based login; plain `ssh`.
    Key,
}

impl fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password(_) => f.write_str("Password(***)"),
            Self::Key => f.write_str("Key"),
        }
    }
}

/// One configured remote host that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Display name. Rewritten by the name allocator on collisions.
    pub name: String,
    /// Hostname or IP address handed to `ssh`.
    pub address: String,
    pub username: String,
    pub auth: AuthMode,
    /// Live session assigned by the launcher; `None` before launch.
    pub session: Option<SessionHandle>,
}

impl Target {
    /// `username@address`, as shown in pickers and passed to `ssh`.
    pub fn destination(&self) -> String {
        format!("{}@{}", self.username, self.address)
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Opaque reference to a live session owned by a session host.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionHandle(String);

impl SessionHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Host-specific identifier (a tmux pane id such as `%3`).
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A session currently open in the host, with its allocated display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSession {
    pub handle: SessionHandle,
    pub name: String,
}
