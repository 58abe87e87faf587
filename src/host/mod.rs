//! Session host contract.
//!
//! The engine never touches terminal or multiplexer state directly. Every
//! pane creation, rename, and keystroke goes through a [`SessionHost`], so the
//! layout and dispatch logic can run against tmux in production and against
//! an in-memory recorder in tests.

pub mod process;
pub mod tmux;

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::error::SessionError;
use crate::types::{OpenSession, SessionHandle};

pub use tmux::TmuxSessionHost;

/// Where a newly opened session is placed relative to the active group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// First session of a row: fills the active group.
    NewGroup,
    /// Later sessions of a row: opened to the right of the previous one.
    Beside,
}

/// Host environment that owns live sessions and their on-screen placement.
///
/// Placement calls are order-sensitive; callers issue them sequentially.
#[async_trait]
pub trait SessionHost: Send + Sync {
    /// Human-readable host summary for status output.
    fn summary(&self) -> String;
    /// Open one new session.
    async fn open_session(&self, placement: Placement) -> Result<SessionHandle, SessionError>;
    /// Set the display name of a session.
    async fn rename_session(&self, handle: &SessionHandle, name: &str) -> Result<(), SessionError>;
    /// Type one line into a session and press Enter.
    async fn send_line(&self, handle: &SessionHandle, text: &str) -> Result<(), SessionError>;
    /// Sessions currently open in this host, in host order.
    async fn list_open_sessions(&self) -> Result<Vec<OpenSession>, SessionError>;
    /// Display names of every open session.
    async fn list_open_session_names(&self) -> Result<BTreeSet<String>, SessionError> {
        Ok(self
            .list_open_sessions()
            .await?
            .into_iter()
            .map(|session| session.name)
            .collect())
    }
    /// Add one empty group below the existing ones.
    async fn split_group(&self) -> Result<(), SessionError>;
    /// Make the top group active.
    async fn focus_first_group(&self) -> Result<(), SessionError>;
    /// Move the active group one step down; no-op at the bottom.
    async fn focus_next_group_below(&self) -> Result<(), SessionError>;
}
