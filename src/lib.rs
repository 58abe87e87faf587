//! mlssh: open a grid of ssh sessions in tmux and broadcast commands to them.
//!
//! A hosts file lists targets and a row layout (`cols`). `connect` opens one
//! tmux pane per target, row by row, and logs each pane in over ssh. `send`
//! types a command, or a script line by line, into every open pane.
//!
//! ```no_run
//! use std::sync::Arc;
//! use mlssh::broadcast::{broadcast, DEFAULT_LINE_DELAY};
//! use mlssh::host::{SessionHost, TmuxSessionHost};
//!
//! # async fn example() -> Result<(), mlssh::error::SessionError> {
//! let host: Arc<dyn SessionHost> = Arc::new(TmuxSessionHost::connect("mlssh", "mlssh").await?);
//! let handles: Vec<_> = host
//!     .list_open_sessions()
//!     .await?
//!     .into_iter()
//!     .map(|session| session.handle)
//!     .collect();
//! broadcast(host, &handles, &["uptime".to_string()], DEFAULT_LINE_DELAY)
//!     .settled()
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod broadcast;
pub mod config;
pub mod error;
pub mod host;
pub mod launch;
pub mod layout;
pub mod naming;
pub mod registry;
pub mod session;
#[cfg(test)]
pub mod testsupport;
pub mod tui;
pub mod types;
pub mod ui;
