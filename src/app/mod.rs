//! User-facing command flows.
//!
//! Each flow takes its collaborators explicitly: the session host, the
//! renderer, a prompter, and resolved settings. `main.rs` only wires them up.

pub mod connect;
pub mod init_flow;
pub mod send;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Settings;
use crate::host::SessionHost;
use crate::ui::render::RenderSink;

pub use connect::{run_connect, ConnectOptions};
pub use init_flow::{run_init, InitOptions};
pub use send::{run_send, DispatchSummary, ScriptSource, SendOptions};

/// Shared collaborators for one command invocation.
pub struct AppContext<'a> {
    pub host: Arc<dyn SessionHost>,
    pub renderer: &'a dyn RenderSink,
    pub settings: &'a Settings,
    /// Workspace root from `--workspace`; the current directory otherwise.
    pub workspace: Option<PathBuf>,
}

impl AppContext<'_> {
    pub fn workspace(&self) -> Option<&Path> {
        self.workspace.as_deref()
    }
}
