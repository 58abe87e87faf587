//! tmux-backed session host.
//!
//! Every connect run opens a fresh window in the configured tmux session. Each
//! group is a full-width row of panes in that window; each session is one pane
//! running the user's shell. Display names live in the `@mlssh_name` pane
//! option (the pane title is set too, but shells are free to overwrite it).

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::process::{ensure_success, run_sh_process, shell_quote, ExecOutput};
use super::{Placement, SessionHost};
use crate::error::SessionError;
use crate::types::{OpenSession, SessionHandle};

/// Pane option holding the allocated display name.
pub(crate) const TMUX_NAME_OPTION: &str = "@mlssh_name";
/// Size given to a freshly created detached session so row splits have room.
const DETACHED_WIDTH: u16 = 240;
const DETACHED_HEIGHT: u16 = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Group {
    /// First pane of the row.
    anchor: String,
    /// Panes handed out as sessions, left to right.
    panes: Vec<String>,
}

#[derive(Debug, Default)]
struct GridState {
    window_id: Option<String>,
    groups: Vec<Group>,
    active: usize,
}

/// Session host that lays sessions out as tmux panes.
pub struct TmuxSessionHost {
    session: String,
    window: String,
    grid: Mutex<GridState>,
}

impl TmuxSessionHost {
    /// Build a host without probing for tmux.
    pub fn new(session: impl Into<String>, window: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            window: window.into(),
            grid: Mutex::new(GridState::default()),
        }
    }

    /// Build a host after checking that `tmux` is installed.
    pub async fn connect(
        session: impl Into<String>,
        window: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let session = session.into();
        if session.trim().is_empty() {
            return Err(SessionError::Unavailable(
                "tmux session name cannot be empty".into(),
            ));
        }
        let probe = run_sh_process("command -v tmux >/dev/null 2>&1").await?;
        if probe.exit_code != 0 {
            return Err(SessionError::Unavailable(
                "tmux is not installed on this machine".into(),
            ));
        }
        Ok(Self::new(session, window))
    }

    /// Command the operator runs to see the panes.
    pub fn attach_hint(&self) -> String {
        format!("tmux attach -t {}", shell_quote(&self.session))
    }

    async fn ensure_window(&self, grid: &mut GridState) -> Result<String, SessionError> {
        if let Some(window_id) = &grid.window_id {
            return Ok(window_id.clone());
        }
        let script = open_window_script(&self.session, &self.window);
        let output = run_sh_process(&script).await?;
        let output = ensure_success(output, "failed to open tmux window")?;
        let (window_id, pane_id) = parse_window_output(&output.stdout).ok_or_else(|| {
            SessionError::ExecutionFailed("failed to parse tmux window/pane ids".into())
        })?;
        debug!(session = %self.session, window = %window_id, pane = %pane_id, "opened tmux window");
        grid.window_id = Some(window_id.clone());
        grid.groups = vec![Group {
            anchor: pane_id,
            panes: Vec::new(),
        }];
        grid.active = 0;
        Ok(window_id)
    }

    async fn push_group(&self, grid: &mut GridState) -> Result<usize, SessionError> {
        let window_id = self.ensure_window(grid).await?;
        let pane_id = split_pane(&build_split_row_command(&window_id)).await?;
        even_out(&pane_id).await;
        grid.groups.push(Group {
            anchor: pane_id,
            panes: Vec::new(),
        });
        Ok(grid.groups.len() - 1)
    }
}

#[async_trait]
impl SessionHost for TmuxSessionHost {
    fn summary(&self) -> String {
        format!("tmux session {} (window {})", self.session, self.window)
    }

    async fn open_session(&self, placement: Placement) -> Result<SessionHandle, SessionError> {
        let mut grid = self.grid.lock().await;
        self.ensure_window(&mut grid).await?;

        let active = grid.active;
        let pane_id = match (placement, grid.groups[active].panes.last().cloned()) {
            // The active row is still empty: its anchor pane becomes the session.
            (_, None) => grid.groups[active].anchor.clone(),
            (Placement::NewGroup, Some(_)) => {
                let idx = self.push_group(&mut grid).await?;
                grid.active = idx;
                grid.groups[idx].anchor.clone()
            }
            (Placement::Beside, Some(last)) => {
                let pane_id = split_pane(&build_split_beside_command(&last)).await?;
                even_out(&pane_id).await;
                pane_id
            }
        };

        let active = grid.active;
        grid.groups[active].panes.push(pane_id.clone());
        Ok(SessionHandle::new(pane_id))
    }

    async fn rename_session(&self, handle: &SessionHandle, name: &str) -> Result<(), SessionError> {
        let output = run_sh_process(&build_rename_command(handle.id(), name)).await?;
        check_pane_output(output, handle, "failed to rename tmux pane")
    }

    async fn send_line(&self, handle: &SessionHandle, text: &str) -> Result<(), SessionError> {
        let output = run_sh_process(&build_send_literal_command(handle.id(), text)).await?;
        check_pane_output(output, handle, "failed to send keys to tmux pane")?;
        let output = run_sh_process(&build_send_enter_command(handle.id())).await?;
        check_pane_output(output, handle, "failed to send Enter to tmux pane")
    }

    async fn list_open_sessions(&self) -> Result<Vec<OpenSession>, SessionError> {
        let output = run_sh_process(&build_list_sessions_script(&self.session)).await?;
        let output = ensure_success(output, "failed to list tmux panes")?;
        Ok(parse_open_sessions(&output.stdout))
    }

    async fn split_group(&self) -> Result<(), SessionError> {
        let mut grid = self.grid.lock().await;
        self.push_group(&mut grid).await.map(|_| ())
    }

    async fn focus_first_group(&self) -> Result<(), SessionError> {
        self.grid.lock().await.active = 0;
        Ok(())
    }

    async fn focus_next_group_below(&self) -> Result<(), SessionError> {
        let mut grid = self.grid.lock().await;
        if grid.active + 1 < grid.groups.len() {
            grid.active += 1;
        }
        Ok(())
    }
}

async fn split_pane(command: &str) -> Result<String, SessionError> {
    let output = run_sh_process(command).await?;
    let output = ensure_success(output, "failed to split tmux pane")?;
    let pane_id = output.stdout.trim();
    if pane_id.is_empty() {
        return Err(SessionError::ExecutionFailed(
            "tmux split-window returned no pane id".into(),
        ));
    }
    Ok(pane_id.to_string())
}

/// Spread the new pane and its siblings evenly. Cosmetic only.
async fn even_out(pane_id: &str) {
    let command = format!("tmux select-layout -E -t {}", shell_quote(pane_id));
    match run_sh_process(&command).await {
        Ok(output) if output.exit_code == 0 => {}
        Ok(output) => {
            debug!(pane = pane_id, stderr = %output.stderr.trim(), "select-layout -E failed")
        }
        Err(err) => debug!(pane = pane_id, %err, "select-layout -E failed"),
    }
}

/// Map tmux's "can't find pane" failure to [`SessionError::Closed`].
fn check_pane_output(
    output: ExecOutput,
    handle: &SessionHandle,
    context: &str,
) -> Result<(), SessionError> {
    if output.exit_code != 0 && is_missing_pane_error(&output.stderr) {
        warn!(pane = %handle, "tmux pane is gone");
        return Err(SessionError::Closed(handle.to_string()));
    }
    ensure_success(output, context).map(|_| ())
}

pub(crate) fn is_missing_pane_error(stderr: &str) -> bool {
    let text = stderr.to_ascii_lowercase();
    text.contains("can't find pane") || text.contains("no such pane")
}

/// Script that opens a new window (creating the session if needed) and prints
/// `<window_id> <pane_id>`.
pub(crate) fn open_window_script(session: &str, window: &str) -> String {
    let session_q = shell_quote(session);
    let window_q = shell_quote(window);
    format!(
        "set -e\n\
SESSION={session_q}\n\
WINDOW={window_q}\n\
if tmux has-session -t \"=$SESSION\" 2>/dev/null; then\n\
  tmux new-window -d -t \"$SESSION:\" -n \"$WINDOW\" -P -F '#{{window_id}} #{{pane_id}}'\n\
else\n\
  tmux new-session -d -s \"$SESSION\" -n \"$WINDOW\" -x {DETACHED_WIDTH} -y {DETACHED_HEIGHT} -P -F '#{{window_id}} #{{pane_id}}'\n\
fi\n"
    )
}

/// Parse `<window_id> <pane_id>` printed by [`open_window_script`].
pub(crate) fn parse_window_output(output: &str) -> Option<(String, String)> {
    let line = output.lines().map(str::trim).find(|line| !line.is_empty())?;
    let (window_id, pane_id) = line.split_once(' ')?;
    let (window_id, pane_id) = (window_id.trim(), pane_id.trim());
    if !window_id.starts_with('@') || !pane_id.starts_with('%') {
        return None;
    }
    Some((window_id.to_string(), pane_id.to_string()))
}

/// Full-width split at the bottom of the window: a new row.
pub(crate) fn build_split_row_command(window_id: &str) -> String {
    format!(
        "tmux split-window -d -v -f -t {} -P -F '#{{pane_id}}'",
        shell_quote(window_id)
    )
}

/// Horizontal split to the right of `pane_id`: a new column in the row.
pub(crate) fn build_split_beside_command(pane_id: &str) -> String {
    format!(
        "tmux split-window -d -h -t {} -P -F '#{{pane_id}}'",
        shell_quote(pane_id)
    )
}

pub(crate) fn build_rename_command(pane_id: &str, name: &str) -> String {
    let pane_q = shell_quote(pane_id);
    let name_q = shell_quote(&escape_trailing_separator(name));
    format!(
        "tmux set-option -p -t {pane_q} {TMUX_NAME_OPTION} {name_q} && tmux select-pane -t {pane_q} -T {name_q}"
    )
}

/// Build literal tmux send-keys shell command.
///
/// `--` keeps text starting with `-` from being read as a flag.
pub(crate) fn build_send_literal_command(pane_id: &str, text: &str) -> String {
    format!(
        "tmux send-keys -l -t {} -- {}",
        shell_quote(pane_id),
        shell_quote(&escape_trailing_separator(text))
    )
}

/// tmux reads an argument ending in `;` as a command separator and turns a
/// trailing `\;` into `;`. One extra backslash makes the text arrive as is.
fn escape_trailing_separator(text: &str) -> String {
    match text.strip_suffix(';') {
        Some(head) => format!("{head}\\;"),
        None => text.to_string(),
    }
}

/// Build tmux Enter key command.
pub(crate) fn build_send_enter_command(pane_id: &str) -> String {
    format!("tmux send-keys -t {} Enter", shell_quote(pane_id))
}

/// Script listing `<pane_id> <name>` for every pane in `session`; prints
/// nothing when the session does not exist.
pub(crate) fn build_list_sessions_script(session: &str) -> String {
    let session_q = shell_quote(session);
    format!(
        "SESSION={session_q}\n\
tmux has-session -t \"=$SESSION\" 2>/dev/null || exit 0\n\
tmux list-panes -s -t \"=$SESSION\" -F '#{{pane_id}} #{{{TMUX_NAME_OPTION}}}'\n"
    )
}

/// Parse `<pane_id> <name>` rows, skipping panes without a name.
pub(crate) fn parse_open_sessions(output: &str) -> Vec<OpenSession> {
    output
        .lines()
        .filter_map(|line| {
            let (pane_id, name) = line.split_once(' ')?;
            let (pane_id, name) = (pane_id.trim(), name.trim());
            if pane_id.is_empty() || name.is_empty() {
                return None;
            }
            Some(OpenSession {
                handle: SessionHandle::new(pane_id),
                name: name.to_string(),
            })
        })
        .collect()
}
