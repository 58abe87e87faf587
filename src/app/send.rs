//! `mlssh send`: broadcast a command or a script to open sessions.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::broadcast::{broadcast, script_lines};
use crate::error::{ConfigError, MlsshError};
use crate::types::{OpenSession, SessionHandle};
use crate::ui::prompt::{PickOption, Prompter};

use super::AppContext;

/// Where the lines to send come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    /// One command; prompted (pre-filled with the default) when `None`.
    Command(Option<String>),
    /// Script file, one command per line; path prompted when `None`.
    File(Option<PathBuf>),
}

impl Default for ScriptSource {
    fn default() -> Self {
        Self::Command(None)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub source: ScriptSource,
    /// Pick which open sessions receive the lines.
    pub select: bool,
}

/// What one send flow dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    pub sessions: Vec<String>,
    pub lines: usize,
}

/// Run the send flow and wait until every scheduled line has been sent.
/// `Ok(None)` means the user cancelled or there was nothing to send.
pub async fn run_send(
    ctx: &AppContext<'_>,
    prompter: &mut dyn Prompter,
    options: &SendOptions,
) -> Result<Option<DispatchSummary>, MlsshError> {
    let open = ctx.host.list_open_sessions().await?;
    if open.is_empty() {
        ctx.renderer.warn("no terminal open");
        return Ok(None);
    }

    let sessions = if options.select {
        match select_sessions(prompter, open)? {
            Some(sessions) => sessions,
            None => return Ok(None),
        }
    } else {
        open
    };

    let lines = match &options.source {
        ScriptSource::Command(command) => {
            let command = match command {
                Some(command) => Some(command.clone()),
                None => prompter
                    .input(
                        "command to run",
                        Some(ctx.settings.dispatch.default_command.as_str()),
                    )
                    .map_err(MlsshError::Prompt)?,
            };
            command
                .filter(|command| !command.trim().is_empty())
                .into_iter()
                .collect::<Vec<_>>()
        }
        ScriptSource::File(path) => {
            let path = match path {
                Some(path) => Some(path.clone()),
                None => prompter
                    .input("script file", None)
                    .map_err(MlsshError::Prompt)?
                    .map(PathBuf::from),
            };
            match path {
                Some(path) => script_lines(&read_script(&path)?),
                None => Vec::new(),
            }
        }
    };
    if lines.is_empty() {
        return Ok(None);
    }

    let handles: Vec<SessionHandle> = sessions.iter().map(|s| s.handle.clone()).collect();
    let job = broadcast(
        ctx.host.clone(),
        &handles,
        &lines,
        ctx.settings.dispatch.delay(),
    );
    ctx.renderer.activity(&format!(
        "sending {} line(s) to {} session(s)",
        lines.len(),
        handles.len()
    ));
    info!(scheduled = job.scheduled(), "dispatch scheduled");
    job.settled().await;

    Ok(Some(DispatchSummary {
        sessions: sessions.into_iter().map(|s| s.name).collect(),
        lines: lines.len(),
    }))
}

fn select_sessions(
    prompter: &mut dyn Prompter,
    open: Vec<OpenSession>,
) -> Result<Option<Vec<OpenSession>>, MlsshError> {
    let options: Vec<PickOption> = open
        .iter()
        .map(|session| PickOption::new(&session.name))
        .collect();
    let Some(picked) = prompter
        .pick_many("sessions", &options)
        .map_err(MlsshError::Prompt)?
    else {
        return Ok(None);
    };
    if picked.is_empty() {
        return Ok(None);
    }
    Ok(Some(
        open.into_iter()
            .enumerate()
            .filter(|(idx, _)| picked.contains(idx))
            .map(|(_, session)| session)
            .collect(),
    ))
}

fn read_script(path: &Path) -> Result<String, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}
