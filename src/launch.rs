//! Session launcher: opens one session per target row by row, names it, and
//! types the login command.
//!
//! Launching is best-effort. A target whose session fails to open, rename, or
//! receive its login line is recorded in [`LaunchReport::failures`] and the
//! remaining targets carry on.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::host::process::{shell_quote, shell_word};
use crate::host::{Placement, SessionHost};
use crate::layout::Row;
use crate::naming::allocate;
use crate::types::{AuthMode, Target};

/// ssh flags that skip host-key prompts and keep stderr quiet.
pub const SSH_HARDENED_OPTS: &str =
    "-o StrictHostKeyChecking=no -o UserKnownHostsFile=/dev/null -o LogLevel=ERROR";

/// Launch phase in which a target failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStage {
    Open,
    Rename,
    Login,
}

impl fmt::Display for LaunchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Rename => "rename",
            Self::Login => "login",
        })
    }
}

/// One per-target launch error.
#[derive(Debug)]
pub struct LaunchFailure {
    /// Target name at the time of failure.
    pub target: String,
    pub stage: LaunchStage,
    pub error: SessionError,
}

impl fmt::Display for LaunchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.target, self.stage, self.error)
    }
}

/// Outcome of one launch run.
#[derive(Debug, Default)]
pub struct LaunchReport {
    /// Every target in row order. Launched ones carry a session handle and
    /// their allocated name.
    pub targets: Vec<Target>,
    pub failures: Vec<LaunchFailure>,
}

impl LaunchReport {
    /// Targets that ended up with a session.
    pub fn launched(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|target| target.session.is_some())
    }

    pub fn launched_count(&self) -> usize {
        self.launched().count()
    }
}

/// Login line typed into a target's session.
pub fn login_command(target: &Target) -> String {
    let destination = shell_word(&target.destination());
    match &target.auth {
        AuthMode::Key => format!("ssh {SSH_HARDENED_OPTS} {destination}"),
        AuthMode::Password(password) => format!(
            "sshpass -p {} ssh {SSH_HARDENED_OPTS} {destination}",
            shell_quote(password)
        ),
    }
}

/// Line echoed before the login so each pane shows which target it is.
pub fn banner_command(target: &Target) -> String {
    format!("echo {}", shell_word(&target.name))
}

/// Open, name, and log in one session per target.
///
/// Empty rows are skipped. Host calls are issued one at a time because pane
/// placement depends on call order.
pub async fn launch(host: &dyn SessionHost, rows: Vec<Row<Target>>) -> LaunchReport {
    let rows: Vec<Vec<Target>> = rows
        .into_iter()
        .filter(|row| !row.is_empty())
        .map(Row::into_items)
        .collect();
    let mut report = LaunchReport::default();
    if rows.is_empty() {
        return report;
    }

    let mut taken = match host.list_open_session_names().await {
        Ok(names) => names,
        Err(err) => {
            warn!(%err, "could not list open sessions; assuming none");
            BTreeSet::new()
        }
    };

    for _ in 1..rows.len() {
        if let Err(err) = host.split_group().await {
            warn!(%err, "failed to split group");
        }
    }
    if let Err(err) = host.focus_first_group().await {
        warn!(%err, "failed to focus first group");
    }

    for (row_idx, row) in rows.into_iter().enumerate() {
        debug!(row = row_idx, targets = row.len(), "opening row");
        for (col_idx, mut target) in row.into_iter().enumerate() {
            let placement = if col_idx == 0 {
                Placement::NewGroup
            } else {
                Placement::Beside
            };
            match host.open_session(placement).await {
                Ok(handle) => {
                    target.name = allocate(&target.name, &mut taken);
                    if let Err(error) = host.rename_session(&handle, &target.name).await {
                        warn!(target = %target.name, %error, "failed to rename session");
                        report.failures.push(LaunchFailure {
                            target: target.name.clone(),
                            stage: LaunchStage::Rename,
                            error,
                        });
                    }
                    target.session = Some(handle);
                }
                Err(error) => {
                    warn!(target = %target.name, %error, "failed to open session");
                    report.failures.push(LaunchFailure {
                        target: target.name.clone(),
                        stage: LaunchStage::Open,
                        error,
                    });
                }
            }
            report.targets.push(target);
        }
        if let Err(err) = host.focus_next_group_below().await {
            warn!(%err, "failed to focus next group");
        }
    }

    for target in &report.targets {
        let Some(handle) = &target.session else {
            continue;
        };
        let sent = match host.send_line(handle, &banner_command(target)).await {
            Ok(()) => host.send_line(handle, &login_command(target)).await,
            Err(err) => Err(err),
        };
        match sent {
            Ok(()) => info!(target = %target.name, session = %handle, "login sent"),
            Err(error) => {
                warn!(target = %target.name, %error, "failed to send login");
                report.failures.push(LaunchFailure {
                    target: target.name.clone(),
                    stage: LaunchStage::Login,
                    error,
                });
            }
        }
    }

    report
}
