//! Paced command broadcast to many sessions.
//!
//! Each session gets its own timer task. Line `i` is sent at
//! `start + delay * i`, measured from the moment [`broadcast`] was called, so
//! a slow send never pushes later lines back.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::host::SessionHost;
use crate::types::SessionHandle;

/// Gap between consecutive lines sent to the same session.
pub const DEFAULT_LINE_DELAY: Duration = Duration::from_millis(300);

/// Split a script into sendable lines.
///
/// Windows line endings are tolerated and blank lines are skipped.
pub fn script_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// In-flight broadcast. Dropping it leaves the timers running.
#[derive(Debug)]
pub struct DispatchJob {
    tasks: Vec<JoinHandle<()>>,
    scheduled: usize,
}

impl DispatchJob {
    /// Number of sends scheduled across all sessions.
    pub fn scheduled(&self) -> usize {
        self.scheduled
    }

    /// Wait until every scheduled send has fired or been dropped.
    pub async fn settled(self) {
        for task in self.tasks {
            if let Err(err) = task.await {
                debug!(%err, "broadcast task ended abnormally");
            }
        }
    }
}

/// Schedule every line onto every session.
///
/// Must be called from within a tokio runtime. Sessions run independently;
/// within one session lines arrive in order.
pub fn broadcast(
    host: Arc<dyn SessionHost>,
    sessions: &[SessionHandle],
    lines: &[String],
    delay: Duration,
) -> DispatchJob {
    if sessions.is_empty() || lines.is_empty() {
        return DispatchJob {
            tasks: Vec::new(),
            scheduled: 0,
        };
    }

    let start = Instant::now();
    let lines: Arc<[String]> = lines.into();
    let tasks = sessions
        .iter()
        .cloned()
        .map(|session| {
            let host = Arc::clone(&host);
            let lines = Arc::clone(&lines);
            tokio::spawn(async move {
                for (idx, line) in lines.iter().enumerate() {
                    sleep_until(start + delay * idx as u32).await;
                    match host.send_line(&session, line).await {
                        Ok(()) => {}
                        Err(SessionError::Closed(_)) => {
                            debug!(%session, "session closed; dropping remaining lines");
                            return;
                        }
                        Err(err) => {
                            warn!(%session, %err, line = idx, "send failed; line dropped")
                        }
                    }
                }
            })
        })
        .collect();

    DispatchJob {
        tasks,
        scheduled: sessions.len() * lines.len(),
    }
}
