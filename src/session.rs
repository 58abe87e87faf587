//! Record of one connect run.

use std::path::PathBuf;

use crate::launch::{LaunchFailure, LaunchReport};
use crate::types::Target;

/// What a connect flow opened, and from which hosts file.
#[derive(Debug)]
pub struct ConnectSession {
    pub hosts_path: PathBuf,
    /// Layout schedule the rows were planned with.
    pub schedule: Vec<i64>,
    /// Every requested target in row order; launched ones carry a handle.
    pub targets: Vec<Target>,
    pub failures: Vec<LaunchFailure>,
}

impl ConnectSession {
    pub fn from_report(hosts_path: PathBuf, schedule: Vec<i64>, report: LaunchReport) -> Self {
        Self {
            hosts_path,
            schedule,
            targets: report.targets,
            failures: report.failures,
        }
    }

    /// Targets that ended up with a session.
    pub fn launched(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|target| target.session.is_some())
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
