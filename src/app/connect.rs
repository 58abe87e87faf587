//! `mlssh connect`: load hosts, optionally narrow them, lay out and log in.

use std::path::PathBuf;

use tracing::info;

use crate::config::{default_hosts_path, list_hosts_files, load_hosts_file, resolve_workspace};
use crate::error::MlsshError;
use crate::launch::launch;
use crate::layout::plan_rows;
use crate::session::ConnectSession;
use crate::types::Target;
use crate::ui::prompt::{PickOption, Prompter};

use super::AppContext;

#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Explicit hosts file; skips workspace lookup.
    pub config: Option<PathBuf>,
    /// Pick the hosts file from the workspace's `*.json` files.
    pub choose_config: bool,
    /// Pick which hosts to connect.
    pub select: bool,
}

/// Run the connect flow. `Ok(None)` means the user cancelled or there was
/// nothing to connect.
pub async fn run_connect(
    ctx: &AppContext<'_>,
    prompter: &mut dyn Prompter,
    options: &ConnectOptions,
) -> Result<Option<ConnectSession>, MlsshError> {
    let Some(hosts_path) = hosts_file_for(ctx, prompter, options)? else {
        return Ok(None);
    };
    let loaded = load_hosts_file(&hosts_path)?;
    if loaded.targets.is_empty() {
        ctx.renderer
            .warn(&format!("no hosts in {}", loaded.path.display()));
        return Ok(None);
    }

    let targets = if options.select {
        match select_targets(prompter, loaded.targets)? {
            Some(targets) => targets,
            None => return Ok(None),
        }
    } else {
        loaded.targets
    };

    ctx.renderer.activity(&format!(
        "connecting {} host(s) via {}",
        targets.len(),
        ctx.host.summary()
    ));
    let rows = plan_rows(targets, &loaded.schedule);
    let report = launch(ctx.host.as_ref(), rows).await;
    let session = ConnectSession::from_report(loaded.path, loaded.schedule, report);
    info!(
        launched = session.launched().count(),
        failed = session.failures.len(),
        "connect finished"
    );
    render_session(ctx, &session);
    Ok(Some(session))
}

fn hosts_file_for(
    ctx: &AppContext<'_>,
    prompter: &mut dyn Prompter,
    options: &ConnectOptions,
) -> Result<Option<PathBuf>, MlsshError> {
    if let Some(path) = &options.config {
        return Ok(Some(path.clone()));
    }
    let workspace = resolve_workspace(ctx.workspace())?;
    if !options.choose_config {
        return Ok(Some(default_hosts_path(&workspace)));
    }

    let files = list_hosts_files(&workspace)?;
    let labels: Vec<PickOption> = files
        .iter()
        .map(|path| {
            PickOption::new(
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )
        })
        .collect();
    let picked = prompter
        .pick_one("hosts file", &labels)
        .map_err(MlsshError::Prompt)?;
    Ok(picked.and_then(|idx| files.into_iter().nth(idx)))
}

fn select_targets(
    prompter: &mut dyn Prompter,
    targets: Vec<Target>,
) -> Result<Option<Vec<Target>>, MlsshError> {
    let options: Vec<PickOption> = targets
        .iter()
        .map(|target| PickOption::new(&target.name).with_description(target.destination()))
        .collect();
    let Some(picked) = prompter
        .pick_many("hosts to connect", &options)
        .map_err(MlsshError::Prompt)?
    else {
        return Ok(None);
    };
    if picked.is_empty() {
        return Ok(None);
    }
    let chosen = targets
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| picked.contains(idx))
        .map(|(_, target)| target)
        .collect();
    Ok(Some(chosen))
}

fn render_session(ctx: &AppContext<'_>, session: &ConnectSession) {
    ctx.renderer.section("connected");
    for target in session.launched() {
        ctx.renderer.field(&target.name, &target.destination());
    }
    for failure in &session.failures {
        ctx.renderer.warn(&failure.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::host::Placement;
    use crate::testsupport::{HostCall, RecordingHost, RecordingSink, ScriptedPrompter, TestTempDir};
    use crate::types::SessionHandle;
    use std::sync::Arc;

    const HOSTS: &str = r#"{
        "cols": [1],
        "hosts": [
            {"name": "web", "host": "10.0.0.1", "username": "ml", "password": "pw"},
            {"name": "db", "host": "10.0.0.2", "username": "ml", "usekey": true},
            {"name": "cache", "host": "10.0.0.3", "username": "ml", "usekey": true}
        ]
    }"#;

    struct Fixture {
        tmp: TestTempDir,
        host: Arc<RecordingHost>,
        sink: RecordingSink,
        settings: Settings,
    }

    impl Fixture {
        fn new(prefix: &str) -> Self {
            let tmp = TestTempDir::new(prefix);
            tmp.write_text("mlssh.json", HOSTS);
            Self {
                tmp,
                host: Arc::new(RecordingHost::new()),
                sink: RecordingSink::default(),
                settings: Settings::default(),
            }
        }

        fn ctx(&self) -> AppContext<'_> {
            AppContext {
                host: self.host.clone(),
                renderer: &self.sink,
                settings: &self.settings,
                workspace: Some(self.tmp.path().to_path_buf()),
            }
        }
    }

    #[tokio::test]
    async fn connects_every_host_from_default_file() {
        let fx = Fixture::new("connect-all");
        let mut prompter = ScriptedPrompter::default();
        let session = run_connect(&fx.ctx(), &mut prompter, &ConnectOptions::default())
            .await
            .expect("connect")
            .expect("session");

        assert_eq!(session.launched().count(), 3);
        assert_eq!(session.schedule, vec![1]);
        assert_eq!(session.hosts_path, fx.tmp.path().join("mlssh.json"));
        assert!(fx.sink.contains("connected"));
        assert!(fx.sink.contains("ml@10.0.0.2"));
        assert_eq!(
            fx.host
                .calls()
                .iter()
                .filter(|call| matches!(call, HostCall::Open(Placement::Beside)))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn select_connects_only_picked_hosts() {
        let fx = Fixture::new("connect-select");
        let mut prompter = ScriptedPrompter::default().answer_many(vec![0, 2]);
        let session = run_connect(
            &fx.ctx(),
            &mut prompter,
            &ConnectOptions {
                select: true,
                ..ConnectOptions::default()
            },
        )
        .await
        .expect("connect")
        .expect("session");

        let names: Vec<&str> = session.launched().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["web", "cache"]);
        let shown = prompter.shown_options();
        assert_eq!(shown[0].description.as_deref(), Some("ml@10.0.0.1"));
        assert_eq!(
            fx.host.lines_for(&SessionHandle::new("s2"))[0],
            "echo cache".to_string()
        );
    }

    #[tokio::test]
    async fn cancelled_selection_opens_nothing() {
        let fx = Fixture::new("connect-cancel");
        let mut prompter = ScriptedPrompter::default().cancel_pick();
        let result = run_connect(
            &fx.ctx(),
            &mut prompter,
            &ConnectOptions {
                select: true,
                ..ConnectOptions::default()
            },
        )
        .await
        .expect("connect");
        assert!(result.is_none());
        assert!(fx.host.calls().is_empty());
    }

    #[tokio::test]
    async fn choose_config_lists_json_files() {
        let fx = Fixture::new("connect-choose");
        fx.tmp.write_text(
            "alt.json",
            r#"{"cols": [], "hosts": [{"name": "x", "host": "h", "username": "u", "usekey": true}]}"#,
        );
        let mut prompter = ScriptedPrompter::default().answer_one(0);
        let session = run_connect(
            &fx.ctx(),
            &mut prompter,
            &ConnectOptions {
                choose_config: true,
                ..ConnectOptions::default()
            },
        )
        .await
        .expect("connect")
        .expect("session");
        assert_eq!(session.hosts_path, fx.tmp.path().join("alt.json"));
        assert_eq!(session.schedule, vec![3]);
        let labels: Vec<String> = prompter
            .shown_options()
            .iter()
            .map(|o| o.label.clone())
            .collect();
        assert_eq!(labels, vec!["alt.json", "mlssh.json"]);
    }

    #[tokio::test]
    async fn invalid_hosts_abort_before_any_session_opens() {
        let fx = Fixture::new("connect-invalid");
        fx.tmp.write_text(
            "mlssh.json",
            r#"{"cols": [1], "hosts": [{"name": "web", "username": "ml"}]}"#,
        );
        let mut prompter = ScriptedPrompter::default();
        let err = run_connect(&fx.ctx(), &mut prompter, &ConnectOptions::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "errors in hosts: no host for web, no password for web"
        );
        assert!(fx.host.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_hosts_file_is_reported() {
        let fx = Fixture::new("connect-missing");
        let mut prompter = ScriptedPrompter::default();
        let err = run_connect(
            &fx.ctx(),
            &mut prompter,
            &ConnectOptions {
                config: Some(fx.tmp.path().join("nope.json")),
                ..ConnectOptions::default()
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().starts_with("file not exists: "));
    }
}
