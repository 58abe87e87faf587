//! Shared test fixtures for unit test modules.
//!
//! Temp dirs, an in-memory session host that records every call, a recording
//! render sink, and a prompter that replays scripted answers.

use async_trait::async_trait;
use std::collections::{BTreeSet, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::Instant;

use crate::error::SessionError;
use crate::host::{Placement, SessionHost};
use crate::types::{AuthMode, OpenSession, SessionHandle, Target};
use crate::ui::prompt::{PickOption, Prompter};
use crate::ui::render::RenderSink;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "mlssh-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Build a not-yet-launched target.
pub fn target(name: &str, address: &str, username: &str, auth: AuthMode) -> Target {
    Target {
        name: name.to_string(),
        address: address.to_string(),
        username: username.to_string(),
        auth,
        session: None,
    }
}

// ---------------------------------------------------------------------------
// Recording session host
// ---------------------------------------------------------------------------

/// One call observed by [`RecordingHost`]. Handles are recorded by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    ListSessions,
    ListNames,
    SplitGroup,
    FocusFirst,
    FocusBelow,
    Open(Placement),
    Rename(String, String),
    Send(String, String),
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<HostCall>,
    open: Vec<OpenSession>,
    opened: usize,
    open_attempts: usize,
    fail_open_at: Option<usize>,
    closed: BTreeSet<SessionHandle>,
    sent: Vec<(SessionHandle, String, Instant)>,
    send_latency: Option<Duration>,
}

/// In-memory session host. Opened sessions get handles `s1`, `s2`, ...
#[derive(Debug, Default)]
pub struct RecordingHost {
    state: Mutex<RecordingState>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that already shows sessions with these names.
    pub fn with_open_names(names: &[&str]) -> Self {
        let host = Self::new();
        host.lock().open = names
            .iter()
            .enumerate()
            .map(|(idx, name)| OpenSession {
                handle: SessionHandle::new(format!("pre{idx}")),
                name: name.to_string(),
            })
            .collect();
        host
    }

    /// Host that already shows sessions `(id, name)`.
    pub fn with_open_sessions(sessions: &[(&str, &str)]) -> Self {
        let host = Self::new();
        host.lock().open = sessions
            .iter()
            .map(|(id, name)| OpenSession {
                handle: SessionHandle::new(*id),
                name: name.to_string(),
            })
            .collect();
        host
    }

    /// Make the `nth` (1-based) `open_session` call fail.
    pub fn fail_open_at(&self, nth: usize) {
        self.lock().fail_open_at = Some(nth);
    }

    /// Treat `handle` as closed: sends to it fail with `Closed`.
    pub fn close(&self, handle: &SessionHandle) {
        self.lock().closed.insert(handle.clone());
    }

    /// Delay every successful send by `latency`.
    pub fn set_send_latency(&self, latency: Duration) {
        self.lock().send_latency = Some(latency);
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().calls.clone()
    }

    /// Lines delivered to `handle`, in order.
    pub fn lines_for(&self, handle: &SessionHandle) -> Vec<String> {
        self.lock()
            .sent
            .iter()
            .filter(|(h, _, _)| h == handle)
            .map(|(_, line, _)| line.clone())
            .collect()
    }

    /// Every delivered line with the instant its send started.
    pub fn timed_sends(&self) -> Vec<(SessionHandle, String, Instant)> {
        self.lock().sent.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RecordingState> {
        self.state.lock().expect("recording host state poisoned")
    }
}

#[async_trait]
impl SessionHost for RecordingHost {
    fn summary(&self) -> String {
        "recording host".to_string()
    }

    async fn open_session(&self, placement: Placement) -> Result<SessionHandle, SessionError> {
        let mut state = self.lock();
        state.calls.push(HostCall::Open(placement));
        state.open_attempts += 1;
        if state.fail_open_at == Some(state.open_attempts) {
            return Err(SessionError::ExecutionFailed("open refused".to_string()));
        }
        state.opened += 1;
        let handle = SessionHandle::new(format!("s{}", state.opened));
        state.open.push(OpenSession {
            handle: handle.clone(),
            name: String::new(),
        });
        Ok(handle)
    }

    async fn rename_session(&self, handle: &SessionHandle, name: &str) -> Result<(), SessionError> {
        let mut state = self.lock();
        state
            .calls
            .push(HostCall::Rename(handle.id().to_string(), name.to_string()));
        match state.open.iter_mut().find(|s| &s.handle == handle) {
            Some(session) => {
                session.name = name.to_string();
                Ok(())
            }
            None => Err(SessionError::Closed(handle.to_string())),
        }
    }

    async fn send_line(&self, handle: &SessionHandle, text: &str) -> Result<(), SessionError> {
        let latency = {
            let mut state = self.lock();
            state
                .calls
                .push(HostCall::Send(handle.id().to_string(), text.to_string()));
            if state.closed.contains(handle) {
                return Err(SessionError::Closed(handle.to_string()));
            }
            state
                .sent
                .push((handle.clone(), text.to_string(), Instant::now()));
            state.send_latency
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        Ok(())
    }

    async fn list_open_sessions(&self) -> Result<Vec<OpenSession>, SessionError> {
        let mut state = self.lock();
        state.calls.push(HostCall::ListSessions);
        Ok(state.open.clone())
    }

    async fn list_open_session_names(&self) -> Result<BTreeSet<String>, SessionError> {
        let mut state = self.lock();
        state.calls.push(HostCall::ListNames);
        Ok(state.open.iter().map(|s| s.name.clone()).collect())
    }

    async fn split_group(&self) -> Result<(), SessionError> {
        self.lock().calls.push(HostCall::SplitGroup);
        Ok(())
    }

    async fn focus_first_group(&self) -> Result<(), SessionError> {
        self.lock().calls.push(HostCall::FocusFirst);
        Ok(())
    }

    async fn focus_next_group_below(&self) -> Result<(), SessionError> {
        self.lock().calls.push(HostCall::FocusBelow);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Render sink and prompter
// ---------------------------------------------------------------------------

/// Render sink that keeps every rendered line.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("sink poisoned").clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    fn push(&self, line: String) {
        self.lines.lock().expect("sink poisoned").push(line);
    }
}

impl RenderSink for RecordingSink {
    fn warn(&self, msg: &str) {
        self.push(format!("warning: {msg}"));
    }

    fn section(&self, title: &str) {
        self.push(format!("section: {title}"));
    }

    fn activity(&self, text: &str) {
        self.push(format!("activity: {text}"));
    }

    fn field(&self, key: &str, value: &str) {
        self.push(format!("field: {key}: {value}"));
    }

    fn detail(&self, text: &str) {
        self.push(format!("detail: {text}"));
    }

    fn error(&self, msg: &str) {
        self.push(format!("error: {msg}"));
    }
}

#[derive(Debug)]
enum Answer {
    Many(Vec<usize>),
    One(usize),
    CancelPick,
    Text(String),
    AcceptDefault,
    CancelInput,
}

/// Prompter that replays queued answers in order.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    shown: Vec<PickOption>,
    defaults: Vec<Option<String>>,
}

impl ScriptedPrompter {
    pub fn answer_many(mut self, picked: Vec<usize>) -> Self {
        self.answers.push_back(Answer::Many(picked));
        self
    }

    pub fn answer_one(mut self, picked: usize) -> Self {
        self.answers.push_back(Answer::One(picked));
        self
    }

    pub fn cancel_pick(mut self) -> Self {
        self.answers.push_back(Answer::CancelPick);
        self
    }

    pub fn answer_text(mut self, text: impl Into<String>) -> Self {
        self.answers.push_back(Answer::Text(text.into()));
        self
    }

    pub fn accept_default(mut self) -> Self {
        self.answers.push_back(Answer::AcceptDefault);
        self
    }

    pub fn cancel_input(mut self) -> Self {
        self.answers.push_back(Answer::CancelInput);
        self
    }

    /// Options shown by the most recent pick.
    pub fn shown_options(&self) -> &[PickOption] {
        &self.shown
    }

    /// Default offered by each input prompt, in order.
    pub fn input_defaults(&self) -> Vec<Option<String>> {
        self.defaults.clone()
    }

    fn next(&mut self) -> Answer {
        self.answers
            .pop_front()
            .expect("prompter asked more questions than scripted")
    }
}

impl Prompter for ScriptedPrompter {
    fn pick_many(
        &mut self,
        _title: &str,
        options: &[PickOption],
    ) -> io::Result<Option<Vec<usize>>> {
        self.shown = options.to_vec();
        match self.next() {
            Answer::Many(picked) => Ok(Some(picked)),
            Answer::CancelPick => Ok(None),
            other => panic!("expected a multi pick, scripted {other:?}"),
        }
    }

    fn pick_one(&mut self, _title: &str, options: &[PickOption]) -> io::Result<Option<usize>> {
        self.shown = options.to_vec();
        match self.next() {
            Answer::One(picked) => Ok(Some(picked)),
            Answer::CancelPick => Ok(None),
            other => panic!("expected a single pick, scripted {other:?}"),
        }
    }

    fn input(&mut self, _title: &str, default: Option<&str>) -> io::Result<Option<String>> {
        self.defaults.push(default.map(str::to_string));
        match self.next() {
            Answer::Text(text) => Ok(Some(text)),
            Answer::AcceptDefault => Ok(default.map(str::to_string)),
            Answer::CancelInput => Ok(None),
            other => panic!("expected text input, scripted {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[tokio::test]
    async fn recording_host_tracks_names_after_rename() {
        let host = RecordingHost::with_open_names(&["old"]);
        let handle = host.open_session(Placement::NewGroup).await.unwrap();
        host.rename_session(&handle, "new").await.unwrap();
        let names = host.list_open_session_names().await.unwrap();
        assert!(names.contains("old") && names.contains("new"));
    }
}
