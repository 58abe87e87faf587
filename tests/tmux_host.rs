//! Live tmux host probe.
//!
//! Ignored by default: it needs a `tmux` binary and creates (then kills) a
//! throwaway tmux session.
//!
//! Run explicitly:
//! `cargo test --test tmux_host -- --ignored --nocapture`

use std::process::Command;

use mlssh::host::{Placement, SessionHost, TmuxSessionHost};

struct KillOnDrop(String);

impl Drop for KillOnDrop {
    fn drop(&mut self) {
        let _ = Command::new("tmux")
            .args(["kill-session", "-t", &format!("={}", self.0)])
            .status();
    }
}

#[tokio::test]
#[ignore = "needs tmux; run explicitly"]
async fn panes_open_in_rows_and_keep_their_names() {
    let session = format!("mlssh-it-{}", std::process::id());
    let host = TmuxSessionHost::connect(session.clone(), "grid")
        .await
        .expect("tmux available");
    let _guard = KillOnDrop(session);

    host.split_group().await.expect("split");
    host.focus_first_group().await.expect("focus first");
    let first = host.open_session(Placement::NewGroup).await.expect("open");
    let second = host.open_session(Placement::Beside).await.expect("open beside");
    host.focus_next_group_below().await.expect("focus below");
    let third = host.open_session(Placement::NewGroup).await.expect("open row 2");

    for (handle, name) in [(&first, "alpha"), (&second, "beta"), (&third, "gamma")] {
        host.rename_session(handle, name).await.expect("rename");
    }

    let names = host.list_open_session_names().await.expect("names");
    for name in ["alpha", "beta", "gamma"] {
        assert!(names.contains(name), "missing {name} in {names:?}");
    }

    host.send_line(&first, "echo hello").await.expect("send");
    assert!(host.attach_hint().starts_with("tmux attach -t "));
}
