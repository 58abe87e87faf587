//! Process and shell execution helpers used by session hosts.

use crate::error::SessionError;
use std::process::Stdio;
use tokio::process::Command;

/// Structured process output for shell-style commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run a shell snippet through `sh -c`.
pub(crate) async fn run_sh_process(command: &str) -> Result<ExecOutput, SessionError> {
    run_process("sh", &["-c".into(), command.into()]).await
}

/// Spawn and wait for a process, capturing stdout/stderr.
pub(crate) async fn run_process(
    program: &str,
    args: &[String],
) -> Result<ExecOutput, SessionError> {
    let mut cmd = Command::new(program);
    cmd.kill_on_drop(true);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let output = cmd
        .output()
        .await
        .map_err(|e| SessionError::ExecutionFailed(format!("{program}: {e}")))?;

    Ok(ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Convert non-zero command status into contextual execution errors.
pub(crate) fn ensure_success(
    output: ExecOutput,
    context: &str,
) -> Result<ExecOutput, SessionError> {
    if output.exit_code == 0 {
        return Ok(output);
    }

    let mut details = if output.stderr.trim().is_empty() {
        output.stdout.trim().to_string()
    } else {
        output.stderr.trim().to_string()
    };
    if details.is_empty() {
        details = format!("command exited with {}", output.exit_code);
    }

    Err(SessionError::ExecutionFailed(format!("{context}: {details}")))
}

/// Shell-safe single-quote escaping.
pub fn shell_quote(s: &str) -> String {
    if s.is_empty() {
        "''".into()
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}

fn is_plain_shell_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '@' | '%' | '+' | ',')
}

/// Leave plain words untouched and single-quote anything else.
pub fn shell_word(s: &str) -> String {
    if !s.is_empty() && s.chars().all(is_plain_shell_char) {
        s.to_string()
    } else {
        shell_quote(s)
    }
}
