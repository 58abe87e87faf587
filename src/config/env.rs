//! Environment overrides for settings.

use crate::error::ConfigError;

use super::Settings;

/// tmux session override.
pub const ENV_TMUX_SESSION: &str = "MLSSH_TMUX_SESSION";
/// Line delay override, in milliseconds.
pub const ENV_DELAY_MS: &str = "MLSSH_DELAY_MS";
/// Any non-empty value disables color (<https://no-color.org>).
pub const ENV_NO_COLOR: &str = "NO_COLOR";

pub(super) fn apply_env_overrides<FEnv>(
    settings: &mut Settings,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(session) = non_empty(env_lookup(ENV_TMUX_SESSION)) {
        settings.tmux.session = session;
    }
    if let Some(delay) = non_empty(env_lookup(ENV_DELAY_MS)) {
        settings.dispatch.delay_ms = delay.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_DELAY_MS} value `{delay}`: expected milliseconds"
            ))
        })?;
    }
    if non_empty(env_lookup(ENV_NO_COLOR)).is_some() {
        settings.display.color = false;
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
