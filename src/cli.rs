//! CLI argument parsing via clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use mlssh::app::{ConnectOptions, InitOptions, ScriptSource, SendOptions};
use mlssh::config::Settings;

/// Open a grid of ssh sessions in tmux and broadcast commands to them.
#[derive(Debug, Parser)]
#[command(name = "mlssh", version)]
pub struct Args {
    /// Hosts file (default: <workspace>/mlssh.json).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Settings file (default: ./mlssh.toml or ~/.config/mlssh/mlssh.toml).
    #[arg(long = "settings", global = true)]
    pub settings: Option<PathBuf>,

    /// Folder holding hosts files (default: current directory).
    #[arg(short = 'w', long = "workspace", global = true)]
    pub workspace: Option<PathBuf>,

    /// tmux session that holds the panes.
    #[arg(long = "tmux-session", global = true)]
    pub tmux_session: Option<String>,

    /// Gap between lines sent to the same pane, in milliseconds.
    #[arg(long = "delay-ms", global = true)]
    pub delay_ms: Option<u64>,

    /// Raise log verbosity (-v info, -vv debug). `MLSSH_LOG` takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open one pane per host and log in.
    Connect {
        /// Pick which hosts to connect.
        #[arg(long)]
        select: bool,
        /// Pick the hosts file from the workspace's *.json files.
        #[arg(long = "choose-config")]
        choose_config: bool,
    },
    /// Send a command (or a script file) to open panes.
    Send {
        /// Command to send; prompted when omitted.
        #[arg(conflicts_with = "file")]
        command: Option<String>,
        /// Pick which panes receive it.
        #[arg(long)]
        select: bool,
        /// Send a script file line by line; path prompted when omitted.
        #[arg(long = "file", num_args = 0..=1, value_name = "PATH")]
        file: Option<Option<PathBuf>>,
    },
    /// Write an example hosts file.
    Init {
        /// Where to write it (default: <workspace>/mlssh.json).
        path: Option<PathBuf>,
        /// Also write ~/.config/mlssh/mlssh.toml from the built-in template.
        #[arg(long = "user-settings")]
        user_settings: bool,
    },
}

impl Args {
    /// Apply flag overrides on top of file/env settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(session) = &self.tmux_session {
            settings.tmux.session = session.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            settings.dispatch.delay_ms = delay_ms;
        }
        if self.no_color {
            settings.display.color = false;
        }
    }

    /// Default log filter when `MLSSH_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

impl Command {
    pub fn connect_options(
        select: bool,
        choose_config: bool,
        config: Option<PathBuf>,
    ) -> ConnectOptions {
        ConnectOptions {
            config,
            choose_config,
            select,
        }
    }

    pub fn send_options(
        command: Option<String>,
        select: bool,
        file: Option<Option<PathBuf>>,
    ) -> SendOptions {
        let source = match file {
            Some(path) => ScriptSource::File(path),
            None => ScriptSource::Command(command),
        };
        SendOptions { source, select }
    }

    pub fn init_options(path: Option<PathBuf>, user_settings: bool) -> InitOptions {
        InitOptions {
            path,
            settings: user_settings,
        }
    }
}
