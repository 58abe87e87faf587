//! CLI entry point for mlssh.

mod cli;

use std::io::IsTerminal;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mlssh::app::{run_connect, run_init, run_send, AppContext};
use mlssh::config::{load_settings, Settings};
use mlssh::error::MlsshError;
use mlssh::host::TmuxSessionHost;
use mlssh::tui::{LinePrompter, Renderer};

use cli::{Args, Command};

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "MLSSH_LOG";

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.log_level());
    debug!(version = env!("CARGO_PKG_VERSION"), "mlssh starting");

    let mut settings = match load_settings(args.settings.as_deref()) {
        Ok(loaded) => loaded.settings,
        Err(e) => {
            Renderer::new(!args.no_color && std::io::stderr().is_terminal())
                .error(&e.to_string());
            std::process::exit(1);
        }
    };
    args.apply_overrides(&mut settings);

    let color = settings.display.color && std::io::stderr().is_terminal();
    let renderer = Renderer::new(color);

    if let Err(e) = run(&args, &settings, &renderer, color).await {
        renderer.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(
    args: &Args,
    settings: &Settings,
    renderer: &Renderer,
    color: bool,
) -> Result<(), MlsshError> {
    match &args.command {
        Command::Connect {
            select,
            choose_config,
        } => {
            let tmux = Arc::new(tmux_host(settings).await?);
            let ctx = AppContext {
                host: tmux.clone(),
                renderer,
                settings,
                workspace: args.workspace.clone(),
            };
            let mut prompter = LinePrompter::stdio(color);
            let options = Command::connect_options(*select, *choose_config, args.config.clone());
            if let Some(session) = run_connect(&ctx, &mut prompter, &options).await? {
                if session.launched().next().is_some() {
                    renderer.detail(&format!("attach with: {}", tmux.attach_hint()));
                }
            }
        }
        Command::Send {
            command,
            select,
            file,
        } => {
            let tmux = Arc::new(tmux_host(settings).await?);
            let ctx = AppContext {
                host: tmux,
                renderer,
                settings,
                workspace: args.workspace.clone(),
            };
            let mut prompter = LinePrompter::stdio(color);
            let options = Command::send_options(command.clone(), *select, file.clone());
            if let Some(summary) = run_send(&ctx, &mut prompter, &options).await? {
                renderer.field("sent", &format!("{} line(s)", summary.lines));
                renderer.field("sessions", &summary.sessions.join(", "));
            }
        }
        Command::Init {
            path,
            user_settings,
        } => {
            let options = Command::init_options(path.clone(), *user_settings);
            run_init(renderer, args.workspace.as_deref(), &options)?;
        }
    }
    Ok(())
}

async fn tmux_host(settings: &Settings) -> Result<TmuxSessionHost, MlsshError> {
    Ok(TmuxSessionHost::connect(&settings.tmux.session, &settings.tmux.window).await?)
}

/// Install a stderr fmt subscriber. `MLSSH_LOG` wins over `-v` flags.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("mlssh={default_level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
