//! `wolman-tui` — terminal dashboard for a WOLManager backend.
//!
//! Two screens: the host inventory (registered / unregistered tables with
//! search and per-row commands) and discovery (scanner status, toggle and
//! statistics charts). Data arrives from `wolman-core`'s [`Dashboard`]
//! through a background data bridge task.
//!
//! Logs go to a file (default `/tmp/wolman-tui.log`) so they never corrupt
//! the terminal.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod modals;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use wolman_config::Config;
use wolman_core::Dashboard;

use crate::app::App;

/// Terminal dashboard for WOLManager host inventory and Wake-on-LAN.
#[derive(Parser, Debug)]
#[command(name = "wolman-tui", version, about)]
struct Cli {
    /// Backend root URL (e.g., http://localhost:8000)
    #[arg(short = 's', long, env = "WOLMAN_SERVER")]
    server: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Refresh period for hosts and discovery status, in seconds
    #[arg(short = 'p', long, env = "WOLMAN_POLL_INTERVAL")]
    poll_interval: Option<u64>,

    /// Config file (defaults to the platform config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "/tmp/wolman-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "wolman_tui={log_level},wolman_core={log_level},wolman_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("wolman-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// File config with CLI overrides applied on top.
fn resolve_config(cli: &Cli) -> Result<(Config, Option<PathBuf>)> {
    let mut config = match &cli.config {
        Some(path) => wolman_config::load_config_from(path)
            .wrap_err_with(|| format!("failed to load {}", path.display()))?,
        None => wolman_config::load_config_or_default(),
    };

    if let Some(server) = &cli.server {
        config.server.clone_from(server);
    }
    if cli.insecure {
        config.insecure = true;
    }
    if let Some(secs) = cli.poll_interval {
        config.poll_interval = secs;
    }

    Ok((config, cli.config.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let (config, config_file) = resolve_config(&cli)?;
    let dashboard_config =
        wolman_config::to_dashboard_config(&config).wrap_err("invalid configuration")?;

    info!(
        server = %dashboard_config.url,
        poll_secs = dashboard_config.poll_interval.as_secs(),
        "starting wolman-tui"
    );

    // Theme applies before the first frame.
    theme::apply(config.theme);

    let dashboard = Dashboard::new(dashboard_config).wrap_err("failed to build HTTP client")?;
    let mut app = App::new(dashboard, config, config_file);
    app.run().await?;

    Ok(())
}
