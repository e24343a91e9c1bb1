//! `vouchly-tui`: terminal UI for voucher campaigns.
//!
//! Built on [ratatui](https://ratatui.rs). The campaign grid is the home
//! screen; opening a campaign shows its vouchers with generate and CSV
//! download. All server work runs through `vouchly-core`'s controller.
//!
//! Logs go to a file (default `/tmp/vouchly-tui.log`) so they never
//! corrupt the terminal.

mod action;
mod app;
mod component;
mod event;
mod input;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use vouchly_core::{ClientConfig, HttpController};

use crate::app::App;

/// Terminal UI for creating voucher campaigns and managing their vouchers.
#[derive(Parser, Debug)]
#[command(name = "vouchly-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short, long, env = "VOUCHLY_PROFILE")]
    profile: Option<String>,

    /// API origin, e.g. http://localhost:3000 (overrides the profile)
    #[arg(short = 'u', long, env = "VOUCHLY_API_URL")]
    api_url: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/vouchly-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Nothing may be written to stdout/stderr while the
/// terminal is in raw mode. Hold the guard so logs flush on exit.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "vouchly_tui={log_level},vouchly_core={log_level},vouchly_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("vouchly-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Resolve the client settings: `--api-url` > profile > built-in defaults.
fn client_config(cli: &Cli) -> Result<ClientConfig> {
    let cfg = vouchly_config::load_config_or_default();
    let (name, mut profile) = vouchly_config::resolve_profile(&cfg, cli.profile.as_deref())?;
    if let Some(url) = &cli.api_url {
        profile.api_url.clone_from(url);
    }
    let client = vouchly_config::profile_to_client_config(&profile, &cfg.defaults)?;
    info!(profile = %name, api_url = %client.api_url, "resolved configuration");
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first so a failure below still leaves a sane terminal.
    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let config = client_config(&cli)?;
    let controller = HttpController::from_config(&config)?;

    let mut app = App::new(
        controller,
        config.campaign_page_size,
        config.voucher_page_size,
    );
    app.run().await?;

    Ok(())
}
