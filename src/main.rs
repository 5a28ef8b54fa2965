//! recentfiles binary entrypoint kept minimal. The list logic lives in the library.

mod args;

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;
use recentfiles::RecentFiles;
use recentfiles::config;

struct RecentTimer;

impl tracing_subscriber::fmt::time::FormatTime for RecentTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now()
            .format("%Y-%m-%d-T %H:%M:%S")
            .to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing to `<config_dir>/logs/recentfiles.log`, falling back to stderr.
///
/// Inputs:
/// - `level`: Default filter when `RUST_LOG` is unset.
fn init_logging(level: &str) {
    let mut log_path = config::logs_dir();
    log_path.push("recentfiles.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(RecentTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: log to stderr so the CLI still works without a writable config dir
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(RecentTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

/// What: Load settings, open the store and run the requested subcommand.
///
/// Output:
/// - `Ok(())` on success; any configuration, persistence or output error otherwise.
fn run(cli: &args::Args) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings_path = match &cli.config {
        Some(p) => p.clone(),
        None => {
            let p = config::default_settings_path();
            config::ensure_settings_file(&p);
            p
        }
    };
    let settings = args::apply_overrides(cli, config::load_settings(Some(&settings_path)));
    let options = settings.validate()?;
    let mut store = RecentFiles::open(options)?;
    args::commands::run(
        &cli.command,
        &mut store,
        settings.icons,
        &mut std::io::stdout().lock(),
    )
}

fn main() {
    let cli = args::Args::parse();
    init_logging(&args::determine_log_level(&cli));
    tracing::debug!(command = ?cli.command, "recentfiles starting");
    if let Err(err) = run(&cli) {
        tracing::error!(error = %err, "Command failed");
        eprintln!("recentfiles: {err}");
        std::process::exit(1);
    }
}
