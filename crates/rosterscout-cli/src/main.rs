// rosterscout entry point.
//
// Startup sequence:
// 1. Parse command-line arguments
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (log to file, stdout carries results)
// 4. Load player and baseline data
// 5. Run the requested command and print its JSON result

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use rosterscout_cli::cli::Cli;
use rosterscout_cli::{commands, config, data};
use rosterscout_core::ScoutService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse arguments
    let cli = Cli::parse();
    let base_dir = match cli.base_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to determine working directory")?,
    };

    // 2. Load config
    let config = config::load_config(&base_dir).context("failed to load configuration")?;

    // 3. Initialize tracing
    init_tracing(&base_dir, &config.logging)?;
    info!("rosterscout starting in {}", base_dir.display());

    // 4. Load data
    let source = data::load_all(&base_dir, &config).context("failed to load player data")?;
    let service = ScoutService::new(source, config.recommend);

    // 5. Run command
    match commands::execute(&service, &cli.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            error!("{:?} failed: {}", cli.command, e);
            Err(anyhow::anyhow!("{}: {}", commands::error_kind(&e), e))
        }
    }
}

/// Pick the log directory: `<base>/logs` when it can be created, otherwise
/// the platform data directory.
fn log_dir(base_dir: &Path) -> anyhow::Result<PathBuf> {
    let preferred = base_dir.join("logs");
    if std::fs::create_dir_all(&preferred).is_ok() {
        return Ok(preferred);
    }
    let dirs = directories::ProjectDirs::from("", "", "rosterscout")
        .context("no writable log directory available")?;
    let fallback = dirs.data_local_dir().join("logs");
    std::fs::create_dir_all(&fallback)
        .with_context(|| format!("failed to create {}", fallback.display()))?;
    Ok(fallback)
}

/// Initialize tracing to log to a file (stdout is reserved for JSON output).
fn init_tracing(base_dir: &Path, logging: &config::LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_file = std::fs::File::create(log_dir(base_dir)?.join(&logging.file_name))
        .context("failed to create log file")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
