/*
[INPUT]:  CLI arguments, YAML configuration file, local state directory
[OUTPUT]: Terminal UI, summary report, or generated configuration
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or startup flow
*/

mod cli;
mod tui;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tasksmart::{AppConfig, LocalStore};
use tasksmart_client::AuthManager;

use crate::tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory};

#[derive(Parser, Debug)]
#[command(name = "tasksmart", version, about = "TaskSmart terminal client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    /// Validate the configuration and exit
    #[arg(long = "dry-run", global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the terminal UI (default)
    Tui,
    /// Print category and priority counts for the saved session
    Summary,
    /// Interactively write a configuration file
    Init {
        #[arg(long, value_name = "PATH", default_value = "tasksmart.yaml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Command::Init { output }) = &args.command {
        return cli::init::run_init(output.clone());
    }

    let config = load_config(args.config_path.as_deref())?;

    if args.dry_run {
        init_stderr_tracing(&args.log_level)?;
        info!(
            base_url = %config.api.base_url,
            data_dir = ?config.storage.data_dir,
            "dry-run requested; configuration validated"
        );
        return Ok(());
    }

    let data_dir = config.data_dir()?;

    match args.command {
        Some(Command::Summary) => {
            init_stderr_tracing(&args.log_level)?;
            let (auth, _store) = open_session(&config, &data_dir).await?;
            cli::summary::run_summary(&auth).await
        }
        Some(Command::Tui) | None => {
            let log_buffer: LogBufferHandle =
                Arc::new(StdMutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY)));
            let _guard = init_tui_tracing(&args.log_level, &data_dir, log_buffer.clone())?;
            info!(base_url = %config.api.base_url, "starting tasksmart");

            let (auth, store) = open_session(&config, &data_dir).await?;
            tui::run_tui_with_log(config, auth, Arc::new(store), log_buffer).await
        }
        Some(Command::Init { .. }) => Ok(()),
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load(path).context("load config")
}

/// Open local state and resume the saved session, if any
async fn open_session(config: &AppConfig, data_dir: &Path) -> Result<(AuthManager, LocalStore)> {
    let store = LocalStore::open(data_dir).await.context("open local store")?;
    let auth = AuthManager::new(config.build_client()?);

    match store.load_session().await {
        Ok(Some(session)) => {
            info!(user_id = %session.user.id, guest = session.is_guest(), "resuming saved session");
            auth.session().restore(session);
        }
        Ok(None) => {}
        Err(err) => warn!(error = %err, "ignoring unreadable saved session"),
    }
    Ok((auth, store))
}

fn init_stderr_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

/// TUI logging: in-memory buffer for the Logs tab plus a daily rolling file
fn init_tui_tracing(
    log_level: &str,
    data_dir: &Path,
    log_buffer: LogBufferHandle,
) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let file_appender = tracing_appender::rolling::daily(data_dir.join("logs"), "tasksmart.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(LogWriterFactory::new(log_buffer)),
        )
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}
