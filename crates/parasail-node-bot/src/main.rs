/*
[INPUT]:  CLI arguments, JSON configuration file, OS shutdown signals
[OUTPUT]: Running node bot with dashboard or headless logging
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

mod tui;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use parasail_adapter::{ClientConfig, NodeApi, ParasailClient, SessionManager};
use parasail_node_bot::config::DEFAULT_CONFIG_PATH;
use parasail_node_bot::sink::{StatusSink, TracingSink};
use parasail_node_bot::{ConfigStore, ScheduleTiming, Scheduler};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::tui::{DashboardSink, LOG_BUFFER_CAPACITY, LogBuffer, LogWriterFactory};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "parasail-node-bot", version, about = "Parasail node onboarding and daily check-in bot")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", env = "PARASAIL_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config_path: PathBuf,
    #[arg(long = "base-url", value_name = "URL", env = "PARASAIL_BASE_URL")]
    base_url: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Log to stdout instead of drawing the dashboard
    #[arg(long = "headless")]
    headless: bool,
    #[arg(long = "checkin-interval-secs", value_name = "SECS", default_value_t = 86_400)]
    checkin_interval_secs: u64,
    #[arg(long = "stats-interval-secs", value_name = "SECS", default_value_t = 60)]
    stats_interval_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let timing = ScheduleTiming::new(
        Duration::from_secs(args.checkin_interval_secs),
        Duration::from_secs(args.stats_interval_secs),
    )?;

    let store = Arc::new(
        ConfigStore::load(&args.config_path)
            .with_context(|| format!("load config {}", args.config_path.display()))?,
    );
    let config = store.config()?;

    let log_buffer = (!args.headless).then(|| LogBuffer::handle(LOG_BUFFER_CAPACITY));
    let dashboard_writer = log_buffer
        .as_ref()
        .map(|buffer| LogWriterFactory::new(buffer.clone()));
    let _log_guard = init_tracing(&args, dashboard_writer)?;

    info!(
        config_path = %args.config_path.display(),
        headless = args.headless,
        "configuration loaded"
    );

    let client = match args.base_url.as_deref() {
        Some(base_url) => ParasailClient::with_config_and_base_url(ClientConfig::default(), base_url),
        None => ParasailClient::new(),
    }
    .context("build http client")?;
    let api: Arc<dyn NodeApi> = Arc::new(client);

    let session = Arc::new(SessionManager::new(
        api,
        config.private_key.clone(),
        config.session(),
        store,
    ));

    let dashboard = log_buffer.map(|buffer| (DashboardSink::new(Arc::default()), buffer));
    let sink: Arc<dyn StatusSink> = match &dashboard {
        Some((sink, _)) => Arc::new(sink.clone()),
        None => Arc::new(TracingSink),
    };

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    let scheduler = Arc::new(Scheduler::new(session, sink, timing));
    let scheduler_task = tokio::spawn(scheduler.run(shutdown.clone()));

    match dashboard {
        Some((sink, buffer)) => {
            tui::run_dashboard(sink.state(), buffer, shutdown.clone())
                .await
                .context("run dashboard")?;
        }
        None => shutdown.cancelled().await,
    }
    info!("shutdown requested");
    shutdown.cancel();

    match tokio::time::timeout(SHUTDOWN_GRACE, scheduler_task).await {
        Ok(Ok(_)) => {}
        Ok(Err(err)) => warn!(error = %err, "scheduler task ended abnormally"),
        Err(_) => warn!("scheduler did not stop within grace period"),
    }

    Ok(())
}

fn init_tracing(
    args: &Cli,
    dashboard_writer: Option<LogWriterFactory>,
) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log level")?;

    let stdout_layer = dashboard_writer
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_target(false));
    let dashboard_layer = dashboard_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(writer)
    });

    let (file_layer, guard) = match args.log_file.as_deref() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(dashboard_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}

fn open_log_file(path: &Path) -> Result<tracing_appender::rolling::RollingFileAppender> {
    let file_name = path
        .file_name()
        .context("log file path must name a file")?;
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    Ok(tracing_appender::rolling::never(directory, file_name))
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
