use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elicit_analyzer::config::{Config, LogFormat};
use elicit_analyzer::controller::{spawn_session, Controller, UiCommand};
use elicit_analyzer::models::{FileRef, PipelineStatus};

/// Extract text from a PDF or image and summarize it.
#[derive(Debug, Parser)]
#[command(name = "elicit-analyzer", version)]
struct Cli {
    /// Document to analyze (PDF, PNG or JPEG).
    file: PathBuf,

    /// Base URL serving `/extract` and `/analyze` (overrides SERVICE_BASE_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds (overrides REQUEST_TIMEOUT_SECONDS).
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the final view model as JSON.
    #[arg(long)]
    json: bool,

    /// Log output format (overrides LOG_FORMAT).
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format.unwrap_or_else(LogFormat::from_env));

    let mut config = Config::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout_seconds = Some(timeout);
    }
    config.validate()?;

    tracing::info!(
        extract_url = %config.extract_url,
        analyze_url = %config.analyze_url,
        "Starting Elicit Analyzer"
    );

    let file = FileRef::from_path(&cli.file)
        .await
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let (controller, mut channels) = Controller::from_config(&config)?;
    let (session, task) = spawn_session(controller, config.command_queue_capacity);

    session.dispatch(UiCommand::Pick(Some(file)))?;
    session.dispatch(UiCommand::Analyze)?;
    drop(session);

    let controller = task.await.context("Controller session panicked")?;

    let mut alerted = false;
    while let Ok(alert) = channels.alerts.try_recv() {
        alerted = true;
        eprintln!("[{}] {}", alert.raised_at.format("%H:%M:%S"), alert.message());
    }

    // The preview file goes away with the controller, so its URL is not printed.
    let view = controller.view().without_preview();
    drop(controller);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", view.render_text());
    }

    if alerted || view.status != PipelineStatus::Succeeded {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "elicit_analyzer=info".into());

    // Logs go to stderr so stdout stays clean for the rendered view.
    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
