use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser as _, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use logfold::core::config::Config;
use logfold::core::Metadata;
use logfold::{
    find_logs, Diagnostics, FileUpload, Ingestor, LogLevel, LogQuery, MemoryStore, Normalizer,
    Parser, RawBatch, StructuredEntry, ValidationError,
};

#[derive(clap::Parser)]
#[command(name = "logfold", version, about = "Infer, normalise and ingest log lines of unknown format")]
struct Cli {
    /// Read configuration from this file instead of ~/.config/logfold/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Diagnostic output format on stderr. Verbosity follows RUST_LOG.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Show how each line is parsed and normalised, without storing anything.
    Parse {
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Ingest stdin as one batch of raw lines.
    Raw {
        #[arg(long)]
        channel: Option<String>,
    },
    /// Ingest a log file the way an upload would be.
    Upload {
        path: PathBuf,
        #[arg(long, default_value = "text/plain")]
        content_type: String,
        #[arg(long)]
        channel: Option<String>,
        /// After ingesting, list stored entries of this level.
        #[arg(long)]
        show: Option<LogLevel>,
        /// Maximum entries listed by --show.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Ingest one structured entry.
    Log {
        #[arg(long)]
        level: LogLevel,
        #[arg(long)]
        source: String,
        #[arg(long)]
        channel: Option<String>,
        /// Metadata as a JSON object.
        #[arg(long)]
        metadata: Option<String>,
        message: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };
    let diagnostics = Diagnostics::current();
    let ingestor = Ingestor::new(
        Arc::new(MemoryStore::new()),
        config.ingest.clone(),
        diagnostics.clone(),
    );

    match cli.command {
        Command::Parse { lines } => {
            let parser = Parser::builtin(diagnostics.clone());
            let normalizer = Normalizer::new(diagnostics);
            for line in &lines {
                let parsed = parser.parse(line)?;
                let normalized = normalizer.normalize(&parsed, line, None);
                print_json(&json!({ "parsed": parsed, "normalized": normalized }))?;
            }
        }
        Command::Raw { channel } => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
            let batch = RawBatch {
                lines: input.lines().map(str::to_string).collect(),
                ingestion_source: channel,
            };
            let result = ingestor.ingest_raw(batch).await?;
            print_json(&json!({ "ingested": result.ingested, "failed": result.failed }))?;
        }
        Command::Upload {
            path,
            content_type,
            channel,
            show,
            limit,
        } => {
            let upload = read_upload(&path, content_type, &config).await?;
            let result = ingestor.ingest_file(upload, channel.as_deref()).await?;
            print_json(&result)?;

            if let Some(level) = show {
                let query = LogQuery {
                    level: Some(level),
                    limit,
                    ..LogQuery::default()
                };
                let page = find_logs(ingestor.store().as_ref(), &query, &config.query).await?;
                print_json(&page)?;
            }
        }
        Command::Log {
            level,
            source,
            channel,
            metadata,
            message,
        } => {
            let metadata = metadata
                .map(|m| serde_json::from_str::<Metadata>(&m))
                .transpose()
                .context("--metadata must be a JSON object")?;
            let stored = ingestor
                .ingest_structured(StructuredEntry {
                    level,
                    message,
                    source,
                    ingestion_source: channel,
                    metadata,
                })
                .await?;
            print_json(&stored)?;
        }
    }

    Ok(())
}

/// Enforce the size ceiling before reading the file into memory.
async fn read_upload(path: &Path, content_type: String, config: &Config) -> anyhow::Result<FileUpload> {
    let len = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?
        .len();
    config
        .ingest
        .check_file_size(len)
        .map_err(ValidationError::from)?;

    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FileUpload::new(filename, content_type, content))
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true).with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
