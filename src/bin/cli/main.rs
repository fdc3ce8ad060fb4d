use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use bucket_backup::{
    AppBuilder, AppConfig, BackupService, ConsoleNotifier, DayReport, RetentionWindow,
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

#[derive(Parser, Debug)]
#[command(name = "backup-cli")]
#[command(about = "Client to perform backup-related tasks with object storage", long_about = None)]
struct Cli {
    /// Log level for diagnostics written to stderr
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload files, each stored under its base name
    Upload {
        /// Files to upload
        #[arg(required = true, value_parser = existing_file)]
        files: Vec<PathBuf>,
    },

    /// Delete backups older than the retention window
    Prune {
        /// Number of days of backups to keep
        #[arg(long, default_value_t = RetentionWindow::DEFAULT_DAYS)]
        days_to_keep: u32,
    },

    /// Download one object into the current directory
    Download {
        /// Exact object key
        filename: String,
    },

    /// Download every backup stamped with the given day
    #[command(name = "get_day", visible_alias = "get-day")]
    GetDay {
        /// Day to fetch, e.g. "2023-01-15" or "Jan 15 2023"
        day: String,
    },

    /// Delete one object
    Delete {
        /// Exact object key
        filename: String,
    },

    /// List every object in the bucket
    List,
}

impl Cli {
    fn init_logging(&self) {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info" => LevelFilter::INFO,
            "warn" => LevelFilter::WARN,
            "error" => LevelFilter::ERROR,
            _ => LevelFilter::WARN,
        };

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_filter(level),
            )
            .init();
    }
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("File \"{}\" does not exist.", value))
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_env()?;
    let app = AppBuilder::new(config)
        .with_notifier(Arc::new(ConsoleNotifier))
        .build()
        .await?;
    let service = app.backup_service;

    match cli.command {
        Commands::Upload { files } => {
            service.upload(&files).await?;
        }
        Commands::Prune { days_to_keep } => {
            let report = service.prune(RetentionWindow::days(days_to_keep)).await?;
            info!(removed = report.removed.len(), cutoff = %report.cutoff, "pruned");
        }
        Commands::Download { filename } => {
            service.download(&filename).await?;
        }
        Commands::GetDay { day } => {
            if let DayReport::Downloaded { keys, .. } = service.get_day(&day).await? {
                info!(count = keys.len(), "fetched backups");
            }
        }
        Commands::Delete { filename } => {
            service.delete(&filename).await?;
        }
        Commands::List => {
            let report = service.list().await?;
            info!(
                objects = report.objects.len(),
                bytes = report.total_size(),
                "listed bucket"
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
