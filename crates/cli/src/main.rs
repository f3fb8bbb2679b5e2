use crate::{
    commands::{Commands, GlobalArgs},
    config::ResolvedConfig,
    env::EnvManager,
    error::CliError,
    scan::ScanReport,
    shutdown::{ExitCode, ShutdownCoordinator},
};
use clap::Parser;
use connectors::sql::sqlite::{
    adapter::{ColumnInfo, SqliteBackend},
    settings::SqliteSettings,
};
use engine_core::{loader::ingest_file, report::IngestReport};
use model::schema::table::table_identifier;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod env;
mod error;
mod output;
mod scan;
mod shutdown;

#[derive(Parser)]
#[command(
    name = "tsv2sql",
    version = "0.1.0",
    about = "Bulk-load delimited text files into SQLite"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Serialize)]
struct TableInfo {
    table: String,
    columns: Vec<ColumnInfo>,
    row_count: i64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let shutdown = ShutdownCoordinator::new(CancellationToken::new());
    shutdown.register_handlers();

    let code = match run(cli, &shutdown).await {
        Ok(()) => ExitCode::Success,
        Err(CliError::ShutdownRequested) => {
            warn!("Stopped early on shutdown request");
            ExitCode::ShutdownRequested
        }
        Err(err) => {
            error!("{err}");
            ExitCode::GeneralError
        }
    };

    std::process::exit(code.as_i32());
}

async fn run(cli: Cli, shutdown: &ShutdownCoordinator) -> Result<(), CliError> {
    let mut env = EnvManager::from_process();
    if let Some(path) = &cli.global.env_file {
        env.load_from_file(path)?;
    }
    let config = ResolvedConfig::resolve(&cli.global, &env)?;

    match cli.command {
        Commands::Load {
            table,
            file,
            output,
        } => {
            info!("Loading {} into table hint '{}'", file.display(), table);
            let report = load_one(config, file, table, shutdown).await?;
            output::emit(&report, output.as_deref()).await?;

            if shutdown.is_shutdown_requested() {
                return Err(CliError::ShutdownRequested);
            }
        }
        Commands::Scan {
            dir,
            extension,
            keep_going,
            output,
        } => {
            let report = scan_dir(config, &dir, &extension, keep_going, shutdown).await?;
            output::emit(&report, output.as_deref()).await?;

            if !report.failed.is_empty() {
                return Err(CliError::ScanFailed {
                    failed: report.failed.len(),
                    total: report.failed.len() + report.loaded.len(),
                });
            }
            if !report.interrupted.is_empty() {
                return Err(CliError::ShutdownRequested);
            }
        }
        Commands::Info { table } => {
            let info = table_info(&config.sqlite, &table)?;
            output::print_report(&info)?;
        }
    }

    Ok(())
}

async fn load_one(
    config: ResolvedConfig,
    file: PathBuf,
    table: String,
    shutdown: &ShutdownCoordinator,
) -> Result<IngestReport, CliError> {
    let ResolvedConfig { ingest, sqlite } = config;
    let mut task = tokio::task::spawn_blocking(move || -> Result<IngestReport, CliError> {
        let mut backend = SqliteBackend::open(&sqlite)?;
        Ok(ingest_file(&mut backend, &file, &table, &ingest)?)
    });

    let token = shutdown.cancel_token();
    tokio::select! {
        joined = &mut task => joined?,
        _ = token.cancelled() => {
            info!("Waiting for the current file to finish");
            task.await?
        }
    }
}

async fn scan_dir(
    config: ResolvedConfig,
    dir: &Path,
    extension: &str,
    keep_going: bool,
    shutdown: &ShutdownCoordinator,
) -> Result<ScanReport, CliError> {
    let candidates = scan::matching_files(dir, extension)?;
    if candidates.files.is_empty() {
        warn!("No loadable .{} files found in {}", extension, dir.display());
        return Ok(ScanReport {
            skipped: candidates.skipped,
            ..Default::default()
        });
    }
    info!("Found {} files to load in {}", candidates.files.len(), dir.display());

    let ResolvedConfig { ingest, sqlite } = config;
    let token = shutdown.cancel_token();
    let report = tokio::task::spawn_blocking(move || -> Result<ScanReport, CliError> {
        let mut backend = SqliteBackend::open(&sqlite)?;
        Ok(scan::load_files(
            &mut backend,
            candidates,
            &ingest,
            keep_going,
            || token.is_cancelled(),
        )?)
    })
    .await??;
    Ok(report)
}

fn table_info(sqlite: &SqliteSettings, table: &str) -> Result<TableInfo, CliError> {
    let table = table_identifier(table)?;
    let backend = SqliteBackend::open(sqlite)?;
    if !backend.table_exists(table.as_str())? {
        return Err(CliError::TableNotFound(table.to_string()));
    }

    Ok(TableInfo {
        table: table.to_string(),
        columns: backend.table_columns(table.as_str())?,
        row_count: backend.row_count(table.as_str())?,
    })
}
