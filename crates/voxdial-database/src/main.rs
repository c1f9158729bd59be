//! Voxdial schema migration tool

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};
use voxdial_core::{Config, context_error, context_error::Result, init_logging};
use voxdial_database::{Database, SchemaReport, embedded_migrations};

/// Command line interface for the migration tool
#[derive(Parser)]
#[command(
    name = "voxdial-migrate",
    version = env!("CARGO_PKG_VERSION"),
    about = "Apply and verify the Voxdial transcript schema migration"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Database URL (overrides configuration)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations, then verify the schema
    Run,
    /// Verify the schema without changing it
    Verify,
    /// List the migrations embedded in this binary
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref())?;
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    init_logging(&config.logging)?;

    if matches!(cli.command, Commands::List) {
        for (version, description) in embedded_migrations() {
            println!("{version}  {description}");
        }
        return Ok(());
    }

    info!("Connecting to database");
    let database = Database::new(&config.database)
        .await
        .map_err(|e| context_error!("Database connection failed: {}", e))?;
    database.health_check().await?;

    if matches!(cli.command, Commands::Run) {
        info!("Running database migrations");
        if let Err(e) = database.migrate().await {
            error!("Database migration failed: {}", e);
            return Err(context_error!("Migration failed: {}", e));
        }
        info!("Database migrations completed");
    }

    let report = database.verify_schema().await?;
    print_report(&report);

    if report.is_complete() {
        Ok(())
    } else {
        warn!(?report, "Schema is missing migrated objects");
        Err(context_error!("Schema verification failed"))
    }
}

fn print_report(report: &SchemaReport) {
    let mark = |ok: bool| if ok { "ok" } else { "MISSING" };

    println!("transcripts table    {}", mark(report.transcripts_table));
    println!("transcripts trigger  {}", mark(report.transcripts_trigger));
    for (table, column) in &report.missing_columns {
        println!("column {table}.{column}  MISSING");
    }
    for index in &report.missing_indexes {
        println!("index {index}  MISSING");
    }
    if report.is_complete() {
        println!("schema complete");
    }
}
