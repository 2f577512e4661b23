//! OrgSync CLI - Operator tooling for directory to HR system replication
//!
//! Works offline against exported snapshots:
//! - Render the HR department forest and report duplicate identifiers
//! - Check whether a unit is inside the configured allow list
//! - Simulate a change event as a dry run and show the HR call it would make

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

mod commands;
mod config;
mod output;

/// OrgSync CLI application
#[derive(Parser)]
#[command(name = "orgsync")]
#[command(about = "OrgSync - Directory to HR system change orchestration", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "ORGSYNC_CONFIG")]
    config: Option<String>,

    /// Log level, overriding the configured one
    #[arg(long)]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Render the department forest from HR listing exports
    Tree {
        /// Flat department listing (JSON array), used for names
        #[arg(long)]
        departments: PathBuf,

        /// Organization listing with embedded parent chains (JSON array)
        #[arg(long)]
        organization: PathBuf,

        /// Only render the subtree under this department
        #[arg(long)]
        root: Option<Uuid>,
    },

    /// Report business identifiers used by more than one department
    Duplicates {
        /// Flat department listing (JSON array)
        #[arg(long)]
        departments: PathBuf,
    },

    /// Check whether a unit is inside the allow list
    Authorize {
        /// Unit to check
        unit: Uuid,

        /// Directory snapshot (JSON)
        #[arg(long)]
        directory: PathBuf,

        /// Effective date; defaults to the first of the current month
        #[arg(long)]
        at: Option<NaiveDate>,
    },

    /// Run a change request as a dry run and print the HR call it would make
    Simulate {
        /// Change request (JSON)
        #[arg(long)]
        event: PathBuf,

        /// Directory snapshot (JSON)
        #[arg(long)]
        directory: PathBuf,

        /// Date the request's default effective date is derived from
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config
    let config = config::load(cli.config.as_deref())?;

    // Initialize tracing
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.into());

    if cli.json || config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
            .init();
    }

    // Execute command
    match cli.command {
        Commands::Tree {
            departments,
            organization,
            root,
        } => commands::tree::execute(&config, &departments, &organization, root).await,
        Commands::Duplicates { departments } => {
            commands::duplicates::execute(&config, &departments).await
        }
        Commands::Authorize {
            unit,
            directory,
            at,
        } => commands::authorize::execute(&config, unit, &directory, at).await,
        Commands::Simulate {
            event,
            directory,
            today,
        } => commands::simulate::execute(&config, &event, &directory, today).await,
        Commands::Config => output::print_json(&config),
    }
}
