//! Customer favorites CLI - database migrations.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! favorites-cli migrate
//!
//! # Show which migrations have been applied
//! favorites-cli migrate status
//! ```
//!
//! Connection settings come from the same `POSTGRES_*` variables the server
//! reads (a `.env` file is honored).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "favorites-cli")]
#[command(author, version, about = "Customer favorites CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: Option<MigrateAction>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum MigrateAction {
    /// Apply all pending migrations (default)
    Run,
    /// List migrations and whether each has been applied
    Status,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::migrate::MigrationError> {
    match cli.command {
        Commands::Migrate { action } => match action.unwrap_or(MigrateAction::Run) {
            MigrateAction::Run => commands::migrate::run().await,
            MigrateAction::Status => commands::migrate::status().await,
        },
    }
}
