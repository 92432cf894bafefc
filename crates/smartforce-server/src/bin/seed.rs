//! SmartForce seed - loads the sample exercise and professor catalog
//!
//! Usage:
//!   smartforce-seed all
//!   smartforce-seed exercises
//!   smartforce-seed reset --yes

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use smartforce_common::logging::{init_logging, LogConfig};
use tracing::{info, warn};

use smartforce_server::{
    config::{Config, DatabaseConfig},
    db, seed,
};

#[derive(Debug, Parser)]
#[command(name = "smartforce-seed", version, about = "Seed a SmartForce database")]
struct Cli {
    /// Database to seed; defaults to the server's DATABASE_URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: SeedCommand,
}

#[derive(Debug, Subcommand)]
enum SeedCommand {
    /// Insert the sample exercises
    Exercises,
    /// Insert the sample professors
    Professors,
    /// Insert exercises and professors
    All,
    /// Delete every row of every table
    Reset {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .log_file_prefix("smartforce-seed")
        .build()
        .merge_env()?;
    let _log_guard = init_logging(&log_config)?;

    let mut database: DatabaseConfig = Config::default().database;
    if let Some(url) = cli.database_url {
        database.url = url;
    }

    let pool = db::create_pool(&database)
        .await
        .with_context(|| format!("Failed to open database {}", database.url))?;
    db::run_migrations(&pool).await?;

    match cli.command {
        SeedCommand::Exercises => {
            seed::seed_exercises(&pool).await?;
        },
        SeedCommand::Professors => {
            seed::seed_professors(&pool).await?;
        },
        SeedCommand::All => {
            seed::seed_exercises(&pool).await?;
            seed::seed_professors(&pool).await?;
        },
        SeedCommand::Reset { yes } => {
            if !yes {
                warn!("Refusing to reset without --yes");
                anyhow::bail!("reset deletes all data; pass --yes to confirm");
            }
            seed::reset(&pool).await?;
        },
    }

    pool.close().await;
    info!("Seeding finished");
    Ok(())
}
