mod cli;
mod commands;
mod config;
mod crontab;
mod storage;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::ScheduleSettings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "moviesync=debug"
    } else {
        "moviesync=info"
    };

    // Logs go to stderr so reports on stdout stay pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let aws = cli.aws.settings();

    match cli.command {
        Commands::Inspect { data, format } => {
            commands::inspect::run(&data, format)?;
        }
        Commands::LoadDynamodb { data } => {
            commands::load_dynamodb::run(&aws, &data).await?;
        }
        Commands::LoadRds { database } => {
            let database = database.config()?;
            commands::load_rds::run(&aws, &database).await?;
        }
        Commands::Schedule {
            database,
            user,
            project_dir,
            log_file,
            dry_run,
        } => {
            let database = database.config()?;
            let project_dir = match project_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let settings = ScheduleSettings {
                user,
                project_dir,
                log_file,
                dry_run,
            };
            commands::schedule::run(&aws, &database, &settings)?;
        }
    }

    Ok(())
}
