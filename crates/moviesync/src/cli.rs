//! CLI definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{
    AwsSettings, ConfigError, DatabaseConfig, AWS_ENDPOINT_URL, AWS_PROFILE, AWS_REGION, DB_HOST,
    DB_NAME, DB_PASSWORD, DB_USER, DEFAULT_DB_PORT, DEFAULT_LOG_FILE, DEFAULT_REGION,
    DEFAULT_TABLE_NAME, DYNAMODB_TABLE_NAME,
};

/// moviesync - Move the movie dataset between JSON, DynamoDB and Postgres
#[derive(Debug, Parser)]
#[command(name = "moviesync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub aws: AwsArgs,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a structural report of the dataset file
    Inspect {
        /// Path to the dataset file
        #[arg(long, default_value = "data.json")]
        data: PathBuf,

        /// Output format
        #[arg(long, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Load the dataset file into the DynamoDB table
    LoadDynamodb {
        /// Path to the dataset file
        #[arg(long, default_value = "data.json")]
        data: PathBuf,
    },

    /// Copy movies from the DynamoDB table into Postgres
    LoadRds {
        #[command(flatten)]
        database: DatabaseArgs,
    },

    /// Register a daily cron job running `load-rds`
    Schedule {
        #[command(flatten)]
        database: DatabaseArgs,

        /// Crontab owner
        #[arg(long, default_value = "ec2-user")]
        user: String,

        /// Project directory (defaults to the current directory)
        #[arg(long)]
        project_dir: Option<PathBuf>,

        /// Log file, relative to the project directory unless absolute
        #[arg(long, default_value = DEFAULT_LOG_FILE)]
        log_file: PathBuf,

        /// Print the crontab instead of installing it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable sections.
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Args)]
pub struct AwsArgs {
    /// AWS region
    #[arg(long, global = true, env = AWS_REGION, default_value = DEFAULT_REGION)]
    pub region: String,

    /// Custom endpoint (e.g. DynamoDB Local)
    #[arg(long, global = true, env = AWS_ENDPOINT_URL)]
    pub endpoint_url: Option<String>,

    /// Named AWS profile
    #[arg(long, global = true, env = AWS_PROFILE)]
    pub profile: Option<String>,

    /// DynamoDB table name
    #[arg(long, global = true, env = DYNAMODB_TABLE_NAME, default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,
}

impl AwsArgs {
    pub fn settings(&self) -> AwsSettings {
        AwsSettings {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            profile: self.profile.clone(),
            table_name: self.table_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// Postgres host
    #[arg(long, env = DB_HOST)]
    pub db_host: Option<String>,

    /// Database name
    #[arg(long, env = DB_NAME)]
    pub db_name: Option<String>,

    /// Database user
    #[arg(long, env = DB_USER)]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = DB_PASSWORD, hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database port
    #[arg(long, default_value_t = DEFAULT_DB_PORT)]
    pub db_port: u16,
}

impl DatabaseArgs {
    pub fn config(&self) -> Result<DatabaseConfig, ConfigError> {
        DatabaseConfig::from_parts(
            self.db_host.clone(),
            self.db_name.clone(),
            self.db_user.clone(),
            self.db_password.clone(),
            self.db_port,
        )
    }
}
