//! Runtime configuration.
//!
//! Values come from CLI flags backed by environment variables (see `cli`).
//! The structs here hold the resolved values and are passed explicitly to
//! each command.

use std::fmt;
use std::path::{Path, PathBuf};

use moviesync::aws::ClientTarget;
use thiserror::Error;

pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";
pub const AWS_PROFILE: &str = "AWS_PROFILE";
pub const DYNAMODB_TABLE_NAME: &str = "DYNAMODB_TABLE_NAME";

pub const DB_HOST: &str = "TF_VAR_DB_HOST";
pub const DB_NAME: &str = "TF_VAR_DB_NAME";
pub const DB_USER: &str = "TF_VAR_USER_NAME";
pub const DB_PASSWORD: &str = "TF_VAR_PASSWORD";

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_TABLE_NAME: &str = "dynamodb";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_LOG_FILE: &str = "cron_log.log";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing env vars: {}", .names.join(", "))]
    MissingEnv { names: Vec<&'static str> },
}

/// Where the key-value table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    pub region: String,
    pub endpoint_url: Option<String>,
    pub profile: Option<String>,
    pub table_name: String,
}

impl AwsSettings {
    /// Short human description used in log lines.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(endpoint) => format!("{} @ {} ({})", self.table_name, endpoint, self.region),
            None => format!("{} ({})", self.table_name, self.region),
        }
    }

    /// Connection target of the SDK client.
    pub fn client_target(&self) -> ClientTarget<'_> {
        ClientTarget {
            region: &self.region,
            profile: self.profile.as_deref(),
            endpoint_url: self.endpoint_url.as_deref(),
        }
    }

    /// Flags that reproduce these settings on a later invocation.
    pub fn cli_args(&self) -> Vec<String> {
        let mut args = vec![
            "--region".to_string(),
            self.region.clone(),
            "--table-name".to_string(),
            self.table_name.clone(),
        ];
        if let Some(endpoint) = &self.endpoint_url {
            args.push("--endpoint-url".to_string());
            args.push(endpoint.clone());
        }
        if let Some(profile) = &self.profile {
            args.push("--profile".to_string());
            args.push(profile.clone());
        }
        args
    }
}

/// Connection settings of the relational store.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub port: u16,
}

impl DatabaseConfig {
    /// Validates the four required values.
    ///
    /// Missing and empty values are both reported, named by their
    /// environment variable, in a fixed order.
    pub fn from_parts(
        host: Option<String>,
        database: Option<String>,
        user: Option<String>,
        password: Option<String>,
        port: u16,
    ) -> Result<Self, ConfigError> {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());
        let (host, database, user, password) =
            (present(host), present(database), present(user), present(password));

        let missing: Vec<&'static str> = [
            (DB_HOST, host.is_none()),
            (DB_NAME, database.is_none()),
            (DB_USER, user.is_none()),
            (DB_PASSWORD, password.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        match (host, database, user, password) {
            (Some(host), Some(database), Some(user), Some(password)) => Ok(Self {
                host,
                database,
                user,
                password,
                port,
            }),
            _ => Err(ConfigError::MissingEnv { names: missing }),
        }
    }

    /// `NAME=value` pairs in the variable names the loader reads.
    pub fn env_assignments(&self) -> [(&'static str, &str); 4] {
        [
            (DB_HOST, self.host.as_str()),
            (DB_NAME, self.database.as_str()),
            (DB_USER, self.user.as_str()),
            (DB_PASSWORD, self.password.as_str()),
        ]
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("port", &self.port)
            .finish()
    }
}

/// Options of the cron registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSettings {
    pub user: String,
    pub project_dir: PathBuf,
    pub log_file: PathBuf,
    pub dry_run: bool,
}

impl ScheduleSettings {
    /// Log destination; relative paths are taken from the project directory.
    pub fn log_path(&self) -> PathBuf {
        resolve_under(&self.project_dir, &self.log_file)
    }
}

fn resolve_under(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
