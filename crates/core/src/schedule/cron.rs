//! Cron job construction (Functional Core - pure data).

use std::fmt;

use thiserror::Error;

/// Errors that can occur while registering cron jobs.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("`{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("{name} contains a line break, which a crontab entry cannot hold")]
    LineBreak { name: String },
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

/// The five time fields of a crontab line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule {
    pub minute: String,
    pub hour: String,
    pub day_of_month: String,
    pub month: String,
    pub day_of_week: String,
}

impl CronSchedule {
    /// Every day at 00:00.
    pub fn daily_at_midnight() -> Self {
        Self {
            minute: "0".to_string(),
            hour: "0".to_string(),
            day_of_month: "*".to_string(),
            month: "*".to_string(),
            day_of_week: "*".to_string(),
        }
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.minute, self.hour, self.day_of_month, self.month, self.day_of_week
        )
    }
}

/// One crontab entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronJob {
    pub schedule: CronSchedule,
    pub command: String,
}

/// Renders the crontab line. Cron turns a bare `%` in the command into a
/// newline, so every `%` is written as `\%`.
impl fmt::Display for CronJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.schedule, self.command.replace('%', r"\%"))
    }
}

/// Destination for crontab entries of a principal.
pub trait Crontab {
    /// Replaces every entry of `user` with `jobs`.
    fn replace_all(&self, user: &str, jobs: &[CronJob]) -> Result<()>;
}

/// Builds the shell command line of a scheduled job.
///
/// Environment assignments come first, then the program and its arguments;
/// stdout and stderr are appended to `log_file`. Values holding a line
/// break are rejected.
pub fn build_job_command(
    env: &[(&str, &str)],
    program: &str,
    args: &[String],
    log_file: &str,
) -> Result<String> {
    for (key, value) in env {
        single_line(key, value)?;
    }
    single_line("program", program)?;
    for arg in args {
        single_line("argument", arg)?;
    }
    single_line("log file", log_file)?;

    let mut parts: Vec<String> = env
        .iter()
        .map(|(key, value)| format!("{}={}", key, shell_quote(value)))
        .collect();
    parts.push(shell_quote(program));
    parts.extend(args.iter().map(|arg| shell_quote(arg)));
    parts.push(format!(">> {} 2>&1", shell_quote(log_file)));
    Ok(parts.join(" "))
}

fn single_line(name: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(ScheduleError::LineBreak {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Renders a whole crontab file.
pub fn render_crontab(jobs: &[CronJob]) -> String {
    jobs.iter().map(|job| format!("{job}\n")).collect()
}

/// Quotes a word for POSIX `sh`. Plain words are left alone.
pub fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
