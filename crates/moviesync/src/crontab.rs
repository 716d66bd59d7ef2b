//! System crontab adapter (Imperative Shell).

use std::io::Write;
use std::process::{Command, Stdio};

use moviesync_core::schedule::{render_crontab, CronJob, Crontab, Result, ScheduleError};

/// Installs entries with `crontab -u <user> -`.
#[derive(Debug, Clone)]
pub struct SystemCrontab {
    program: String,
}

impl Default for SystemCrontab {
    fn default() -> Self {
        Self {
            program: "crontab".to_string(),
        }
    }
}

impl SystemCrontab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses another executable in place of `crontab`.
    #[cfg(test)]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Crontab for SystemCrontab {
    fn replace_all(&self, user: &str, jobs: &[CronJob]) -> Result<()> {
        let table = render_crontab(jobs);

        let mut child = Command::new(&self.program)
            .args(["-u", user, "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(table.as_bytes())?;
        }

        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScheduleError::CommandFailed {
                command: format!("{} -u {} -", self.program, user),
                message: stderr.trim().to_string(),
            });
        }

        tracing::debug!(user, entries = jobs.len(), "Crontab replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_io_error() {
        let crontab = SystemCrontab::with_program("moviesync-no-such-crontab");
        let err = crontab.replace_all("ec2-user", &[]).unwrap_err();
        assert!(matches!(err, ScheduleError::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_error() {
        let crontab = SystemCrontab::with_program("false");
        assert!(crontab.replace_all("ec2-user", &[]).is_err());
    }
}
