//! Crontab that records what it is given.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use moviesync_core::schedule::{CronJob, Crontab, Result, ScheduleError};

#[derive(Debug, Clone, Default)]
pub struct RecordingCrontab {
    tables: Arc<Mutex<HashMap<String, Vec<CronJob>>>>,
}

impl RecordingCrontab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current entries of `user`.
    pub fn jobs(&self, user: &str) -> Vec<CronJob> {
        self.tables
            .lock()
            .map(|tables| tables.get(user).cloned().unwrap_or_default())
            .unwrap_or_default()
    }
}

impl Crontab for RecordingCrontab {
    fn replace_all(&self, user: &str, jobs: &[CronJob]) -> Result<()> {
        let mut tables = self.tables.lock().map_err(|e| ScheduleError::CommandFailed {
            command: "crontab".to_string(),
            message: e.to_string(),
        })?;
        tables.insert(user.to_string(), jobs.to_vec());
        Ok(())
    }
}
