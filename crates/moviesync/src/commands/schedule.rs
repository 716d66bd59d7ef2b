//! `moviesync schedule`

use std::path::Path;

use anyhow::{Context, Result};
use moviesync_core::schedule::{build_job_command, render_crontab, CronJob, CronSchedule, Crontab};

use crate::config::{AwsSettings, DatabaseConfig, ScheduleSettings};
use crate::crontab::SystemCrontab;

pub fn run(aws: &AwsSettings, database: &DatabaseConfig, settings: &ScheduleSettings) -> Result<()> {
    let program = std::env::current_exe().context("Failed to locate the moviesync executable")?;
    let job = loader_job(&program, aws, database, &settings.log_path())
        .context("Failed to build the cron job")?;

    register(&SystemCrontab::new(), settings, &job)
}

/// The daily `load-rds` job, with the database variables inlined.
pub fn loader_job(
    program: &Path,
    aws: &AwsSettings,
    database: &DatabaseConfig,
    log_file: &Path,
) -> moviesync_core::schedule::Result<CronJob> {
    let mut args = aws.cli_args();
    args.push("load-rds".to_string());
    args.push("--db-port".to_string());
    args.push(database.port.to_string());

    let command = build_job_command(
        &database.env_assignments(),
        &program.to_string_lossy(),
        &args,
        &log_file.to_string_lossy(),
    )?;

    Ok(CronJob {
        schedule: CronSchedule::daily_at_midnight(),
        command,
    })
}

/// Replaces the user's crontab with `job`, or prints it on a dry run.
pub fn register(crontab: &dyn Crontab, settings: &ScheduleSettings, job: &CronJob) -> Result<()> {
    let jobs = std::slice::from_ref(job);

    if settings.dry_run {
        print!("{}", render_crontab(jobs));
        return Ok(());
    }

    crontab
        .replace_all(&settings.user, jobs)
        .with_context(|| format!("Failed to install the crontab of {}", settings.user))?;

    tracing::info!(user = %settings.user, schedule = %job.schedule, "Cron job scheduled");
    println!("Cron job scheduled successfully!");
    Ok(())
}
