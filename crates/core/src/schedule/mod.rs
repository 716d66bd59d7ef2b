mod cron;

pub use cron::{
    build_job_command, render_crontab, shell_quote, CronJob, CronSchedule, Crontab, Result,
    ScheduleError,
};
