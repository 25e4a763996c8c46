//! Background jobs.

pub mod invitation_runner;
pub mod reminder_sweep_job;
pub mod scheduler;

use std::time::Duration;

use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::services::email::EmailService;
use crate::services::invitation_issuer::InvitationIssuer;
use crate::services::reminder_sweep::ReminderSweeper;

pub use scheduler::{Job, JobFrequency, JobScheduler};

/// Builds and starts the background scheduler, or returns `None` when
/// jobs are disabled by configuration.
pub fn start_background_jobs(config: &Config, pool: PgPool) -> Option<JobScheduler> {
    if !config.jobs.enabled {
        info!("Background jobs disabled by configuration");
        return None;
    }

    let email = EmailService::new(config.email.clone());
    let issuer = InvitationIssuer::new(
        pool.clone(),
        email.clone(),
        config.server.public_base_url.clone(),
        Duration::from_millis(config.jobs.sponsor_delay_ms),
    );
    let sweeper = ReminderSweeper::new(
        pool.clone(),
        email,
        config.server.public_base_url.clone(),
    );

    let mut scheduler = JobScheduler::new();
    scheduler.register(invitation_runner::InvitationJobRunner::new(
        pool,
        issuer,
        config.jobs.batch_size,
        config.jobs.runner_interval_secs,
    ));
    scheduler.register(reminder_sweep_job::ReminderSweepJob::new(
        sweeper,
        config.jobs.sweep_interval_secs,
    ));
    scheduler.start();

    Some(scheduler)
}
