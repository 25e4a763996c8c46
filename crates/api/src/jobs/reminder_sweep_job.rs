//! Reminder sweep background job.
//!
//! Periodic wrapper around the sweeper. The interval must stay well under
//! 24 hours: reminders match on exact day counts and missed windows are
//! not caught up.

use metrics::counter;

use super::scheduler::{Job, JobFrequency};
use crate::services::reminder_sweep::ReminderSweeper;

/// Background job that runs the reminder sweep.
pub struct ReminderSweepJob {
    sweeper: ReminderSweeper,
    interval_secs: u64,
}

impl ReminderSweepJob {
    /// Creates a new sweep job.
    pub fn new(sweeper: ReminderSweeper, interval_secs: u64) -> Self {
        Self {
            sweeper,
            interval_secs,
        }
    }
}

#[async_trait::async_trait]
impl Job for ReminderSweepJob {
    fn name(&self) -> &'static str {
        "reminder_sweep"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(self.interval_secs)
    }

    async fn execute(&self) -> Result<(), String> {
        let stats = self
            .sweeper
            .run()
            .await
            .map_err(|e| format!("Reminder sweep failed: {}", e))?;

        counter!("reminders_sent_total", "kind" => "reminder_5d")
            .increment(stats.sent_follow_up as u64);
        counter!("reminders_sent_total", "kind" => "reminder_10d")
            .increment(stats.sent_deadline as u64);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_sweep_interval_stays_under_a_day() {
        // exact-day matching: a pass must run within every 24h window
        let interval = JobFrequency::Seconds(3600);
        assert!(interval.duration() < Duration::from_secs(86400));
    }
}
