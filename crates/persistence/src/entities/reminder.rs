//! Reminder entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{ReminderKind, ReminderStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the reminders table.
#[derive(Debug, Clone, FromRow)]
pub struct ReminderEntity {
    pub id: Uuid,
    pub invitation_id: Uuid,
    pub kind: String,
    pub scheduled_for: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl ReminderEntity {
    /// Parsed status; unknown values read as skipped.
    pub fn status(&self) -> ReminderStatus {
        ReminderStatus::parse(&self.status).unwrap_or(ReminderStatus::Skipped)
    }

    /// Parsed kind, when recognized.
    pub fn kind(&self) -> Option<ReminderKind> {
        ReminderKind::parse(&self.kind)
    }

    pub fn is_pending(&self) -> bool {
        self.status() == ReminderStatus::Pending
    }
}
