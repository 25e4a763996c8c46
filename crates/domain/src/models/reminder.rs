//! Reminder domain models.
//!
//! Reminder rows are bookkeeping for the sweep: the exact-day threshold
//! computation decides when a reminder fires, the row records that it did
//! (or that a pledge made it moot).

use serde::{Deserialize, Serialize};

/// Reminder row status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Pending,
    Sent,
    Skipped,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderStatus::Pending => "pending",
            ReminderStatus::Sent => "sent",
            ReminderStatus::Skipped => "skipped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReminderStatus::Pending),
            "sent" => Some(ReminderStatus::Sent),
            "skipped" => Some(ReminderStatus::Skipped),
            _ => None,
        }
    }
}

/// Which reminder pass a row belongs to.
///
/// The kind doubles as the email template type looked up when firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    /// Follow-up 5 days after sending (campaigns without a deadline).
    Reminder5d,
    /// 10 days before the campaign deadline.
    Reminder10d,
    /// Job-configured offset scheduled at issuance.
    Scheduled,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::Reminder5d => "reminder_5d",
            ReminderKind::Reminder10d => "reminder_10d",
            ReminderKind::Scheduled => "scheduled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reminder_5d" => Some(ReminderKind::Reminder5d),
            "reminder_10d" => Some(ReminderKind::Reminder10d),
            "scheduled" => Some(ReminderKind::Scheduled),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_status_roundtrip() {
        for status in [
            ReminderStatus::Pending,
            ReminderStatus::Sent,
            ReminderStatus::Skipped,
        ] {
            assert_eq!(ReminderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ReminderStatus::parse("fired"), None);
    }

    #[test]
    fn test_reminder_kind_roundtrip() {
        for kind in [
            ReminderKind::Reminder5d,
            ReminderKind::Reminder10d,
            ReminderKind::Scheduled,
        ] {
            assert_eq!(ReminderKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ReminderKind::parse("reminder_3d"), None);
    }

    #[test]
    fn test_kind_matches_template_type_names() {
        assert_eq!(ReminderKind::Reminder5d.as_str(), "reminder_5d");
        assert_eq!(ReminderKind::Reminder10d.as_str(), "reminder_10d");
    }
}
