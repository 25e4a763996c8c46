//! Exact-day reminder threshold behavior, exercised the way the sweep
//! evaluates rows.

use chrono::{Duration, Utc};
use persistence::repositories::SweepRow;
use sponsor_manager_api::services::reminder_sweep::{deadline_reminder_due, follow_up_due};
use uuid::Uuid;

fn sweep_row() -> SweepRow {
    SweepRow {
        invitation_id: Uuid::new_v4(),
        campaign_id: Uuid::new_v4(),
        sponsor_id: Uuid::new_v4(),
        tenant_id: Uuid::new_v4(),
        email: "claire@boulangerie-martin.fr".to_string(),
        token: "JCdhsQ4tPmXw8rBn5kVfL2yTgZa7NeHp".to_string(),
        invitation_created_at: Utc::now(),
        deadline: None,
        campaign_title: "Panneau LED".to_string(),
        company: "Boulangerie Martin".to_string(),
        contact_name: None,
    }
}

#[test]
fn follow_up_fires_only_through_the_fifth_day_window() {
    let now = Utc::now();
    let mut row = sweep_row();

    // every hour of day 5 matches
    for hours in [0, 6, 12, 23] {
        row.invitation_created_at = now - Duration::days(5) - Duration::hours(hours);
        assert!(follow_up_due(&row, now), "hour {} of day 5", hours);
    }

    // day 4 and day 6 never match
    row.invitation_created_at = now - Duration::days(4) - Duration::hours(23);
    assert!(!follow_up_due(&row, now));
    row.invitation_created_at = now - Duration::days(6) - Duration::hours(1);
    assert!(!follow_up_due(&row, now));
}

#[test]
fn deadline_reminder_fires_only_with_ten_whole_days_left() {
    let now = Utc::now();
    let mut row = sweep_row();

    for hours in [1, 6, 12, 23] {
        row.deadline = Some(now + Duration::days(10) + Duration::hours(hours));
        assert!(deadline_reminder_due(&row, now), "hour {} of day 10", hours);
    }

    row.deadline = Some(now + Duration::days(9) + Duration::hours(23));
    assert!(!deadline_reminder_due(&row, now));
    row.deadline = Some(now + Duration::days(11) + Duration::hours(1));
    assert!(!deadline_reminder_due(&row, now));
}

#[test]
fn deadline_reminder_needs_a_deadline() {
    let row = sweep_row();
    assert!(!deadline_reminder_due(&row, Utc::now()));
}
