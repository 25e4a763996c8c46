//! Application services.

pub mod email;
pub mod invitation_issuer;
pub mod reminder_sweep;

pub use email::{EmailError, EmailMessage, EmailService};
pub use invitation_issuer::{InvitationIssuer, IssueContext, IssueError, IssueOutcome};
pub use reminder_sweep::{ReminderSweeper, SweepStats};
