//! Repository implementations.

pub mod campaign;
pub mod email_event;
pub mod email_template;
pub mod invitation;
pub mod pledge;
pub mod reminder;
pub mod scheduled_job;
pub mod sponsor;
pub mod tenant;
pub mod user;

pub use campaign::CampaignRepository;
pub use email_event::EmailEventRepository;
pub use email_template::EmailTemplateRepository;
pub use invitation::{
    calculate_invitation_expiry, generate_invitation_token, InvitationRepository, SweepRow,
};
pub use pledge::PledgeRepository;
pub use reminder::ReminderRepository;
pub use scheduled_job::ScheduledJobRepository;
pub use sponsor::SponsorRepository;
pub use tenant::TenantRepository;
pub use user::UserRepository;
