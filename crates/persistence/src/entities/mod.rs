//! Entity definitions (database row mappings).

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

pub use campaign::CampaignEntity;
pub use email_event::EmailEventEntity;
pub use email_template::EmailTemplateEntity;
pub use invitation::InvitationEntity;
pub use pledge::PledgeEntity;
pub use reminder::ReminderEntity;
pub use scheduled_job::ScheduledJobEntity;
pub use sponsor::SponsorEntity;
pub use tenant::TenantEntity;
pub use user::UserEntity;
