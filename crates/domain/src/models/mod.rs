//! Domain models: request/response DTOs and status enums.

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

pub use campaign::{
    CampaignResponse, CreateCampaignRequest, PublicCampaignResponse, UpdateCampaignRequest,
};
pub use email_event::{EmailEventResponse, EmailEventType, ProviderEventRequest};
pub use email_template::{
    CreateTemplateRequest, TemplateResponse, TemplateType, UpdateTemplateRequest,
};
pub use invitation::{InvitationResponse, InvitationStatus, ListInvitationsQuery};
pub use pledge::{
    PledgeResponse, PledgeSource, PledgeStatus, SubmitPledgeRequest, SubmitPledgeResponse,
};
pub use reminder::{ReminderKind, ReminderStatus};
pub use scheduled_job::{
    InvitationJobPayload, JobResponse, JobStatus, JobType, ListJobsQuery,
    ScheduleInvitationJobRequest,
};
pub use sponsor::{CreateSponsorRequest, ImportSponsorsRequest, SponsorResponse, UpdateSponsorRequest};
pub use tenant::{CreateTenantRequest, TenantResponse, TenantStatus, UpdateTenantRequest};
pub use user::Role;
