//! HTTP route handlers.

pub mod campaigns;
pub mod health;
pub mod jobs;
pub mod public_intake;
pub mod sponsors;
pub mod templates;
pub mod tenants;
