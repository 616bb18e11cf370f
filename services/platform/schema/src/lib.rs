//! sea-orm entities for the platform database.

pub mod challenges;
pub mod onboarding_steps;
pub mod submissions;
pub mod users;
