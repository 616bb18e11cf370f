pub mod challenge;
pub mod onboarding;
pub mod submission;
pub mod user;
pub mod verify;
