pub mod challenge;
pub mod health;
pub mod onboarding;
pub mod submission;
pub mod user;
pub mod verify;
