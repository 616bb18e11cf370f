//! HTTP plumbing shared by Questline services.

pub mod config;
pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
