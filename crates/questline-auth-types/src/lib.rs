//! Authenticated-identity resolution for Questline services.
//!
//! Provides bearer JWT validation and the `Identity` extractor.

pub mod identity;
pub mod token;
