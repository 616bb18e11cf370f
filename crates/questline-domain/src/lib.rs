//! Domain types shared across Questline crates.
//!
//! Pure types with no framework dependencies. Import in `usecase/` and
//! `domain/` layers; `infra/` converts to and from them at the boundary.

pub mod pagination;
pub mod status;
pub mod user;
