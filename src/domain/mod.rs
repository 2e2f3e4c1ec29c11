//! Domain layer containing alias entities and the persistence contract.
//!
//! - [`entities`] - Alias records and mapping collections
//! - [`repositories`] - Storage trait definitions
//!
//! The domain layer has no dependencies on infrastructure or the harness.
//! Business rules live in [`crate::application::services`].

pub mod entities;
pub mod repositories;
