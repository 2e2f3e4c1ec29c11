//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for persistence; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for testing.

pub mod mapping_repository;

pub use mapping_repository::{MappingRepository, Stream};

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
