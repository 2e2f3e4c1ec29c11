//! Core domain entities.
//!
//! - [`AliasRecord`] - A short code and the URL it stands for
//! - [`NewAlias`] - Input for creating an alias
//! - [`Mapping`] - One direction of the alias mapping
//! - [`MappingSnapshot`] - Both directions read together

pub mod alias;

pub use alias::{AliasRecord, Mapping, MappingSnapshot, NewAlias};
