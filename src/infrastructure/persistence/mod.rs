//! Mapping repository implementations.
//!
//! - [`JsonFileRepository`] - One JSON document per stream, replaced atomically

pub mod json_file_repository;

pub use json_file_repository::JsonFileRepository;
