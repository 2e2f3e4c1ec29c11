//! Repository trait for persisted alias mappings.

use crate::domain::entities::Mapping;
use crate::error::AppError;
use async_trait::async_trait;
use std::fmt;

/// Identifies one of the two persisted mapping streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Short code to original URL.
    Forward,
    /// Original URL to short code.
    Reverse,
}

impl Stream {
    /// Both streams, in the order they are written.
    pub const ALL: [Stream; 2] = [Stream::Forward, Stream::Reverse];

    pub fn name(self) -> &'static str {
        match self {
            Stream::Forward => "forward",
            Stream::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Durable storage for alias mapping streams.
///
/// Every save is a full rewrite of one stream. There is no atomicity across
/// the two streams; callers write them as a matched pair.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonFileRepository`] - JSON files on disk
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_json_file.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Loads a stream.
    ///
    /// Never fails: a missing, unreadable or corrupt stream yields an empty
    /// mapping. Implementations log the reason.
    async fn load(&self, stream: Stream) -> Mapping;

    /// Replaces the stored content of a stream with `mapping`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the write fails.
    async fn save(&self, stream: Stream, mapping: &Mapping) -> Result<(), AppError>;
}
