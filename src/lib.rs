//! # Alias Store
//!
//! A bijective short-alias store for long URLs with durable file persistence
//! and an operator command line.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Alias entities and the repository trait
//! - **Application Layer** ([`application`]) - The [`AliasStore`] service
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON file persistence
//! - **Harness** ([`cli`]) - One-shot commands and the interactive menu
//!
//! ## Guarantees
//!
//! - Every short code maps to exactly one URL and every URL to exactly one code
//! - Generated codes are `<prefix><N alphabet characters>`; collisions are
//!   retried a bounded number of times
//! - Additions are persisted in batches; clearing is persisted immediately
//! - Lookups always read the persisted state
//!
//! ## Quick Start
//!
//! ```bash
//! export DATA_DIR="./data"   # Optional
//!
//! cargo run                                   # interactive menu
//! cargo run -- store https://example.com/a    # one-shot
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod utils;

pub use application::services::AliasStore;
pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AliasStore, BatchOutcome, BatchSummary, StoreItem};
    pub use crate::config::Config;
    pub use crate::domain::entities::{AliasRecord, Mapping, MappingSnapshot, NewAlias};
    pub use crate::domain::repositories::{MappingRepository, Stream};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::JsonFileRepository;
}
