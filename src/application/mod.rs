//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations the harness
//! calls.
//!
//! - [`services::alias_store::AliasStore`] - Alias creation, lookup, clearing and persistence

pub mod services;
