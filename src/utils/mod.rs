//! Utility functions for code generation and URL validation.
//!
//! - [`code_generator`] - Short code generation and custom code validation
//! - [`url_validator`] - URL syntax checks at the harness boundary

pub mod code_generator;
pub mod url_validator;

pub use code_generator::CodeGenerator;
pub use url_validator::validate_url;
