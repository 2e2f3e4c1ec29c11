//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the store opens.
//! Environment variables are expected to be loaded already (e.g., via
//! `dotenvy::dotenv()` in `main.rs`).
//!
//! ```bash
//! export DATA_DIR="./data"
//! export BASE_PREFIX="http://short.ly/"
//! export CODE_LENGTH="5"
//! ```
//!
//! ## Optional Variables
//!
//! - `DATA_DIR` - Directory holding the persisted streams (default: `./data`)
//! - `BASE_PREFIX` - Prefix prepended to every short code (default: `http://short.ly/`)
//! - `CODE_LENGTH` - Random characters per code (default: 5, range: 1-64)
//! - `CODE_ALPHABET` - Characters codes are drawn from (default: letters, digits 1-9, `!@#$%^&*()`)
//! - `MAX_GENERATION_ATTEMPTS` - Collision retry budget (default: 10)
//! - `RUST_LOG` - Log level (default: `warn`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

/// Prefix prepended to every short code.
pub const DEFAULT_BASE_PREFIX: &str = "http://short.ly/";

/// Characters short codes are drawn from. The digit `0` is deliberately absent.
pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz123456789!@#$%^&*()";

/// Number of random characters after the prefix.
pub const DEFAULT_CODE_LENGTH: usize = 5;

pub const DEFAULT_MAX_GENERATION_ATTEMPTS: usize = 10;

const MAX_CODE_LENGTH: usize = 64;
const MAX_GENERATION_ATTEMPTS_LIMIT: usize = 10_000;

/// Store configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub base_prefix: String,
    pub code_length: usize,
    pub alphabet: String,
    /// Upper bound on collision retries before giving up with `CodeSpaceExhausted`.
    pub max_generation_attempts: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            base_prefix: DEFAULT_BASE_PREFIX.to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            alphabet: DEFAULT_ALPHABET.to_string(),
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let base_prefix = env::var("BASE_PREFIX").unwrap_or(defaults.base_prefix);
        let alphabet = env::var("CODE_ALPHABET").unwrap_or(defaults.alphabet);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let code_length = parse_var("CODE_LENGTH")?.unwrap_or(defaults.code_length);
        let max_generation_attempts =
            parse_var("MAX_GENERATION_ATTEMPTS")?.unwrap_or(defaults.max_generation_attempts);

        Ok(Self {
            data_dir,
            base_prefix,
            code_length,
            alphabet,
            max_generation_attempts,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `code_length` is outside 1-64
    /// - `alphabet` is empty, contains whitespace or repeats a character
    /// - `base_prefix` contains whitespace
    /// - `max_generation_attempts` is outside 1-10000
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.code_length == 0 || self.code_length > MAX_CODE_LENGTH {
            anyhow::bail!(
                "CODE_LENGTH must be between 1 and {}, got {}",
                MAX_CODE_LENGTH,
                self.code_length
            );
        }

        if self.alphabet.is_empty() {
            anyhow::bail!("CODE_ALPHABET must not be empty");
        }

        if self.alphabet.chars().any(char::is_whitespace) {
            anyhow::bail!("CODE_ALPHABET must not contain whitespace");
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.alphabet.chars().find(|c| !seen.insert(*c)) {
            anyhow::bail!("CODE_ALPHABET contains duplicate character '{}'", dup);
        }

        if self.base_prefix.chars().any(char::is_whitespace) {
            anyhow::bail!(
                "BASE_PREFIX must not contain whitespace, got '{}'",
                self.base_prefix
            );
        }

        if self.max_generation_attempts == 0
            || self.max_generation_attempts > MAX_GENERATION_ATTEMPTS_LIMIT
        {
            anyhow::bail!(
                "MAX_GENERATION_ATTEMPTS must be between 1 and {}, got {}",
                MAX_GENERATION_ATTEMPTS_LIMIT,
                self.max_generation_attempts
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Data directory: {}", self.data_dir.display());
        tracing::info!("  Base prefix: {}", self.base_prefix);
        tracing::info!("  Code length: {}", self.code_length);
        tracing::info!("  Alphabet size: {}", self.alphabet.chars().count());
        tracing::info!("  Max generation attempts: {}", self.max_generation_attempts);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses an optional numeric environment variable.
fn parse_var(name: &str) -> Result<Option<usize>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a non-negative integer, got '{raw}'")),
        Err(_) => Ok(None),
    }
}
