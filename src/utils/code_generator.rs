//! Short code generation and validation utilities.
//!
//! Produces candidate codes of the form `<base prefix><N alphabet characters>`
//! and validates operator-supplied custom codes against the same alphabet.

use crate::config::Config;
use crate::error::AppError;
use rand::Rng;

/// Longest custom code an operator may choose (excluding the prefix).
pub const MAX_CUSTOM_CODE_LENGTH: usize = 32;

/// Generates and checks short codes for a fixed prefix, alphabet and length.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    base_prefix: String,
    alphabet: Vec<char>,
    code_length: usize,
}

impl CodeGenerator {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if `alphabet` is empty or
    /// `code_length` is zero.
    pub fn new(
        base_prefix: impl Into<String>,
        alphabet: &str,
        code_length: usize,
    ) -> Result<Self, AppError> {
        if alphabet.is_empty() {
            return Err(AppError::invalid_input("Code alphabet must not be empty"));
        }
        if code_length == 0 {
            return Err(AppError::invalid_input("Code length must be at least 1"));
        }

        Ok(Self {
            base_prefix: base_prefix.into(),
            alphabet: alphabet.chars().collect(),
            code_length,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.base_prefix, &config.alphabet, config.code_length)
    }

    pub fn base_prefix(&self) -> &str {
        &self.base_prefix
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Generates a candidate code.
    ///
    /// Characters are drawn uniformly, with replacement. The result is not
    /// guaranteed to be unused; callers retry on collision.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let generator = CodeGenerator::new("http://short.ly/", "abc", 5)?;
    /// let code = generator.generate();
    /// assert!(code.starts_with("http://short.ly/"));
    /// ```
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        let mut code = String::with_capacity(self.base_prefix.len() + self.code_length * 4);
        code.push_str(&self.base_prefix);

        for _ in 0..self.code_length {
            let idx = rng.random_range(0..self.alphabet.len());
            code.push(self.alphabet[idx]);
        }

        code
    }

    /// Returns true if `code` has the shape of a generated code.
    pub fn is_well_formed(&self, code: &str) -> bool {
        match code.strip_prefix(self.base_prefix.as_str()) {
            Some(suffix) => {
                suffix.chars().count() == self.code_length
                    && suffix.chars().all(|c| self.alphabet.contains(&c))
            }
            None => false,
        }
    }

    /// Validates an operator-supplied custom code and returns it with the prefix applied.
    ///
    /// The prefix is optional on input: both `promo` and `http://short.ly/promo`
    /// yield `http://short.ly/promo`.
    ///
    /// # Rules
    ///
    /// - Length: 1-32 characters after the prefix
    /// - Allowed characters: the configured alphabet
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if any rule is violated.
    pub fn custom_code(&self, input: &str) -> Result<String, AppError> {
        let trimmed = input.trim();
        let suffix = trimmed
            .strip_prefix(self.base_prefix.as_str())
            .unwrap_or(trimmed);

        let len = suffix.chars().count();
        if len == 0 || len > MAX_CUSTOM_CODE_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Custom code must be 1-{MAX_CUSTOM_CODE_LENGTH} characters, got {len}"
            )));
        }

        if let Some(bad) = suffix.chars().find(|c| !self.alphabet.contains(c)) {
            return Err(AppError::invalid_input(format!(
                "Custom code contains character '{bad}' outside the code alphabet"
            )));
        }

        Ok(format!("{}{}", self.base_prefix, suffix))
    }
}
