//! Operator harness: the command surface over the alias store.
//!
//! - [`commands`] - Harness actions and their executor
//! - [`output`] - Terminal rendering of action outcomes
//! - [`menu`] - Interactive numbered menu
//!
//! # Usage
//!
//! ```bash
//! # Interactive menu
//! alias-store
//!
//! # One-shot commands
//! alias-store generate
//! alias-store store https://example.com/a https://example.com/b
//! alias-store store https://example.com/c --code promo
//! alias-store list
//! alias-store resolve-forward 'http://short.ly/Ab3!x'
//! alias-store resolve-reverse https://example.com/a
//! alias-store clear --yes
//! ```

pub mod commands;
pub mod menu;
pub mod output;

use crate::utils::url_validator::validate_url;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::{Action, Outcome, execute};

/// Bijective short-alias store for long URLs.
#[derive(Parser)]
#[command(name = "alias-store")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the persisted mapping streams (overrides DATA_DIR)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Run a single command instead of the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// One-shot commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print a freshly generated example code (not stored)
    Generate,

    /// Store one or more URLs
    Store {
        /// URLs to shorten
        #[arg(required = true, value_parser = parse_url)]
        urls: Vec<String>,

        /// Custom short code (only with a single URL)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// List every stored mapping
    List,

    /// Look up the original URL for a short code
    ResolveForward {
        /// Short code, including its prefix
        code: String,
    },

    /// Look up the short code for an original URL
    ResolveReverse {
        /// Original URL
        url: String,
    },

    /// Remove every mapping
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

fn parse_url(input: &str) -> Result<String, String> {
    validate_url(input).map_err(|e| e.to_string())
}
