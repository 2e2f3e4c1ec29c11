//! Terminal rendering of action outcomes.

use colored::*;
use std::fmt::Write as _;

use crate::application::services::{BatchOutcome, StoreItem};
use crate::cli::commands::Outcome;
use crate::error::AppError;

const CODE_HEADER: &str = "Short URL";

/// Renders an outcome as the text shown to the operator.
///
/// # Output Format
///
/// ```text
/// Stored 2 of 3 URLs
///   + http://short.ly/Ab3!x  https://example.com/a
///   = http://short.ly/Qq(9z  https://example.com/b  (already stored)
///   x not a url  Invalid URL format: relative URL without a base
/// ```
pub fn render(outcome: &Outcome) -> String {
    let mut out = String::new();

    match outcome {
        Outcome::Example(code) => {
            let _ = writeln!(out, "Example short URL: {}", code.bright_yellow().bold());
        }
        Outcome::Stored(batch) => render_batch(&mut out, batch),
        Outcome::Listed { records, stale } => {
            if *stale {
                let _ = writeln!(
                    out,
                    "{}",
                    "Unsaved changes pending: the list below is the last persisted state"
                        .yellow()
                );
            }

            if records.is_empty() {
                let _ = writeln!(out, "{}", "No mappings stored".yellow());
                return out;
            }

            let width = records
                .iter()
                .map(|r| r.code.chars().count())
                .chain(std::iter::once(CODE_HEADER.len()))
                .max()
                .unwrap_or(0);
            let _ = writeln!(
                out,
                "  {}  {}",
                format!("{CODE_HEADER:<width$}").bright_white().bold(),
                "Original URL".bright_white().bold(),
            );
            let _ = writeln!(out, "  {}", "─".repeat(width + 16).bright_black());
            for record in records {
                let _ = writeln!(
                    out,
                    "  {}  {}",
                    format!("{:<width$}", record.code).cyan(),
                    record.original_url
                );
            }
            let _ = writeln!(
                out,
                "\n  Total: {}",
                records.len().to_string().bright_white().bold()
            );
        }
        Outcome::OriginalUrl(url) => {
            let _ = writeln!(out, "Original URL: {}", url.bright_green());
        }
        Outcome::ShortCode(code) => {
            let _ = writeln!(out, "Short URL: {}", code.bright_green());
        }
        Outcome::Cleared => {
            let _ = writeln!(out, "{}", "Mapping cleared".green().bold());
        }
        Outcome::Failed(error) => {
            let _ = writeln!(out, "{}", render_error(error));
        }
    }

    out
}

/// One-line description of an error, colored by severity.
pub fn render_error(error: &AppError) -> ColoredString {
    match error {
        AppError::AlreadyExists { code } => format!("URL already stored as {code}").yellow(),
        AppError::NotFound { message } => format!("Not found: {message}").yellow(),
        AppError::NotPersisted { .. } => {
            format!("{error} (written on the next successful flush)").yellow()
        }
        _ => format!("Error [{}]: {error}", error.code()).red(),
    }
}

fn render_batch(out: &mut String, batch: &BatchOutcome) {
    let summary = batch.summary;
    let _ = writeln!(
        out,
        "Stored {} of {} URLs",
        summary.created.to_string().bright_white().bold(),
        summary.total
    );

    for item in &batch.items {
        let _ = match item {
            StoreItem::Created(record) => writeln!(
                out,
                "  {} {}  {}",
                "+".green(),
                record.code.bright_yellow(),
                record.original_url
            ),
            StoreItem::Existing(record) => writeln!(
                out,
                "  {} {}  {}  {}",
                "=".yellow(),
                record.code.bright_yellow(),
                record.original_url,
                "(already stored)".bright_black()
            ),
            StoreItem::Failed { input, error } => {
                writeln!(out, "  {} {}  {}", "x".red(), input, render_error(error))
            }
        };
    }

    if let Some(error) = &batch.flush_error {
        let _ = writeln!(out, "{}", render_error(error));
    }
}
