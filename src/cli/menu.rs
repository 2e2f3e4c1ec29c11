//! Interactive numbered menu.
//!
//! Mirrors the one-shot commands. "Store" opens an entry session: URLs are
//! read one per line until an empty line, each is added as it is typed, and
//! the session is flushed once at the end.

use anyhow::Result;
use colored::*;
use dialoguer::{Confirm, Input, Select};

use crate::application::services::AliasStore;
use crate::cli::commands::{Action, execute};
use crate::cli::output::{render, render_error};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::url_validator::validate_url;

/// Menu entries, in display order.
const MENU_ITEMS: &[&str] = &[
    "Generate an example short URL",
    "Store URLs",
    "List all mappings",
    "Get an original URL from a short URL",
    "Get a short URL from an original URL",
    "Clear all mappings",
    "Exit",
];

/// Runs the menu until the operator chooses "Exit".
///
/// # Errors
///
/// Returns an error only if the terminal cannot be read; store failures are
/// printed and the loop continues.
pub async fn run<R: MappingRepository>(store: &AliasStore<R>) -> Result<()> {
    println!("{}", "URL Alias Store".bright_blue().bold());

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Choose an action")
            .items(MENU_ITEMS)
            .default(0)
            .interact()?;

        let action = match choice {
            0 => Action::GenerateExample,
            1 => {
                entry_session(store).await?;
                continue;
            }
            2 => Action::List,
            3 => {
                let code: String = Input::new()
                    .with_prompt("Short URL")
                    .interact_text()?;
                Action::ResolveForward(code.trim().to_string())
            }
            4 => {
                let url: String = Input::new()
                    .with_prompt("Original URL")
                    .interact_text()?;
                Action::ResolveReverse(url.trim().to_string())
            }
            5 => {
                let confirmed = Confirm::new()
                    .with_prompt("Remove every mapping? This cannot be undone")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("{}", "Cancelled".red());
                    continue;
                }
                Action::Clear
            }
            _ => {
                println!("{}", "Exiting".bright_black());
                return Ok(());
            }
        };

        print!("{}", render(&execute(store, action).await));
    }
}

/// Reads URLs until an empty line, adding each one, then flushes once.
async fn entry_session<R: MappingRepository>(store: &AliasStore<R>) -> Result<()> {
    println!(
        "{}",
        "Enter one URL per line, empty line to finish".bright_black()
    );

    let mut created = 0usize;
    loop {
        let line: String = Input::new()
            .with_prompt("URL")
            .allow_empty(true)
            .interact_text()?;

        if line.trim().is_empty() {
            break;
        }

        let result = match validate_url(&line) {
            Ok(url) => store.add_mapping(&url).await,
            Err(e) => Err(AppError::from(e)),
        };

        match result {
            Ok(record) => {
                created += 1;
                println!("  {} {}", "+".green(), record.code.bright_yellow());
            }
            Err(e) => println!("  {}", render_error(&e)),
        }
    }

    match store.flush().await {
        Ok(()) => println!("{} new mapping(s) saved", created.to_string().bold()),
        Err(e) => println!("{}", render_error(&e)),
    }

    Ok(())
}
