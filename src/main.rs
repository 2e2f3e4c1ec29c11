use alias_store::application::services::AliasStore;
use alias_store::cli::{self, Action, Cli, Commands, Outcome};
use alias_store::config;
use alias_store::infrastructure::persistence::JsonFileRepository;
use alias_store::logging;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dialoguer::Confirm;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::Config::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    config.validate().context("Invalid configuration")?;

    logging::init(&config)?;
    config.print_summary();

    let repository = Arc::new(JsonFileRepository::new(&config.data_dir));
    let store = AliasStore::open(repository, &config)
        .await
        .context("Failed to open alias store")?;

    let code = match cli.command {
        Some(command) => run_once(&store, command).await?,
        None => {
            cli::menu::run(&store).await?;
            ExitCode::SUCCESS
        }
    };

    store.close().await.context("Failed to flush on shutdown")?;

    Ok(code)
}

/// Executes a single subcommand and prints its outcome.
async fn run_once(store: &AliasStore<JsonFileRepository>, command: Commands) -> Result<ExitCode> {
    if let Commands::Clear { yes: false } = command {
        let confirmed = Confirm::new()
            .with_prompt("Remove every mapping? This cannot be undone")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(ExitCode::SUCCESS);
        }
    }

    let outcome = match Action::from_command(command) {
        Ok(action) => cli::execute(store, action).await,
        Err(e) => Outcome::Failed(e),
    };

    print!("{}", cli::output::render(&outcome));

    Ok(if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
