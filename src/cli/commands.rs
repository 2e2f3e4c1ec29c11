//! Harness actions and their executor.
//!
//! Every action yields an [`Outcome`]; failures are outcomes too, so a single
//! bad command never ends the harness loop.

use crate::application::services::{AliasStore, BatchOutcome};
use crate::cli::Commands;
use crate::domain::entities::{AliasRecord, NewAlias};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// A request from the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    GenerateExample,
    Store(Vec<NewAlias>),
    List,
    ResolveForward(String),
    ResolveReverse(String),
    Clear,
}

impl Action {
    /// Converts a one-shot subcommand. `Clear` confirmation is handled by the caller.
    pub fn from_command(command: Commands) -> Result<Self, AppError> {
        Ok(match command {
            Commands::Generate => Action::GenerateExample,
            Commands::Store { urls, code: None } => {
                Action::Store(urls.into_iter().map(NewAlias::generated).collect())
            }
            Commands::Store {
                mut urls,
                code: Some(code),
            } => {
                if urls.len() != 1 {
                    return Err(AppError::invalid_input(
                        "A custom code can only be used with a single URL",
                    ));
                }
                let url = urls.remove(0);
                Action::Store(vec![NewAlias::with_code(url, code)])
            }
            Commands::List => Action::List,
            Commands::ResolveForward { code } => Action::ResolveForward(code.trim().to_string()),
            Commands::ResolveReverse { url } => Action::ResolveReverse(url.trim().to_string()),
            Commands::Clear { .. } => Action::Clear,
        })
    }
}

/// What an action produced.
#[derive(Debug)]
pub enum Outcome {
    Example(String),
    Stored(BatchOutcome),
    /// Persisted mappings; `stale` when unflushed changes differ from them.
    Listed {
        records: Vec<AliasRecord>,
        stale: bool,
    },
    /// Forward lookup hit: the original URL.
    OriginalUrl(String),
    /// Reverse lookup hit: the short code.
    ShortCode(String),
    Cleared,
    Failed(AppError),
}

impl Outcome {
    /// Returns true if the action did not fully succeed.
    pub fn is_failure(&self) -> bool {
        match self {
            Outcome::Failed(_) => true,
            Outcome::Stored(batch) => batch.summary.failed > 0 || batch.flush_error.is_some(),
            _ => false,
        }
    }
}

/// Runs `action` against `store`.
pub async fn execute<R: MappingRepository>(store: &AliasStore<R>, action: Action) -> Outcome {
    match action {
        Action::GenerateExample => Outcome::Example(store.generate_code()),
        Action::Store(entries) => Outcome::Stored(store.store_batch(entries).await),
        Action::List => {
            let snapshot = store.snapshot().await;
            Outcome::Listed {
                records: snapshot.records(),
                stale: snapshot.stale,
            }
        }
        Action::ResolveForward(code) => match store.resolve_forward(&code).await {
            Ok(url) => Outcome::OriginalUrl(url),
            Err(e) => Outcome::Failed(e),
        },
        Action::ResolveReverse(url) => match store.resolve_reverse(&url).await {
            Ok(code) => Outcome::ShortCode(code),
            Err(e) => Outcome::Failed(e),
        },
        Action::Clear => match store.clear().await {
            Ok(()) => Outcome::Cleared,
            Err(e) => Outcome::Failed(e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::entities::Mapping;
    use crate::domain::repositories::MockMappingRepository;
    use std::sync::Arc;

    fn empty_store_repo() -> MockMappingRepository {
        let mut repo = MockMappingRepository::new();
        repo.expect_load().returning(|_| Mapping::new());
        repo
    }

    #[test]
    fn test_from_command_store_with_code() {
        let action = Action::from_command(Commands::Store {
            urls: vec!["https://a.com".into()],
            code: Some("promo".into()),
        })
        .unwrap();

        assert_eq!(
            action,
            Action::Store(vec![NewAlias::with_code("https://a.com", "promo")])
        );
    }

    #[test]
    fn test_from_command_code_needs_single_url() {
        let result = Action::from_command(Commands::Store {
            urls: vec!["https://a.com".into(), "https://b.com".into()],
            code: Some("promo".into()),
        });

        assert!(matches!(result, Err(AppError::InvalidInput { .. })));
    }

    #[test]
    fn test_from_command_trims_lookups() {
        let action = Action::from_command(Commands::ResolveForward {
            code: " http://short.ly/abcde ".into(),
        })
        .unwrap();
        assert_eq!(action, Action::ResolveForward("http://short.ly/abcde".into()));
    }

    #[tokio::test]
    async fn test_execute_generate_example_stores_nothing() {
        let mut repo = empty_store_repo();
        repo.expect_save().times(0);
        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();

        let outcome = execute(&store, Action::GenerateExample).await;

        match outcome {
            Outcome::Example(code) => assert!(store.generator().is_well_formed(&code)),
            other => panic!("expected example, got {other:?}"),
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_execute_resolve_miss_is_failure() {
        let store = AliasStore::open(Arc::new(empty_store_repo()), &Config::default()).await.unwrap();

        let outcome = execute(&store, Action::ResolveForward("http://short.ly/xxxxx".into())).await;

        assert!(outcome.is_failure());
        assert!(matches!(outcome, Outcome::Failed(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_execute_clear_failure_is_reported() {
        let mut repo = empty_store_repo();
        repo.expect_save()
            .returning(|_, _| Err(AppError::persistence("read-only")));
        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();

        let outcome = execute(&store, Action::Clear).await;

        assert!(matches!(
            outcome,
            Outcome::Failed(AppError::Persistence { .. })
        ));
    }

    #[tokio::test]
    async fn test_execute_store_duplicate_is_not_failure() {
        let mut repo = empty_store_repo();
        repo.expect_save().returning(|_, _| Ok(()));
        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();

        let outcome = execute(
            &store,
            Action::Store(vec!["https://a.com".into(), "https://a.com".into()]),
        )
        .await;

        assert!(!outcome.is_failure());
    }
}
