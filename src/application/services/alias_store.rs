//! Bijective alias store: code generation, mapping upkeep and persistence.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::domain::entities::{AliasRecord, Mapping, MappingSnapshot, NewAlias};
use crate::domain::repositories::{MappingRepository, Stream};
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;

/// In-memory working copy of both indices.
#[derive(Debug, Default)]
struct Indices {
    forward: Mapping,
    reverse: Mapping,
    /// Set when memory holds changes not yet written to the repository.
    dirty: bool,
}

/// Result of a single URL within a batch.
#[derive(Debug)]
pub enum StoreItem {
    Created(AliasRecord),
    /// The URL was already stored; carries the existing record.
    Existing(AliasRecord),
    Failed { input: String, error: AppError },
}

/// Summary statistics for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub created: usize,
    pub duplicates: usize,
    pub failed: usize,
}

/// Outcome of [`AliasStore::store_batch`].
#[derive(Debug)]
pub struct BatchOutcome {
    pub summary: BatchSummary,
    pub items: Vec<StoreItem>,
    /// Set when the end-of-batch flush failed. Items remain in memory.
    pub flush_error: Option<AppError>,
}

/// Owns the forward and reverse alias indices.
///
/// Writers (`add_mapping`, `add_mapping_with_code`, `flush`, `clear`) are
/// serialized behind the write side of a lock that also covers their storage
/// writes. Readers (`resolve_*`, `snapshot`) reload from the repository under
/// the read side, so they never observe a half-written pair.
///
/// Additions are kept in memory until [`AliasStore::flush`]; lookups always
/// read the persisted state.
pub struct AliasStore<R: MappingRepository> {
    repository: Arc<R>,
    generator: CodeGenerator,
    max_attempts: usize,
    state: RwLock<Indices>,
}

impl<R: MappingRepository> AliasStore<R> {
    /// Opens the store, loading both streams from `repository`.
    ///
    /// If the streams disagree, the forward stream wins and the pair is
    /// rebuilt from it; the repaired pair is written on the next flush.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the code alphabet is empty or the
    /// code length is zero.
    pub async fn open(repository: Arc<R>, config: &Config) -> Result<Self, AppError> {
        let generator = CodeGenerator::from_config(config)?;

        let forward = repository.load(Stream::Forward).await;
        let reverse = repository.load(Stream::Reverse).await;
        let mut snapshot = MappingSnapshot::new(forward, reverse);

        let dirty = if snapshot.is_bijective() {
            false
        } else {
            warn!(
                forward = snapshot.forward.len(),
                reverse = snapshot.reverse.len(),
                "Persisted streams are inconsistent, rebuilding from forward stream"
            );
            snapshot = MappingSnapshot::reconciled(&snapshot.forward);
            true
        };

        info!(entries = snapshot.len(), "Alias store opened");

        Ok(Self {
            repository,
            generator,
            max_attempts: config.max_generation_attempts,
            state: RwLock::new(Indices {
                forward: snapshot.forward,
                reverse: snapshot.reverse,
                dirty,
            }),
        })
    }

    pub fn generator(&self) -> &CodeGenerator {
        &self.generator
    }

    /// Generates a candidate code without storing anything.
    pub fn generate_code(&self) -> String {
        self.generator.generate()
    }

    /// Maps `original_url` to a freshly generated short code.
    ///
    /// The change is held in memory until the next [`Self::flush`].
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the URL is blank
    /// - [`AppError::AlreadyExists`] if the URL is already stored (carries its code)
    /// - [`AppError::CodeSpaceExhausted`] if no unused code was found within the retry budget
    pub async fn add_mapping(&self, original_url: &str) -> Result<AliasRecord, AppError> {
        ensure_not_blank(original_url, "URL")?;

        let mut state = self.state.write().await;
        if let Some(code) = state.reverse.get(original_url) {
            return Err(AppError::already_exists(code.clone()));
        }

        let code = self.unique_code(&state.forward)?;
        Ok(commit(&mut state, code, original_url))
    }

    /// Maps `original_url` to an operator-chosen code.
    ///
    /// `custom_code` may be given with or without the base prefix.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the URL is blank or the code is malformed
    /// - [`AppError::AlreadyExists`] if the URL is already stored
    /// - [`AppError::CodeTaken`] if the code is bound to another URL
    pub async fn add_mapping_with_code(
        &self,
        original_url: &str,
        custom_code: &str,
    ) -> Result<AliasRecord, AppError> {
        ensure_not_blank(original_url, "URL")?;
        let code = self.generator.custom_code(custom_code)?;

        let mut state = self.state.write().await;
        if let Some(existing) = state.reverse.get(original_url) {
            return Err(AppError::already_exists(existing.clone()));
        }
        if state.forward.contains_key(&code) {
            return Err(AppError::code_taken(code));
        }

        Ok(commit(&mut state, code, original_url))
    }

    /// Adds every entry as one session, then flushes once.
    ///
    /// Entries are processed independently; a failure does not stop the batch.
    /// Plain URLs (`&str`, `String`) get generated codes.
    pub async fn store_batch<I>(&self, entries: I) -> BatchOutcome
    where
        I: IntoIterator,
        I::Item: Into<NewAlias>,
    {
        let mut summary = BatchSummary::default();
        let mut items = Vec::new();

        for entry in entries {
            let entry = entry.into();
            summary.total += 1;

            let result = match &entry.custom_code {
                Some(code) => self.add_mapping_with_code(&entry.original_url, code).await,
                None => self.add_mapping(&entry.original_url).await,
            };

            match result {
                Ok(record) => {
                    summary.created += 1;
                    items.push(StoreItem::Created(record));
                }
                Err(AppError::AlreadyExists { code }) => {
                    summary.duplicates += 1;
                    items.push(StoreItem::Existing(AliasRecord::new(
                        code,
                        entry.original_url,
                    )));
                }
                Err(error) => {
                    summary.failed += 1;
                    items.push(StoreItem::Failed {
                        input: entry.original_url,
                        error,
                    });
                }
            }
        }

        let flush_error = self.flush().await.err();

        BatchOutcome {
            summary,
            items,
            flush_error,
        }
    }

    /// Writes both indices to the repository if there are unflushed changes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if either stream fails to save. The
    /// in-memory state is kept and the next flush retries.
    pub async fn flush(&self) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if !state.dirty {
            return Ok(());
        }

        self.persist(&state).await?;
        state.dirty = false;
        Ok(())
    }

    /// Looks up the original URL for `code` in the persisted forward stream.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if `code` is blank
    /// - [`AppError::NotPersisted`] if unflushed changes disagree with the
    ///   persisted entry (added, removed or rebound but not yet written)
    /// - [`AppError::NotFound`] otherwise
    pub async fn resolve_forward(&self, code: &str) -> Result<String, AppError> {
        ensure_not_blank(code, "Short code")?;

        let state = self.state.read().await;
        let forward = self.repository.load(Stream::Forward).await;

        match durable_entry(code, &forward, &state.forward, state.dirty)? {
            Some(url) => Ok(url.clone()),
            None => Err(AppError::not_found(format!("No URL stored for {code}"))),
        }
    }

    /// Looks up the short code for `original_url` in the persisted reverse stream.
    ///
    /// # Errors
    ///
    /// Same cases as [`Self::resolve_forward`].
    pub async fn resolve_reverse(&self, original_url: &str) -> Result<String, AppError> {
        ensure_not_blank(original_url, "URL")?;

        let state = self.state.read().await;
        let reverse = self.repository.load(Stream::Reverse).await;

        match durable_entry(original_url, &reverse, &state.reverse, state.dirty)? {
            Some(code) => Ok(code.clone()),
            None => Err(AppError::not_found(format!(
                "No short code stored for {original_url}"
            ))),
        }
    }

    /// Removes every mapping and persists the empty pair immediately.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the empty pair could not be written;
    /// memory is already empty and the next flush retries.
    pub async fn clear(&self) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let removed = state.forward.len();
        state.forward.clear();
        state.reverse.clear();
        state.dirty = true;

        self.persist(&state).await?;
        state.dirty = false;

        info!(removed, "Alias store cleared");
        Ok(())
    }

    /// Reads both persisted streams.
    ///
    /// The snapshot is marked stale when unflushed changes make it differ
    /// from memory, for example after a failed flush or clear.
    pub async fn snapshot(&self) -> MappingSnapshot {
        let state = self.state.read().await;
        let forward = self.repository.load(Stream::Forward).await;
        let reverse = self.repository.load(Stream::Reverse).await;

        let stale = state.dirty && (forward != state.forward || reverse != state.reverse);
        MappingSnapshot::new(forward, reverse).with_stale(stale)
    }

    /// Flushes pending changes before shutdown.
    pub async fn close(&self) -> Result<(), AppError> {
        self.flush().await?;
        debug!("Alias store closed");
        Ok(())
    }

    /// Number of mappings held in memory, flushed or not.
    pub async fn len(&self) -> usize {
        self.state.read().await.forward.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.forward.is_empty()
    }

    pub async fn has_pending_changes(&self) -> bool {
        self.state.read().await.dirty
    }

    /// Generates a code absent from `forward`, retrying up to the configured budget.
    fn unique_code(&self, forward: &Mapping) -> Result<String, AppError> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();
            if !forward.contains_key(&code) {
                return Ok(code);
            }
            debug!(attempt, "Short code collision, retrying");
        }

        warn!(
            attempts = self.max_attempts,
            entries = forward.len(),
            "Could not generate a unique short code"
        );
        Err(AppError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    async fn persist(&self, state: &Indices) -> Result<(), AppError> {
        for stream in Stream::ALL {
            let mapping = match stream {
                Stream::Forward => &state.forward,
                Stream::Reverse => &state.reverse,
            };
            if let Err(e) = self.repository.save(stream, mapping).await {
                error!(%stream, error = %e, "Failed to persist mapping stream");
                return Err(e);
            }
        }
        Ok(())
    }
}

fn ensure_not_blank(value: &str, what: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Returns the persisted entry for `key`, or `NotPersisted` if pending
/// changes make it disagree with memory.
fn durable_entry<'a>(
    key: &str,
    durable: &'a Mapping,
    memory: &Mapping,
    dirty: bool,
) -> Result<Option<&'a String>, AppError> {
    let entry = durable.get(key);
    if dirty && entry != memory.get(key) {
        return Err(AppError::not_persisted(key));
    }
    Ok(entry)
}

fn commit(state: &mut Indices, code: String, original_url: &str) -> AliasRecord {
    state.forward.insert(code.clone(), original_url.to_string());
    state.reverse.insert(original_url.to_string(), code.clone());
    state.dirty = true;
    AliasRecord::new(code, original_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use mockall::predicate::eq;

    fn test_config(alphabet: &str, code_length: usize, attempts: usize) -> Config {
        Config {
            alphabet: alphabet.to_string(),
            code_length,
            max_generation_attempts: attempts,
            ..Config::default()
        }
    }

    fn mapping(pairs: &[(&str, &str)]) -> Mapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn empty_repo() -> MockMappingRepository {
        let mut repo = MockMappingRepository::new();
        repo.expect_load().returning(|_| Mapping::new());
        repo
    }

    #[tokio::test]
    async fn test_open_loads_both_streams() {
        let mut repo = MockMappingRepository::new();
        repo.expect_load()
            .with(eq(Stream::Forward))
            .times(1)
            .returning(|_| mapping(&[("http://short.ly/abcde", "https://a.com")]));
        repo.expect_load()
            .with(eq(Stream::Reverse))
            .times(1)
            .returning(|_| mapping(&[("https://a.com", "http://short.ly/abcde")]));

        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(!store.has_pending_changes().await);
    }

    #[tokio::test]
    async fn test_open_reconciles_inconsistent_streams() {
        let mut repo = MockMappingRepository::new();
        repo.expect_load()
            .with(eq(Stream::Forward))
            .returning(|_| mapping(&[("c1", "u1"), ("c2", "u2")]));
        repo.expect_load()
            .with(eq(Stream::Reverse))
            .returning(|_| mapping(&[("u1", "c1")]));

        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert!(store.has_pending_changes().await);
    }

    #[tokio::test]
    async fn test_add_mapping_success() {
        let store = AliasStore::open(Arc::new(empty_repo()), &Config::default()).await.unwrap();

        let record = store.add_mapping("https://example.com/a").await.unwrap();

        assert!(store.generator().is_well_formed(&record.code));
        assert_eq!(record.original_url, "https://example.com/a");
        assert!(store.has_pending_changes().await);
    }

    #[tokio::test]
    async fn test_add_mapping_does_not_persist() {
        let mut repo = empty_repo();
        repo.expect_save().times(0);

        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();
        store.add_mapping("https://example.com/a").await.unwrap();
    }

    #[tokio::test]
    async fn test_add_mapping_deduplication() {
        let store = AliasStore::open(Arc::new(empty_repo()), &Config::default()).await.unwrap();

        let first = store.add_mapping("https://example.com/a").await.unwrap();
        let second = store.add_mapping("https://example.com/a").await;

        match second {
            Err(AppError::AlreadyExists { code }) => assert_eq!(code, first.code),
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_add_mapping_blank_url() {
        let store = AliasStore::open(Arc::new(empty_repo()), &Config::default()).await.unwrap();

        let result = store.add_mapping("  ").await;

        assert!(matches!(result, Err(AppError::InvalidInput { .. })));
        assert!(store.is_empty().await);
        assert!(!store.has_pending_changes().await);
    }

    #[tokio::test]
    async fn test_add_mapping_code_space_exhausted() {
        // One possible code: the second URL cannot get a fresh one.
        let config = test_config("x", 1, 10);
        let store = AliasStore::open(Arc::new(empty_repo()), &config).await.unwrap();

        let first = store.add_mapping("https://a.com").await.unwrap();
        assert_eq!(first.code, "http://short.ly/x");

        let result = store.add_mapping("https://b.com").await;
        assert!(matches!(
            result,
            Err(AppError::CodeSpaceExhausted { attempts: 10 })
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_add_mapping_retries_past_collisions() {
        // Two possible codes: the second URL must land on whichever is free.
        let config = test_config("ab", 1, 200);
        let store = AliasStore::open(Arc::new(empty_repo()), &config).await.unwrap();

        let first = store.add_mapping("https://a.com").await.unwrap();
        let second = store.add_mapping("https://b.com").await.unwrap();

        assert_ne!(first.code, second.code);
    }

    #[tokio::test]
    async fn test_add_mapping_with_custom_code() {
        let store = AliasStore::open(Arc::new(empty_repo()), &Config::default()).await.unwrap();

        let record = store
            .add_mapping_with_code("https://example.com", "promo")
            .await
            .unwrap();

        assert_eq!(record.code, "http://short.ly/promo");
    }

    #[tokio::test]
    async fn test_add_mapping_custom_code_taken() {
        let store = AliasStore::open(Arc::new(empty_repo()), &Config::default()).await.unwrap();
        store
            .add_mapping_with_code("https://a.com", "promo")
            .await
            .unwrap();

        let result = store.add_mapping_with_code("https://b.com", "promo").await;

        assert!(matches!(result, Err(AppError::CodeTaken { .. })));
    }

    #[tokio::test]
    async fn test_add_mapping_custom_code_url_exists() {
        let store = AliasStore::open(Arc::new(empty_repo()), &Config::default()).await.unwrap();
        let first = store.add_mapping("https://a.com").await.unwrap();

        let result = store.add_mapping_with_code("https://a.com", "promo").await;

        match result {
            Err(AppError::AlreadyExists { code }) => assert_eq!(code, first.code),
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_flush_saves_both_streams_once() {
        let mut repo = empty_repo();
        repo.expect_save()
            .withf(|stream, mapping| *stream == Stream::Forward && mapping.len() == 1)
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_save()
            .withf(|stream, mapping| *stream == Stream::Reverse && mapping.len() == 1)
            .times(1)
            .returning(|_, _| Ok(()));

        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();
        store.add_mapping("https://a.com").await.unwrap();

        store.flush().await.unwrap();
        // Nothing pending: second flush is a no-op.
        store.flush().await.unwrap();

        assert!(!store.has_pending_changes().await);
    }

    #[tokio::test]
    async fn test_flush_failure_keeps_changes_pending() {
        let mut repo = empty_repo();
        repo.expect_save()
            .returning(|_, _| Err(AppError::persistence("disk full")));

        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();
        let record = store.add_mapping("https://a.com").await.unwrap();

        let result = store.flush().await;
        assert!(matches!(result, Err(AppError::Persistence { .. })));
        assert!(store.has_pending_changes().await);

        // Lookups read durable state, which never received the entry.
        let lookup = store.resolve_forward(&record.code).await;
        assert!(matches!(lookup, Err(AppError::NotPersisted { .. })));
    }

    #[tokio::test]
    async fn test_resolve_forward_reads_repository() {
        let mut repo = MockMappingRepository::new();
        repo.expect_load()
            .with(eq(Stream::Forward))
            .returning(|_| mapping(&[("http://short.ly/zzzzz", "https://late.com")]));
        repo.expect_load()
            .with(eq(Stream::Reverse))
            .returning(|_| Mapping::new());

        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();

        let url = store.resolve_forward("http://short.ly/zzzzz").await.unwrap();
        assert_eq!(url, "https://late.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let store = AliasStore::open(Arc::new(empty_repo()), &Config::default()).await.unwrap();

        assert!(matches!(
            store.resolve_forward("http://short.ly/nope1").await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            store.resolve_reverse("https://nope.com").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_blank_input() {
        let store = AliasStore::open(Arc::new(empty_repo()), &Config::default()).await.unwrap();

        assert!(matches!(
            store.resolve_forward("").await,
            Err(AppError::InvalidInput { .. })
        ));
        assert!(matches!(
            store.resolve_reverse(" ").await,
            Err(AppError::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_clear_persists_empty_pair() {
        let mut repo = MockMappingRepository::new();
        repo.expect_load()
            .with(eq(Stream::Forward))
            .returning(|_| mapping(&[("c1", "u1")]));
        repo.expect_load()
            .with(eq(Stream::Reverse))
            .returning(|_| mapping(&[("u1", "c1")]));
        repo.expect_save()
            .withf(|_, mapping| mapping.is_empty())
            .times(2)
            .returning(|_, _| Ok(()));

        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.is_empty().await);
        assert!(!store.has_pending_changes().await);
    }

    #[tokio::test]
    async fn test_failed_clear_marks_reads_stale() {
        let mut repo = MockMappingRepository::new();
        repo.expect_load()
            .with(eq(Stream::Forward))
            .returning(|_| mapping(&[("c1", "u1")]));
        repo.expect_load()
            .with(eq(Stream::Reverse))
            .returning(|_| mapping(&[("u1", "c1")]));
        repo.expect_save()
            .returning(|_, _| Err(AppError::persistence("read-only")));

        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();
        assert!(matches!(
            store.clear().await,
            Err(AppError::Persistence { .. })
        ));
        assert!(store.is_empty().await);

        // Disk still holds the cleared pair; it must not read as a normal hit.
        assert!(matches!(
            store.resolve_forward("c1").await,
            Err(AppError::NotPersisted { .. })
        ));
        assert!(matches!(
            store.resolve_reverse("u1").await,
            Err(AppError::NotPersisted { .. })
        ));

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.stale);
    }

    #[tokio::test]
    async fn test_pending_changes_keep_unrelated_reads_fresh() {
        let mut repo = MockMappingRepository::new();
        repo.expect_load()
            .with(eq(Stream::Forward))
            .returning(|_| mapping(&[("c1", "u1")]));
        repo.expect_load()
            .with(eq(Stream::Reverse))
            .returning(|_| mapping(&[("u1", "c1")]));

        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();
        store.add_mapping("https://pending.com").await.unwrap();

        assert_eq!(store.resolve_forward("c1").await.unwrap(), "u1");
        assert!(matches!(
            store.resolve_forward("c2").await,
            Err(AppError::NotFound { .. })
        ));
        assert!(store.snapshot().await.stale);
    }

    #[tokio::test]
    async fn test_snapshot_in_sync_is_not_stale() {
        let store = AliasStore::open(Arc::new(empty_repo()), &Config::default())
            .await
            .unwrap();

        assert!(!store.snapshot().await.stale);
    }

    #[tokio::test]
    async fn test_open_rejects_empty_alphabet() {
        let config = test_config("", 5, 10);

        let result = AliasStore::open(Arc::new(empty_repo()), &config).await;

        assert!(matches!(result, Err(AppError::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_store_batch_summary() {
        let mut repo = empty_repo();
        repo.expect_save().times(2).returning(|_, _| Ok(()));

        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();
        let outcome = store
            .store_batch(["https://a.com", "https://b.com", "https://a.com", ""])
            .await;

        assert_eq!(
            outcome.summary,
            BatchSummary {
                total: 4,
                created: 2,
                duplicates: 1,
                failed: 1,
            }
        );
        assert!(outcome.flush_error.is_none());
        assert!(matches!(outcome.items[2], StoreItem::Existing(_)));
        assert!(matches!(outcome.items[3], StoreItem::Failed { .. }));
    }

    #[tokio::test]
    async fn test_store_batch_with_custom_codes() {
        let mut repo = empty_repo();
        repo.expect_save().times(2).returning(|_, _| Ok(()));

        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();
        let outcome = store
            .store_batch([
                NewAlias::with_code("https://a.com", "promo"),
                NewAlias::with_code("https://b.com", "promo"),
            ])
            .await;

        assert_eq!(outcome.summary.created, 1);
        assert_eq!(outcome.summary.failed, 1);
        match &outcome.items[1] {
            StoreItem::Failed { input, error } => {
                assert_eq!(input, "https://b.com");
                assert!(matches!(error, AppError::CodeTaken { .. }));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_store_batch_reports_flush_error() {
        let mut repo = empty_repo();
        repo.expect_save()
            .returning(|_, _| Err(AppError::persistence("read-only")));

        let store = AliasStore::open(Arc::new(repo), &Config::default()).await.unwrap();
        let outcome = store.store_batch(vec!["https://a.com".to_string()]).await;

        assert_eq!(outcome.summary.created, 1);
        assert!(matches!(
            outcome.flush_error,
            Some(AppError::Persistence { .. })
        ));
    }
}
