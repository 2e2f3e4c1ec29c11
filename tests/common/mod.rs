#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use alias_store::prelude::*;

/// A file-backed store living in its own temporary directory.
pub struct TestStore {
    pub dir: TempDir,
    pub store: AliasStore<JsonFileRepository>,
}

pub fn test_config() -> Config {
    Config::default()
}

pub async fn open_store_at(dir: &Path, config: &Config) -> AliasStore<JsonFileRepository> {
    AliasStore::open(Arc::new(JsonFileRepository::new(dir)), config)
        .await
        .unwrap()
}

pub async fn create_test_store() -> TestStore {
    create_test_store_with(test_config()).await
}

pub async fn create_test_store_with(config: Config) -> TestStore {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store_at(dir.path(), &config).await;
    TestStore { dir, store }
}

/// Adds `url` and flushes, returning the new short code.
pub async fn store_url(store: &AliasStore<JsonFileRepository>, url: &str) -> String {
    let record = store.add_mapping(url).await.unwrap();
    store.flush().await.unwrap();
    record.code
}

pub fn test_urls(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://example.com/page/{i}")).collect()
}
