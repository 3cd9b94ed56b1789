use async_trait::async_trait;
use sawadee_core::model::{QuizDomain, SETTINGS_KEY, Settings, StatsMap};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::codec;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for per-domain answer statistics.
///
/// Every write replaces the whole mapping of a domain. There is no locking:
/// two writers doing read-modify-write concurrently can lose an increment.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Fetch the stored mapping for a domain.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored value is corrupt,
    /// or other storage errors. A domain with nothing stored yields `Ok(None)`.
    async fn load_stats(&self, domain: QuizDomain) -> Result<Option<StatsMap>, StorageError>;

    /// Replace the stored mapping for a domain.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the mapping cannot be stored.
    async fn save_stats(&self, domain: QuizDomain, stats: &StatsMap) -> Result<(), StorageError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch persisted settings, `Ok(None)` if never saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored value is corrupt.
    async fn get_settings(&self) -> Result<Option<Settings>, StorageError>;

    /// Persist settings, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the settings cannot be stored.
    async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError>;
}

/// Simple in-memory key/value store for testing and prototyping.
///
/// Values are kept as serialized JSON under the same keys the `SQLite`
/// adapter uses, so tests can plant raw (or corrupt) entries.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a raw value under `key`, bypassing serialization.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store lock is poisoned.
    pub fn put_raw(&self, key: impl Into<String>, value: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.into(), value.into());
        Ok(())
    }

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store lock is poisoned.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }
}

#[async_trait]
impl StatsRepository for InMemoryRepository {
    async fn load_stats(&self, domain: QuizDomain) -> Result<Option<StatsMap>, StorageError> {
        self.get_raw(&domain.storage_key())?
            .map(|raw| codec::decode_stats(&raw))
            .transpose()
    }

    async fn save_stats(&self, domain: QuizDomain, stats: &StatsMap) -> Result<(), StorageError> {
        let raw = codec::encode_stats(stats)?;
        self.put_raw(domain.storage_key(), raw)
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<Settings>, StorageError> {
        self.get_raw(SETTINGS_KEY)?
            .map(|raw| codec::decode_settings(&raw))
            .transpose()
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        let raw = codec::encode_settings(settings)?;
        self.put_raw(SETTINGS_KEY, raw)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub stats: Arc<dyn StatsRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let stats: Arc<dyn StatsRepository> = Arc::new(repo.clone());
        let settings: Arc<dyn SettingsRepository> = Arc::new(repo);
        Self { stats, settings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sawadee_core::model::AnswerStat;

    #[tokio::test]
    async fn round_trips_stats_per_domain() {
        let repo = InMemoryRepository::new();
        let mut stats = StatsMap::new();
        stats.record_answer("ก", true);
        stats.record_answer("ก", false);

        repo.save_stats(QuizDomain::InitialConsonant, &stats)
            .await
            .unwrap();

        let fetched = repo
            .load_stats(QuizDomain::InitialConsonant)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.get("ก"), Some(&AnswerStat::from_persisted(2, 1).unwrap()));

        // Domains never share a store.
        assert!(repo.load_stats(QuizDomain::FinalConsonant).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn writes_the_documented_json_layout() {
        let repo = InMemoryRepository::new();
        let mut stats = StatsMap::new();
        stats.record_answer("๓", true);
        repo.save_stats(QuizDomain::Number, &stats).await.unwrap();

        let raw = repo.get_raw("sawadee_number_stats_v1").unwrap().unwrap();
        assert_eq!(raw, r#"{"๓":{"attempts":1,"correct":1}}"#);
    }

    #[tokio::test]
    async fn corrupt_entry_is_a_serialization_error() {
        let repo = InMemoryRepository::new();
        repo.put_raw("sawadee_vowel_stats_v1", "{not json").unwrap();

        let err = repo.load_stats(QuizDomain::Vowel).await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn settings_round_trip() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_settings().await.unwrap().is_none());

        let settings = Settings::new().with_adaptive_learning(false);
        repo.save_settings(&settings).await.unwrap();
        assert_eq!(repo.get_settings().await.unwrap(), Some(settings));
    }
}
