use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use sawadee_core::model::{QuizDomain, SETTINGS_KEY, Settings, StatsMap};

use super::SqliteRepository;
use crate::codec;
use crate::repository::{SettingsRepository, StatsRepository, StorageError};

impl SqliteRepository {
    /// Read the raw JSON document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the query fails.
    pub async fn get_entry(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_entries WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        row.try_get::<String, _>("value")
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Store a raw JSON document under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the write fails.
    pub async fn put_entry(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl StatsRepository for SqliteRepository {
    async fn load_stats(&self, domain: QuizDomain) -> Result<Option<StatsMap>, StorageError> {
        self.get_entry(&domain.storage_key())
            .await?
            .map(|raw| codec::decode_stats(&raw))
            .transpose()
    }

    async fn save_stats(&self, domain: QuizDomain, stats: &StatsMap) -> Result<(), StorageError> {
        let raw = codec::encode_stats(stats)?;
        self.put_entry(&domain.storage_key(), &raw).await
    }
}

#[async_trait]
impl SettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<Settings>, StorageError> {
        self.get_entry(SETTINGS_KEY)
            .await?
            .map(|raw| codec::decode_settings(&raw))
            .transpose()
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        let raw = codec::encode_settings(settings)?;
        self.put_entry(SETTINGS_KEY, &raw).await
    }
}
