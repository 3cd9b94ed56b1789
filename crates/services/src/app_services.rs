use std::sync::Arc;

use storage::repository::Storage;
use tracing::debug;

use crate::config::{AppConfig, DEFAULT_MAX_QUESTIONS, prepare_sqlite_file};
use crate::error::AppServicesError;
use crate::familiarity_service::FamiliarityService;
use crate::progress_service::ProgressService;
use crate::sessions::QuizLoopService;
use crate::settings_service::SettingsService;
use crate::stats_service::StatsService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    stats: Arc<StatsService>,
    settings: Arc<SettingsService>,
    familiarity: Arc<FamiliarityService>,
    progress: Arc<ProgressService>,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database file cannot be prepared or
    /// storage initialization fails.
    pub async fn new_sqlite(config: &AppConfig) -> Result<Self, AppServicesError> {
        prepare_sqlite_file(&config.db_url)?;
        let storage = Storage::sqlite(&config.db_url).await?;
        debug!(db = %config.db_url, "opened sqlite storage");
        Ok(Self::from_storage(&storage, config.max_questions))
    }

    /// Build services over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_storage(&Storage::in_memory(), DEFAULT_MAX_QUESTIONS)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, max_questions: usize) -> Self {
        let stats = StatsService::new(Arc::clone(&storage.stats));
        let settings = SettingsService::new(Arc::clone(&storage.settings));
        let familiarity = Arc::new(FamiliarityService::new(stats.clone()));
        let progress = Arc::new(ProgressService::new(stats.clone()));
        let quiz_loop = Arc::new(
            QuizLoopService::new(stats.clone(), settings.clone()).with_max_questions(max_questions),
        );

        Self {
            stats: Arc::new(stats),
            settings: Arc::new(settings),
            familiarity,
            progress,
            quiz_loop,
        }
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn familiarity(&self) -> Arc<FamiliarityService> {
        Arc::clone(&self.familiarity)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
