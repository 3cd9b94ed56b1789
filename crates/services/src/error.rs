//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;

/// Errors emitted by quiz sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no items available for quiz")]
    Empty,
    #[error("quiz already completed")]
    Completed,
}

/// Errors emitted while reading configuration from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid SAWADEE_MAX_QUESTIONS value: {raw}")]
    InvalidMaxQuestions { raw: String },
    #[error("invalid database url: {raw}")]
    InvalidDbUrl { raw: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
