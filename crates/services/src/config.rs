//! Environment-driven configuration for the app services.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DB_URL_VAR: &str = "SAWADEE_DB_URL";
pub const MAX_QUESTIONS_VAR: &str = "SAWADEE_MAX_QUESTIONS";
pub const DEFAULT_DB_URL: &str = "sqlite://sawadee.sqlite3";
pub const DEFAULT_MAX_QUESTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_url: String,
    pub max_questions: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_url: normalize_sqlite_url(DEFAULT_DB_URL),
            max_questions: DEFAULT_MAX_QUESTIONS,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMaxQuestions` if the question count is not
    /// a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMaxQuestions` if the question count is not
    /// a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_url = lookup(DB_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_URL.to_string());

        let max_questions = match lookup(MAX_QUESTIONS_VAR) {
            None => DEFAULT_MAX_QUESTIONS,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => return Err(ConfigError::InvalidMaxQuestions { raw }),
            },
        };

        Ok(Self {
            db_url: normalize_sqlite_url(&db_url),
            max_questions,
        })
    }

    #[must_use]
    pub fn with_db_url(mut self, db_url: &str) -> Self {
        self.db_url = normalize_sqlite_url(db_url);
        self
    }

    #[must_use]
    pub fn with_max_questions(mut self, max_questions: usize) -> Self {
        self.max_questions = max_questions.max(1);
        self
    }
}

fn is_in_memory(url: &str) -> bool {
    url == "sqlite::memory:" || url.contains("mode=memory")
}

/// Turn `sqlite:relative.db` style URLs into absolute `sqlite://` URLs.
///
/// In-memory URLs and URLs already in `sqlite://` form are left untouched.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_in_memory(trimmed) || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file (and its parent directory) if it is missing.
///
/// # Errors
///
/// Returns `ConfigError::InvalidDbUrl` for non-file URLs and
/// `ConfigError::Io` if the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), ConfigError> {
    if is_in_memory(db_url) {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ConfigError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ConfigError::InvalidDbUrl {
            raw: db_url.to_string(),
        });
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.max_questions, 10);
        assert!(config.db_url.starts_with("sqlite://"));
        assert!(config.db_url.ends_with("sawadee.sqlite3"));
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (DB_URL_VAR, "sqlite::memory:"),
            (MAX_QUESTIONS_VAR, "25"),
        ]))
        .unwrap();
        assert_eq!(config.db_url, "sqlite::memory:");
        assert_eq!(config.max_questions, 25);
    }

    #[test]
    fn rejects_zero_or_garbage_question_counts() {
        for raw in ["0", "ten", "-3"] {
            let err = AppConfig::from_lookup(lookup(&[(MAX_QUESTIONS_VAR, raw)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidMaxQuestions { .. }));
        }
    }

    #[test]
    fn relative_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/sawadee.sqlite3");
        let path = url.strip_prefix("sqlite://").unwrap();
        assert!(Path::new(path).is_absolute());
        assert!(path.ends_with("data/sawadee.sqlite3"));
    }

    #[test]
    fn memory_urls_pass_through() {
        let url = "sqlite:file:quiz?mode=memory&cache=shared";
        assert_eq!(normalize_sqlite_url(url), url);
        assert!(prepare_sqlite_file(url).is_ok());
    }

    #[test]
    fn prepare_rejects_non_file_urls() {
        let err = prepare_sqlite_file("postgres://localhost/db").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDbUrl { .. }));
    }
}
