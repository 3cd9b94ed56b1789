use std::sync::Arc;

use sawadee_core::model::{QuizDomain, SETTINGS_KEY, Settings};
use storage::repository::SettingsRepository;
use tracing::warn;

/// Persisted learner preferences, with defaults whenever storage lets us down.
#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted settings, or defaults if missing or unreadable.
    pub async fn load(&self) -> Settings {
        match self.repo.get_settings().await {
            Ok(settings) => settings.unwrap_or_default(),
            Err(err) => {
                warn!(key = SETTINGS_KEY, error = %err, "failed to load settings, using defaults");
                Settings::default()
            }
        }
    }

    /// Persist settings. Failures are logged and dropped.
    pub async fn save(&self, settings: &Settings) {
        if let Err(err) = self.repo.save_settings(settings).await {
            warn!(key = SETTINGS_KEY, error = %err, "failed to save settings");
        }
    }

    /// Toggle weighted selection and return the stored settings.
    pub async fn set_adaptive_learning(&self, enabled: bool) -> Settings {
        let settings = self.load().await.with_adaptive_learning(enabled);
        self.save(&settings).await;
        settings
    }

    /// Item groups the learner limited a domain to; empty means every group.
    pub async fn group_filter(&self, domain: QuizDomain) -> Vec<String> {
        self.load().await.group_filter(domain).to_vec()
    }

    pub async fn set_group_filter(&self, domain: QuizDomain, groups: Vec<String>) -> Settings {
        let settings = self.load().await.with_group_filter(domain, groups);
        self.save(&settings).await;
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    fn service() -> (InMemoryRepository, SettingsService) {
        let repo = InMemoryRepository::new();
        let service = SettingsService::new(Arc::new(repo.clone()));
        (repo, service)
    }

    #[tokio::test]
    async fn adaptive_learning_defaults_to_on() {
        let (_, service) = service();
        assert!(service.load().await.adaptive_learning());
    }

    #[tokio::test]
    async fn toggles_are_persisted() {
        let (repo, service) = service();
        service.set_adaptive_learning(false).await;
        assert!(!service.load().await.adaptive_learning());

        let raw = repo.get_raw(SETTINGS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"adaptiveLearning\":false"));
    }

    #[tokio::test]
    async fn corrupt_settings_fall_back_to_defaults() {
        let (repo, service) = service();
        repo.put_raw(SETTINGS_KEY, "not json").unwrap();
        assert_eq!(service.load().await, Settings::default());
    }

    #[tokio::test]
    async fn group_filters_are_kept_per_domain() {
        let (_, service) = service();
        service
            .set_group_filter(QuizDomain::InitialConsonant, vec!["mid".into(), "high".into()])
            .await;

        assert_eq!(
            service.group_filter(QuizDomain::InitialConsonant).await,
            vec!["mid".to_string(), "high".to_string()]
        );
        assert!(service.group_filter(QuizDomain::Vowel).await.is_empty());

        // Filters survive toggling other settings.
        service.set_adaptive_learning(false).await;
        assert_eq!(service.group_filter(QuizDomain::InitialConsonant).await.len(), 2);
    }
}
