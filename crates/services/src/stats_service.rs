use std::sync::Arc;

use sawadee_core::model::{AnswerStat, QuizDomain, StatsMap, correct_percentage};
use sawadee_core::weighting;
use storage::repository::StatsRepository;
use tracing::{debug, warn};

/// Fail-soft access to per-domain answer statistics.
///
/// Storage failures never reach the caller: reads fall back to an empty
/// mapping and writes are dropped, both logged at `warn`.
#[derive(Clone)]
pub struct StatsService {
    repo: Arc<dyn StatsRepository>,
}

impl StatsService {
    #[must_use]
    pub fn new(repo: Arc<dyn StatsRepository>) -> Self {
        Self { repo }
    }

    /// Full mapping for a domain, empty if nothing is stored or it is unreadable.
    pub async fn load_stats(&self, domain: QuizDomain) -> StatsMap {
        match self.repo.load_stats(domain).await {
            Ok(stats) => stats.unwrap_or_default(),
            Err(err) => {
                warn!(
                    domain = %domain,
                    key = %domain.storage_key(),
                    error = %err,
                    "failed to load answer stats, using empty stats"
                );
                StatsMap::new()
            }
        }
    }

    /// Replace the stored mapping for a domain. Failures are logged and dropped.
    pub async fn save_stats(&self, domain: QuizDomain, stats: &StatsMap) {
        if let Err(err) = self.repo.save_stats(domain, stats).await {
            warn!(
                domain = %domain,
                key = %domain.storage_key(),
                error = %err,
                "failed to save answer stats"
            );
        }
    }

    /// Count one answer for `item_key` and persist the whole domain mapping.
    ///
    /// Returns the updated stat. Concurrent calls for the same domain may
    /// lose an increment.
    pub async fn record_answer(
        &self,
        domain: QuizDomain,
        item_key: &str,
        is_correct: bool,
    ) -> AnswerStat {
        let mut stats = self.load_stats(domain).await;
        let updated = stats.record_answer(item_key, is_correct);
        self.save_stats(domain, &stats).await;
        debug!(
            domain = %domain,
            item = item_key,
            is_correct,
            attempts = updated.attempts(),
            correct = updated.correct(),
            "recorded answer"
        );
        updated
    }

    pub async fn get_stat(&self, domain: QuizDomain, item_key: &str) -> Option<AnswerStat> {
        self.load_stats(domain).await.get(item_key).copied()
    }

    /// Correct share in percent, `None` without attempts.
    #[must_use]
    pub fn get_correct_percentage(stat: Option<&AnswerStat>) -> Option<f64> {
        correct_percentage(stat)
    }

    /// Percentage shown on an item's familiarity badge.
    pub async fn familiarity_percentage(&self, domain: QuizDomain, item_key: &str) -> Option<f64> {
        let stat = self.get_stat(domain, item_key).await;
        Self::get_correct_percentage(stat.as_ref())
    }

    /// Selection weight of a single item.
    pub async fn calculate_weight(&self, domain: QuizDomain, item_key: &str) -> f64 {
        let stat = self.get_stat(domain, item_key).await;
        weighting::calculate_weight(stat.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storage::repository::{InMemoryRepository, StorageError};

    fn service() -> (InMemoryRepository, StatsService) {
        let repo = InMemoryRepository::new();
        let service = StatsService::new(Arc::new(repo.clone()));
        (repo, service)
    }

    #[derive(Default)]
    struct UnavailableRepo {
        writes: AtomicUsize,
    }

    #[async_trait]
    impl StatsRepository for UnavailableRepo {
        async fn load_stats(&self, _domain: QuizDomain) -> Result<Option<StatsMap>, StorageError> {
            Err(StorageError::Connection("storage disabled".into()))
        }

        async fn save_stats(&self, _domain: QuizDomain, _stats: &StatsMap) -> Result<(), StorageError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::Connection("storage disabled".into()))
        }
    }

    #[tokio::test]
    async fn counts_every_answer() {
        let (_, service) = service();
        let answers = [true, false, true, true, false];
        for is_correct in answers {
            service
                .record_answer(QuizDomain::InitialConsonant, "ก", is_correct)
                .await;
        }

        let stat = service
            .get_stat(QuizDomain::InitialConsonant, "ก")
            .await
            .unwrap();
        assert_eq!(stat.attempts(), 5);
        assert_eq!(stat.correct(), 3);
        assert!(stat.correct() <= stat.attempts());
    }

    #[tokio::test]
    async fn first_answer_starts_from_zero() {
        let (_, service) = service();
        let stat = service.record_answer(QuizDomain::Vowel, "า", false).await;
        assert_eq!((stat.attempts(), stat.correct()), (1, 0));
        assert_eq!(
            service.familiarity_percentage(QuizDomain::Vowel, "า").await,
            Some(0.0)
        );
    }

    #[tokio::test]
    async fn corrupt_entry_reads_as_empty() {
        let (repo, service) = service();
        repo.put_raw(QuizDomain::Word.storage_key(), "{broken").unwrap();

        assert!(service.load_stats(QuizDomain::Word).await.is_empty());
        assert_eq!(service.calculate_weight(QuizDomain::Word, "น้ำ").await, 1.0);
    }

    #[tokio::test]
    async fn corrupt_entry_is_replaced_by_next_answer() {
        let (repo, service) = service();
        repo.put_raw(QuizDomain::Word.storage_key(), "{broken").unwrap();

        service.record_answer(QuizDomain::Word, "น้ำ", true).await;

        let stats = service.load_stats(QuizDomain::Word).await;
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.percentage("น้ำ"), Some(100.0));
    }

    #[tokio::test]
    async fn one_impossible_entry_keeps_the_rest_of_the_history() {
        let (repo, service) = service();
        repo.put_raw(
            QuizDomain::Vowel.storage_key(),
            r#"{"a":{"attempts":40,"correct":30},"b":{"attempts":1,"correct":2}}"#,
        )
        .unwrap();

        service.record_answer(QuizDomain::Vowel, "c", true).await;

        let stats = service.load_stats(QuizDomain::Vowel).await;
        assert_eq!(stats.get("a"), Some(&AnswerStat::from_persisted(40, 30).unwrap()));
        assert_eq!(stats.get("c"), Some(&AnswerStat::from_persisted(1, 1).unwrap()));
        assert!(stats.get("b").is_none());
    }

    #[tokio::test]
    async fn unavailable_storage_never_fails_the_caller() {
        let repo = Arc::new(UnavailableRepo::default());
        let service = StatsService::new(repo.clone());

        let stat = service.record_answer(QuizDomain::Number, "๕", true).await;
        assert_eq!(stat.attempts(), 1);
        assert!(service.load_stats(QuizDomain::Number).await.is_empty());
        assert_eq!(repo.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn weight_follows_recorded_history() {
        let (_, service) = service();
        for is_correct in [false, false, true, false] {
            service
                .record_answer(QuizDomain::FinalConsonant, "ด", is_correct)
                .await;
        }
        assert_eq!(
            service.calculate_weight(QuizDomain::FinalConsonant, "ด").await,
            3.0
        );
        assert_eq!(
            service.calculate_weight(QuizDomain::FinalConsonant, "ต").await,
            1.0
        );
    }

    #[test]
    fn percentage_is_none_without_attempts() {
        assert_eq!(StatsService::get_correct_percentage(None), None);
        let stat = AnswerStat::from_persisted(10, 2).unwrap();
        assert_eq!(StatsService::get_correct_percentage(Some(&stat)), Some(20.0));
    }
}
