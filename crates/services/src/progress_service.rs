use sawadee_core::model::QuizDomain;
use sawadee_core::progress::{self, CategoryStats, OverallStats};

use crate::stats_service::StatsService;

/// Per-domain summaries plus the combined view shown on the progress page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub categories: Vec<(QuizDomain, CategoryStats)>,
    pub overall: OverallStats,
}

impl ProgressReport {
    #[must_use]
    pub fn category(&self, domain: QuizDomain) -> Option<&CategoryStats> {
        self.categories
            .iter()
            .find(|(d, _)| *d == domain)
            .map(|(_, stats)| stats)
    }
}

#[derive(Clone)]
pub struct ProgressService {
    stats: StatsService,
}

impl ProgressService {
    #[must_use]
    pub fn new(stats: StatsService) -> Self {
        Self { stats }
    }

    pub async fn category_stats<I>(&self, domain: QuizDomain, keys: I) -> CategoryStats
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let stats = self.stats.load_stats(domain).await;
        progress::category_stats(keys, &stats)
    }

    /// Summarize every listed domain against its full item set.
    pub async fn report(&self, catalog: &[(QuizDomain, Vec<String>)]) -> ProgressReport {
        let mut categories = Vec::with_capacity(catalog.len());
        for (domain, keys) in catalog {
            let summary = self.category_stats(*domain, keys).await;
            categories.push((*domain, summary));
        }
        let overall = progress::overall_stats(categories.iter().map(|(_, stats)| stats));
        ProgressReport {
            categories,
            overall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sawadee_core::progress::MasteryLevel;
    use std::sync::Arc;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn report_covers_each_domain_and_the_total() {
        let stats = StatsService::new(Arc::new(InMemoryRepository::new()));
        for _ in 0..3 {
            stats.record_answer(QuizDomain::Number, "๑", true).await;
            stats.record_answer(QuizDomain::Number, "๒", true).await;
        }
        stats.record_answer(QuizDomain::Vowel, "า", false).await;

        let service = ProgressService::new(stats);
        let report = service
            .report(&[
                (QuizDomain::Number, vec!["๑".into(), "๒".into()]),
                (QuizDomain::Vowel, vec!["า".into(), "ิ".into()]),
            ])
            .await;

        let numbers = report.category(QuizDomain::Number).unwrap();
        assert_eq!(numbers.mastered, 2);
        assert_eq!(numbers.mastery_percentage, 100.0);

        let vowels = report.category(QuizDomain::Vowel).unwrap();
        assert_eq!(vowels.not_started, 1);
        assert_eq!(vowels.struggling, 0);

        assert_eq!(report.overall.total_items, 4);
        assert_eq!(report.overall.mastered, 2);
        assert_eq!(report.overall.mastery_percentage, 50.0);
        assert_eq!(report.overall.level, MasteryLevel::Intermediate);
        // Three attempted items: 100, 100 and 0.
        assert!((report.overall.average_accuracy - 200.0 / 3.0).abs() < 1e-9);
    }
}
