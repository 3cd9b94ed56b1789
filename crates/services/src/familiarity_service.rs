use std::cmp::Ordering;

use sawadee_core::familiarity::{self, FamiliarityBuckets, StrugglingItem};
use sawadee_core::model::QuizDomain;

use crate::stats_service::StatsService;

/// Familiarity views over a domain's items, backed by stored stats.
#[derive(Clone)]
pub struct FamiliarityService {
    stats: StatsService,
}

impl FamiliarityService {
    #[must_use]
    pub fn new(stats: StatsService) -> Self {
        Self { stats }
    }

    /// Items least-correct first, items without answers last.
    pub async fn sorted<T, K>(&self, domain: QuizDomain, items: &[T], key: K) -> Vec<T>
    where
        T: Clone,
        K: Fn(&T) -> &str,
    {
        let stats = self.stats.load_stats(domain).await;
        familiarity::sort_by_familiarity(items, key, &stats)
    }

    pub async fn buckets<T, K>(&self, domain: QuizDomain, items: &[T], key: K) -> FamiliarityBuckets<T>
    where
        T: Clone,
        K: Fn(&T) -> &str,
    {
        let stats = self.stats.load_stats(domain).await;
        familiarity::bucket_by_familiarity_range(items, key, &stats)
    }

    /// "Need practice" list for each requested domain.
    ///
    /// Items stay grouped by domain; groups are ordered by their weakest item
    /// (lowest rate, then most attempts) so the domain that needs the most
    /// work comes first. Ties keep request order.
    pub async fn struggling_items(&self, catalog: &[(QuizDomain, Vec<String>)]) -> Vec<StrugglingItem> {
        let mut groups: Vec<Vec<StrugglingItem>> = Vec::with_capacity(catalog.len());
        for (domain, keys) in catalog {
            let stats = self.stats.load_stats(*domain).await;
            let found = familiarity::struggling_items(*domain, keys.iter().map(String::as_str), &stats);
            if !found.is_empty() {
                groups.push(found);
            }
        }

        groups.sort_by(|a, b| match (a.first(), b.first()) {
            (Some(a), Some(b)) => a
                .correct_rate
                .total_cmp(&b.correct_rate)
                .then_with(|| b.attempts.cmp(&a.attempts)),
            _ => Ordering::Equal,
        });
        groups.into_iter().flatten().collect()
    }
}
