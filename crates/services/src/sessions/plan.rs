use rand::Rng;
use rand::seq::SliceRandom;

use sawadee_core::model::{Settings, StatsMap};
use sawadee_core::{sampler, weighting};

use super::item::QuizItem;
use crate::config::DEFAULT_MAX_QUESTIONS;

/// Selection result for a quiz build.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizPlan<T> {
    pub items: Vec<T>,
    pub adaptive: bool,
}

impl<T> QuizPlan<T> {
    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Picks the questions of one quiz run from a candidate pool.
#[derive(Debug, Clone, Copy)]
pub struct QuizPlanBuilder {
    max_questions: usize,
    adaptive: bool,
}

impl Default for QuizPlanBuilder {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
            adaptive: true,
        }
    }
}

impl QuizPlanBuilder {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self::default().with_adaptive(settings.adaptive_learning())
    }

    #[must_use]
    pub fn with_max_questions(mut self, max_questions: usize) -> Self {
        self.max_questions = max_questions;
        self
    }

    /// Enable or disable weighting toward weak items.
    #[must_use]
    pub fn with_adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Build a plan of up to `max_questions` items from `pool`.
    ///
    /// - adaptive: weighted sampling by each item's stats in `stats`;
    /// - otherwise: uniform shuffle, then truncate.
    ///
    /// Either way the chosen items are shuffled once more so the question
    /// order does not reveal the draw order.
    pub fn build<T, R>(self, pool: &[T], stats: &StatsMap, rng: &mut R) -> QuizPlan<T>
    where
        T: QuizItem,
        R: Rng + ?Sized,
    {
        let mut items = if self.adaptive {
            sampler::select_weighted(
                pool,
                self.max_questions,
                T::key,
                |item| weighting::calculate_weight(stats.get(item.key())),
                rng,
            )
        } else {
            sampler::select_uniform(pool, self.max_questions, T::key, rng)
        };
        items.shuffle(rng);

        QuizPlan {
            items,
            adaptive: self.adaptive,
        }
    }
}
