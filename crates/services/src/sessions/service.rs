use std::fmt;

use sawadee_core::model::QuizDomain;

use super::item::QuizItem;
use super::plan::QuizPlan;
use super::progress::SessionProgress;
use crate::error::QuizError;

//
// ─── ANSWER RECORD ─────────────────────────────────────────────────────────────
//

/// Captures the outcome of one question within a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub item_key: String,
    pub selected: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz run over a fixed list of items.
///
/// Steps through the items in order; each answer is checked against the
/// item's correct answer and the session completes after the last one.
pub struct QuizSession<T> {
    domain: QuizDomain,
    items: Vec<T>,
    adaptive: bool,
    current: usize,
    results: Vec<AnswerRecord>,
}

impl<T: QuizItem> QuizSession<T> {
    /// Start a quiz over the planned items.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the plan has no items.
    pub fn new(domain: QuizDomain, plan: QuizPlan<T>) -> Result<Self, QuizError> {
        if plan.is_empty() {
            return Err(QuizError::Empty);
        }

        Ok(Self {
            domain,
            items: plan.items,
            adaptive: plan.adaptive,
            current: 0,
            results: Vec::new(),
        })
    }

    #[must_use]
    pub fn domain(&self) -> QuizDomain {
        self.domain
    }

    /// Whether the items were drawn with weighting.
    #[must_use]
    pub fn is_adaptive(&self) -> bool {
        self.adaptive
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn results(&self) -> &[AnswerRecord] {
        &self.results
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.current)
    }

    /// Number of correct answers so far.
    #[must_use]
    pub fn score(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total_questions(),
            answered: self.answered_count(),
            remaining: self.remaining(),
            correct: self.score(),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&T> {
        self.items.get(self.current)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.items.len()
    }

    /// Check `selected` against the current item and advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` if every question was already answered.
    pub fn answer_current(&mut self, selected: &str) -> Result<&AnswerRecord, QuizError> {
        let item = self.current_item().ok_or(QuizError::Completed)?;
        let record = AnswerRecord {
            item_key: item.key().to_string(),
            selected: selected.to_string(),
            correct_answer: item.answer().to_string(),
            is_correct: selected == item.answer(),
        };

        self.results.push(record);
        self.current += 1;
        self.results.last().ok_or(QuizError::Completed)
    }
}

impl<T> fmt::Debug for QuizSession<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("domain", &self.domain)
            .field("items_len", &self.items.len())
            .field("adaptive", &self.adaptive)
            .field("current", &self.current)
            .field("results_len", &self.results.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
