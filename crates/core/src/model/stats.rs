use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerStatError {
    #[error("correct count ({correct}) exceeds attempts ({attempts})")]
    CorrectExceedsAttempts { attempts: u32, correct: u32 },
}

//
// ─── ANSWER STAT ───────────────────────────────────────────────────────────────
//

/// Attempt/correct counters for one item within one domain.
///
/// Both counters only ever grow, and `correct <= attempts` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAnswerStat")]
pub struct AnswerStat {
    attempts: u32,
    correct: u32,
}

#[derive(Deserialize)]
struct RawAnswerStat {
    attempts: u32,
    correct: u32,
}

impl TryFrom<RawAnswerStat> for AnswerStat {
    type Error = AnswerStatError;

    fn try_from(raw: RawAnswerStat) -> Result<Self, Self::Error> {
        Self::from_persisted(raw.attempts, raw.correct)
    }
}

impl AnswerStat {
    /// Rehydrate counters from storage.
    ///
    /// # Errors
    ///
    /// Returns `AnswerStatError::CorrectExceedsAttempts` for impossible counts.
    pub fn from_persisted(attempts: u32, correct: u32) -> Result<Self, AnswerStatError> {
        if correct > attempts {
            return Err(AnswerStatError::CorrectExceedsAttempts { attempts, correct });
        }
        Ok(Self { attempts, correct })
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Count one more answer.
    pub fn record(&mut self, is_correct: bool) {
        self.attempts = self.attempts.saturating_add(1);
        if is_correct {
            self.correct = self.correct.saturating_add(1);
        }
    }

    /// Share of correct answers in percent, `None` before the first attempt.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        if self.attempts == 0 {
            return None;
        }
        Some(f64::from(self.correct) * 100.0 / f64::from(self.attempts))
    }
}

/// Correct percentage for an optional stat; `None` means "no data yet".
#[must_use]
pub fn correct_percentage(stat: Option<&AnswerStat>) -> Option<f64> {
    stat.and_then(AnswerStat::percentage)
}

//
// ─── STATS MAP ─────────────────────────────────────────────────────────────────
//

/// Every recorded `AnswerStat` of a single domain, keyed by item key.
///
/// Serializes as a plain JSON object `{ "<key>": {"attempts": n, "correct": m} }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsMap(BTreeMap<String, AnswerStat>);

impl StatsMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, item_key: &str) -> Option<&AnswerStat> {
        self.0.get(item_key)
    }

    /// Increment the counters of `item_key`, creating the entry on first use.
    pub fn record_answer(&mut self, item_key: &str, is_correct: bool) -> AnswerStat {
        let entry = self.0.entry(item_key.to_string()).or_default();
        entry.record(is_correct);
        *entry
    }

    #[must_use]
    pub fn percentage(&self, item_key: &str) -> Option<f64> {
        correct_percentage(self.get(item_key))
    }

    pub fn insert(&mut self, item_key: impl Into<String>, stat: AnswerStat) {
        self.0.insert(item_key.into(), stat);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerStat)> {
        self.0.iter().map(|(key, stat)| (key.as_str(), stat))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, AnswerStat)> for StatsMap {
    fn from_iter<I: IntoIterator<Item = (String, AnswerStat)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
