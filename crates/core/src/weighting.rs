//! Maps an item's answer history to a sampling multiplier.
//!
//! The mapping is a three-step function rather than a continuous curve, and
//! items with fewer than [`MIN_ATTEMPTS_FOR_EVIDENCE`] answers always get the
//! neutral weight.

use crate::model::AnswerStat;

/// Answers needed before an item is judged weak or strong.
pub const MIN_ATTEMPTS_FOR_EVIDENCE: u32 = 3;
/// Below this percentage an item is struggling.
pub const STRUGGLING_BELOW: f64 = 50.0;
/// Below this percentage (and at or above `STRUGGLING_BELOW`) an item is still being learned.
pub const LEARNING_BELOW: f64 = 70.0;

pub const NEUTRAL_WEIGHT: f64 = 1.0;
pub const STRUGGLING_WEIGHT: f64 = 3.0;
pub const LEARNING_WEIGHT: f64 = 1.5;
pub const KNOWN_WEIGHT: f64 = 1.0;

/// How much practice an item needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightTier {
    /// Missing or too few answers.
    Neutral,
    Struggling,
    Learning,
    Known,
}

impl WeightTier {
    /// Classify a stat.
    #[must_use]
    pub fn of(stat: Option<&AnswerStat>) -> Self {
        let Some(stat) = stat.filter(|s| s.attempts() >= MIN_ATTEMPTS_FOR_EVIDENCE) else {
            return WeightTier::Neutral;
        };
        match stat.percentage() {
            Some(p) if p < STRUGGLING_BELOW => WeightTier::Struggling,
            Some(p) if p < LEARNING_BELOW => WeightTier::Learning,
            Some(_) => WeightTier::Known,
            None => WeightTier::Neutral,
        }
    }

    #[must_use]
    pub fn weight(self) -> f64 {
        match self {
            WeightTier::Neutral => NEUTRAL_WEIGHT,
            WeightTier::Struggling => STRUGGLING_WEIGHT,
            WeightTier::Learning => LEARNING_WEIGHT,
            WeightTier::Known => KNOWN_WEIGHT,
        }
    }
}

/// Sampling weight for an item: 3.0 struggling, 1.5 learning, 1.0 otherwise.
#[must_use]
pub fn calculate_weight(stat: Option<&AnswerStat>) -> f64 {
    WeightTier::of(stat).weight()
}

/// Number of copies an item gets in the expanded sampling pool.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn copies_for(weight: f64) -> usize {
    if !weight.is_finite() || weight <= 0.0 {
        return 0;
    }
    weight.ceil() as usize
}
