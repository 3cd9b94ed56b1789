//! Category and overall progress summaries.

use crate::model::StatsMap;
use crate::weighting::MIN_ATTEMPTS_FOR_EVIDENCE;

pub const MASTERED_FROM: f64 = 90.0;
pub const FAMILIAR_FROM: f64 = 70.0;
pub const LEARNING_FROM: f64 = 50.0;

/// Mastery tier of an item with enough recorded answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasteryTier {
    Struggling,
    Learning,
    Familiar,
    Mastered,
}

impl MasteryTier {
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= MASTERED_FROM {
            MasteryTier::Mastered
        } else if percentage >= FAMILIAR_FROM {
            MasteryTier::Familiar
        } else if percentage >= LEARNING_FROM {
            MasteryTier::Learning
        } else {
            MasteryTier::Struggling
        }
    }
}

/// Overall learner level, derived from the mastered share of all items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasteryLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl MasteryLevel {
    #[must_use]
    pub fn from_mastery_percentage(percentage: f64) -> Self {
        if percentage < 25.0 {
            MasteryLevel::Beginner
        } else if percentage < 60.0 {
            MasteryLevel::Intermediate
        } else if percentage < 85.0 {
            MasteryLevel::Advanced
        } else {
            MasteryLevel::Expert
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MasteryLevel::Beginner => "beginner",
            MasteryLevel::Intermediate => "intermediate",
            MasteryLevel::Advanced => "advanced",
            MasteryLevel::Expert => "expert",
        }
    }
}

/// Summary of one domain's item set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryStats {
    pub total: usize,
    pub mastered: usize,
    pub familiar: usize,
    pub learning: usize,
    pub struggling: usize,
    pub not_started: usize,
    pub mastery_percentage: f64,
    pub average_accuracy: f64,
}

impl CategoryStats {
    /// Items with at least one recorded answer.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.total - self.not_started
    }
}

/// Summary across several domains.
#[derive(Debug, Clone, PartialEq)]
pub struct OverallStats {
    pub total_items: usize,
    pub mastered: usize,
    pub familiar: usize,
    pub learning: usize,
    pub struggling: usize,
    pub not_started: usize,
    pub mastery_percentage: f64,
    pub average_accuracy: f64,
    pub level: MasteryLevel,
}

#[allow(clippy::cast_precision_loss)]
fn percent_of(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}

/// Classify every key of a category against its stats.
///
/// Items with one or two answers count toward accuracy but not toward any
/// mastery tier.
#[allow(clippy::cast_precision_loss)]
pub fn category_stats<I>(keys: I, stats: &StatsMap) -> CategoryStats
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut summary = CategoryStats::default();
    let mut accuracy_sum = 0.0;

    for key in keys {
        summary.total += 1;
        let stat = stats.get(key.as_ref());
        let Some((stat, percentage)) = stat.and_then(|s| s.percentage().map(|p| (s, p))) else {
            summary.not_started += 1;
            continue;
        };

        accuracy_sum += percentage;
        if stat.attempts() < MIN_ATTEMPTS_FOR_EVIDENCE {
            continue;
        }

        match MasteryTier::from_percentage(percentage) {
            MasteryTier::Mastered => summary.mastered += 1,
            MasteryTier::Familiar => summary.familiar += 1,
            MasteryTier::Learning => summary.learning += 1,
            MasteryTier::Struggling => summary.struggling += 1,
        }
    }

    summary.mastery_percentage = percent_of(summary.mastered, summary.total);
    let attempted = summary.attempted();
    summary.average_accuracy = if attempted > 0 {
        accuracy_sum / attempted as f64
    } else {
        0.0
    };
    summary
}

/// Merge category summaries and classify the learner's level.
///
/// Average accuracy is weighted by the number of attempted items per category.
#[allow(clippy::cast_precision_loss)]
pub fn overall_stats<'a, I>(categories: I) -> OverallStats
where
    I: IntoIterator<Item = &'a CategoryStats>,
{
    let mut total_items = 0;
    let mut mastered = 0;
    let mut familiar = 0;
    let mut learning = 0;
    let mut struggling = 0;
    let mut not_started = 0;
    let mut weighted_accuracy = 0.0;

    for category in categories {
        total_items += category.total;
        mastered += category.mastered;
        familiar += category.familiar;
        learning += category.learning;
        struggling += category.struggling;
        not_started += category.not_started;
        weighted_accuracy += category.average_accuracy * category.attempted() as f64;
    }

    let attempted = total_items - not_started;
    let average_accuracy = if attempted > 0 {
        weighted_accuracy / attempted as f64
    } else {
        0.0
    };
    let mastery_percentage = percent_of(mastered, total_items);

    OverallStats {
        total_items,
        mastered,
        familiar,
        learning,
        struggling,
        not_started,
        mastery_percentage,
        average_accuracy,
        level: MasteryLevel::from_mastery_percentage(mastery_percentage),
    }
}
