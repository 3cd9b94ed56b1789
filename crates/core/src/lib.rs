#![forbid(unsafe_code)]

pub mod familiarity;
pub mod model;
pub mod progress;
pub mod sampler;
pub mod weighting;

pub use familiarity::{
    FamiliarityBuckets, FamiliarityRange, StrugglingItem, bucket_by_familiarity_range,
    sort_by_familiarity, struggling_items,
};
pub use model::{AnswerStat, QuizDomain, Settings, StatsMap, correct_percentage};
pub use progress::{CategoryStats, MasteryLevel, MasteryTier, OverallStats};
pub use sampler::{select_uniform, select_weighted};
pub use weighting::{WeightTier, calculate_weight};
