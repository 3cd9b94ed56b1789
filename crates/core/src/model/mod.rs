mod domain;
mod settings;
mod stats;

pub use domain::{DomainParseError, QuizDomain};
pub use settings::{SETTINGS_KEY, Settings};
pub use stats::{AnswerStat, AnswerStatError, StatsMap, correct_percentage};
