mod item;
mod options;
mod plan;
mod progress;
mod service;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::QuizError;
pub use item::{QuizCard, QuizItem};
pub use options::{DEFAULT_MAX_WRONG, build_choices};
pub use plan::{QuizPlan, QuizPlanBuilder};
pub use progress::SessionProgress;
pub use service::{AnswerRecord, QuizSession};
pub use workflow::{QuizAnswerResult, QuizLoopService};
