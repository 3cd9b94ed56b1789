#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod familiarity_service;
pub mod progress_service;
pub mod sessions;
pub mod settings_service;
pub mod stats_service;

pub use app_services::AppServices;
pub use config::AppConfig;
pub use error::{AppServicesError, ConfigError, QuizError};
pub use familiarity_service::FamiliarityService;
pub use progress_service::{ProgressReport, ProgressService};
pub use sessions::{
    AnswerRecord, QuizAnswerResult, QuizCard, QuizItem, QuizLoopService, QuizPlan,
    QuizPlanBuilder, QuizSession, SessionProgress, build_choices,
};
pub use settings_service::SettingsService;
pub use stats_service::StatsService;
