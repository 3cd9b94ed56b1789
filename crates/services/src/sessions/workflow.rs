use rand::Rng;

use sawadee_core::model::{AnswerStat, QuizDomain, Settings, StatsMap};
use tracing::debug;

use super::item::QuizItem;
use super::plan::QuizPlanBuilder;
use super::service::{AnswerRecord, QuizSession};
use crate::config::DEFAULT_MAX_QUESTIONS;
use crate::error::QuizError;
use crate::settings_service::SettingsService;
use crate::stats_service::StatsService;

/// Result of answering a single question in a quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAnswerResult {
    pub record: AnswerRecord,
    pub stat: AnswerStat,
    pub is_complete: bool,
}

/// Orchestrates quiz start, answering with persisted stats, and restarts.
#[derive(Clone)]
pub struct QuizLoopService {
    stats: StatsService,
    settings: SettingsService,
    max_questions: usize,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(stats: StatsService, settings: SettingsService) -> Self {
        Self {
            stats,
            settings,
            max_questions: DEFAULT_MAX_QUESTIONS,
        }
    }

    #[must_use]
    pub fn with_max_questions(mut self, max_questions: usize) -> Self {
        self.max_questions = max_questions;
        self
    }

    #[must_use]
    pub fn max_questions(&self) -> usize {
        self.max_questions
    }

    async fn load_context(&self, domain: QuizDomain) -> (Settings, StatsMap) {
        let settings = self.settings.load().await;
        let stats = self.stats.load_stats(domain).await;
        (settings, stats)
    }

    fn plan_session<T, R>(
        &self,
        domain: QuizDomain,
        pool: &[T],
        settings: &Settings,
        stats: &StatsMap,
        rng: &mut R,
    ) -> Result<QuizSession<T>, QuizError>
    where
        T: QuizItem,
        R: Rng + ?Sized,
    {
        let plan = QuizPlanBuilder::new(settings)
            .with_max_questions(self.max_questions)
            .build(pool, stats, rng);
        debug!(
            domain = %domain,
            pool = pool.len(),
            selected = plan.total(),
            adaptive = plan.adaptive,
            "planned quiz"
        );
        QuizSession::new(domain, plan)
    }

    /// Start a quiz over `pool` using the thread-local random source.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the pool is empty.
    pub async fn start<T: QuizItem>(
        &self,
        domain: QuizDomain,
        pool: &[T],
    ) -> Result<QuizSession<T>, QuizError> {
        let (settings, stats) = self.load_context(domain).await;
        let mut rng = rand::rng();
        self.plan_session(domain, pool, &settings, &stats, &mut rng)
    }

    /// Start a quiz with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the pool is empty.
    pub async fn start_with_rng<T, R>(
        &self,
        domain: QuizDomain,
        pool: &[T],
        rng: &mut R,
    ) -> Result<QuizSession<T>, QuizError>
    where
        T: QuizItem,
        R: Rng + ?Sized,
    {
        let (settings, stats) = self.load_context(domain).await;
        self.plan_session(domain, pool, &settings, &stats, rng)
    }

    /// Answer the current question and record the outcome in the stats store.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` if the quiz is already finished.
    pub async fn answer_current<T: QuizItem>(
        &self,
        session: &mut QuizSession<T>,
        selected: &str,
    ) -> Result<QuizAnswerResult, QuizError> {
        let record = session.answer_current(selected)?.clone();
        let stat = self
            .stats
            .record_answer(session.domain(), &record.item_key, record.is_correct)
            .await;

        Ok(QuizAnswerResult {
            record,
            stat,
            is_complete: session.is_complete(),
        })
    }

    /// Replan a fresh quiz from the items of `previous`, with current stats.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if `previous` had no items.
    pub async fn restart<T: QuizItem>(
        &self,
        previous: &QuizSession<T>,
    ) -> Result<QuizSession<T>, QuizError> {
        self.start(previous.domain(), previous.items()).await
    }

    /// Like [`QuizLoopService::restart`] with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if `previous` had no items.
    pub async fn restart_with_rng<T, R>(
        &self,
        previous: &QuizSession<T>,
        rng: &mut R,
    ) -> Result<QuizSession<T>, QuizError>
    where
        T: QuizItem,
        R: Rng + ?Sized,
    {
        self.start_with_rng(previous.domain(), previous.items(), rng)
            .await
    }
}
