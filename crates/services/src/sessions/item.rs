/// Anything a quiz can ask about.
///
/// `key` identifies the item in the stats store; `answer` is the string a
/// correct response must match exactly.
pub trait QuizItem: Clone {
    fn key(&self) -> &str;
    fn answer(&self) -> &str;
}

/// Plain prompt/answer pair for callers without their own item type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCard {
    pub key: String,
    pub prompt: String,
    pub answer: String,
}

impl QuizCard {
    #[must_use]
    pub fn new(key: impl Into<String>, prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }
}

impl QuizItem for QuizCard {
    fn key(&self) -> &str {
        &self.key
    }

    fn answer(&self) -> &str {
        &self.answer
    }
}
