use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::QuizDomain;

/// Key of the persisted settings entry.
pub const SETTINGS_KEY: &str = "sawadee_settings_v1";

/// User preferences that shape quiz sessions.
///
/// Missing fields fall back to defaults when loading, so entries written by
/// older builds keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    adaptive_learning: bool,
    group_filters: BTreeMap<QuizDomain, Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            adaptive_learning: true,
            group_filters: BTreeMap::new(),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether quiz selection is weighted toward weak items.
    #[must_use]
    pub fn adaptive_learning(&self) -> bool {
        self.adaptive_learning
    }

    #[must_use]
    pub fn with_adaptive_learning(mut self, enabled: bool) -> Self {
        self.adaptive_learning = enabled;
        self
    }

    /// Last-selected group keys for a domain; empty when nothing was saved.
    #[must_use]
    pub fn group_filter(&self, domain: QuizDomain) -> &[String] {
        self.group_filters
            .get(&domain)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replace the saved group keys for `domain`. An empty list clears it.
    #[must_use]
    pub fn with_group_filter(mut self, domain: QuizDomain, keys: Vec<String>) -> Self {
        if keys.is_empty() {
            self.group_filters.remove(&domain);
        } else {
            self.group_filters.insert(domain, keys);
        }
        self
    }
}
