use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DomainParseError {
    #[error("unknown quiz domain: {0}")]
    Unknown(String),
}

//
// ─── DOMAIN ────────────────────────────────────────────────────────────────────
//

/// A category of learnable items with its own independent stats store.
///
/// Stores for different domains are never merged: the same script form can be
/// tracked separately as an initial and as a final consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizDomain {
    InitialConsonant,
    FinalConsonant,
    Vowel,
    Number,
    Word,
}

impl QuizDomain {
    /// Every domain, in dashboard order.
    pub const ALL: [QuizDomain; 5] = [
        QuizDomain::InitialConsonant,
        QuizDomain::FinalConsonant,
        QuizDomain::Vowel,
        QuizDomain::Number,
        QuizDomain::Word,
    ];

    /// Stable identifier used in persisted keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizDomain::InitialConsonant => "initial_consonant",
            QuizDomain::FinalConsonant => "final_consonant",
            QuizDomain::Vowel => "vowel",
            QuizDomain::Number => "number",
            QuizDomain::Word => "word",
        }
    }

    /// Key of the persisted stats entry for this domain.
    #[must_use]
    pub fn storage_key(self) -> String {
        format!("sawadee_{}_stats_v1", self.as_str())
    }

    /// Human-readable label for review screens.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuizDomain::InitialConsonant => "Initial Consonants",
            QuizDomain::FinalConsonant => "Final Consonants",
            QuizDomain::Vowel => "Vowels",
            QuizDomain::Number => "Numbers",
            QuizDomain::Word => "Words",
        }
    }
}

impl fmt::Display for QuizDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizDomain {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuizDomain::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s.trim())
            .ok_or_else(|| DomainParseError::Unknown(s.to_string()))
    }
}
