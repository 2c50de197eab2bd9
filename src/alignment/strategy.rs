// Translation strategies for context vector translation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TermError;

/// How a source entry's count and rate are spread over its candidate
/// translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationStrategy {
    /// Share the count in proportion to the candidates' target frequencies
    #[default]
    Prorata,
    /// Everything goes to the most frequent candidate
    MostFrequent,
    /// Everything goes to the most specific candidate
    MostSpecific,
    /// Even split of count and rate over all candidates
    EquiRepartition,
}

impl TranslationStrategy {
    pub const ALL: [TranslationStrategy; 4] = [
        TranslationStrategy::Prorata,
        TranslationStrategy::MostFrequent,
        TranslationStrategy::MostSpecific,
        TranslationStrategy::EquiRepartition,
    ];

    /// Map the numeric strategy codes used in older configuration files
    /// (1 to 4) onto strategies.
    pub fn from_code(code: i32) -> Result<Self, TermError> {
        match code {
            1 => Ok(TranslationStrategy::Prorata),
            2 => Ok(TranslationStrategy::MostFrequent),
            3 => Ok(TranslationStrategy::MostSpecific),
            4 => Ok(TranslationStrategy::EquiRepartition),
            other => Err(TermError::InvalidStrategy(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationStrategy::Prorata => "prorata",
            TranslationStrategy::MostFrequent => "most-frequent",
            TranslationStrategy::MostSpecific => "most-specific",
            TranslationStrategy::EquiRepartition => "equi-repartition",
        }
    }
}

impl FromStr for TranslationStrategy {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        if let Ok(code) = normalized.parse::<i32>() {
            return Self::from_code(code);
        }
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| TermError::InvalidStrategy(s.to_string()))
    }
}

impl std::fmt::Display for TranslationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
