use serde::{Deserialize, Serialize};

use super::defaults;

/// Tie-break applied after the count-based contributor ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributorTieBreak {
    /// Earliest contribution first (stable insertion order).
    #[default]
    FirstContribution,
    /// Smallest agent id first.
    AgentId,
}

/// Weights applied to each text source by the word counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordWeights {
    pub short_title: f64,
    pub long_title: f64,
    pub definition: f64,
    pub post_subject: f64,
    pub post_body: f64,
}

impl Default for WordWeights {
    fn default() -> Self {
        Self {
            short_title: defaults::DEFAULT_SHORT_TITLE_WEIGHT,
            long_title: defaults::DEFAULT_LONG_TITLE_WEIGHT,
            definition: defaults::DEFAULT_DEFINITION_WEIGHT,
            post_subject: defaults::DEFAULT_POST_SUBJECT_WEIGHT,
            post_body: defaults::DEFAULT_POST_BODY_WEIGHT,
        }
    }
}

/// Content aggregation and text summarization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub word_weights: WordWeights,
    /// Number of terms returned by `most_common_words` when unspecified.
    pub default_word_count: usize,
    /// Words shorter than this are ignored.
    pub min_word_length: usize,
    /// Locales used when a discussion declares none.
    pub default_locales: Vec<String>,
    pub tie_break: ContributorTieBreak,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            word_weights: WordWeights::default(),
            default_word_count: defaults::DEFAULT_WORD_COUNT,
            min_word_length: defaults::DEFAULT_MIN_WORD_LENGTH,
            default_locales: vec![defaults::DEFAULT_LOCALE.to_string()],
            tie_break: ContributorTieBreak::default(),
        }
    }
}
