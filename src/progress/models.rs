//! Progress and statistics data models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::flashcards::lenient;

/// Persisted progress snapshot
///
/// Card counts and accuracy are recomputed from the cards; the streak fields
/// are owned by the streak tracker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    #[serde(deserialize_with = "lenient::counter_usize")]
    pub total_cards: usize,
    #[serde(deserialize_with = "lenient::counter_usize")]
    pub mastered_cards: usize,
    #[serde(deserialize_with = "lenient::counter_usize")]
    pub learning_cards: usize,
    #[serde(deserialize_with = "lenient::counter_usize")]
    pub new_cards: usize,
    #[serde(deserialize_with = "lenient::counter")]
    pub current_streak: u32,
    #[serde(deserialize_with = "lenient::counter")]
    pub longest_streak: u32,
    #[serde(deserialize_with = "lenient::optional_date")]
    pub last_study_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::counter_u64")]
    pub total_reviews: u64,
    /// Percentage of correct answers, 0-100
    #[serde(deserialize_with = "lenient::counter")]
    pub accuracy_rate: u32,
}

/// Per-deck overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub total: usize,
    pub due: usize,
    pub mastered: usize,
}

/// Result of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub correct: usize,
    pub total: usize,
    /// Percentage of the session's cards answered correctly
    pub accuracy: u32,
}
