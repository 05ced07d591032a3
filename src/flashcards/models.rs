//! Data models for the flashcard system

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lenient;

/// Box a new card starts in
pub const MIN_BOX: u8 = 1;
/// Mastered box
pub const MAX_BOX: u8 = 5;

fn default_box() -> u8 {
    MIN_BOX
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// A vocabulary card with prompt (front) and answer (back)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(alias = "arabic")]
    pub front: String,
    #[serde(alias = "bangla")]
    pub back: String,
    /// Pronunciation aid shown alongside the prompt
    #[serde(
        default,
        alias = "transliteration",
        skip_serializing_if = "Option::is_none"
    )]
    pub pronunciation: Option<String>,
    /// Name of the deck the card was created in
    #[serde(default)]
    pub module: String,
    /// Leitner box, 1 (new) to 5 (mastered)
    #[serde(
        rename = "box",
        default = "default_box",
        deserialize_with = "lenient::box_level"
    )]
    pub box_level: u8,
    #[serde(default, deserialize_with = "lenient::optional_timestamp")]
    pub last_reviewed: Option<DateTime<Utc>>,
    /// Not due before this instant; `None` means due now
    #[serde(default, deserialize_with = "lenient::optional_timestamp")]
    pub next_review: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::counter")]
    pub correct_count: u32,
    #[serde(default, deserialize_with = "lenient::counter")]
    pub incorrect_count: u32,
    #[serde(default = "epoch", deserialize_with = "lenient::timestamp_or_epoch")]
    pub created_at: DateTime<Utc>,
}

impl Card {
    pub fn new(front: String, back: String, module: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            front,
            back,
            pronunciation: None,
            module,
            box_level: MIN_BOX,
            last_reviewed: None,
            next_review: None,
            correct_count: 0,
            incorrect_count: 0,
            created_at: now,
        }
    }

    /// Never graded
    pub fn is_unseen(&self) -> bool {
        self.last_reviewed.is_none()
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.map_or(true, |next| next <= now)
    }

    pub fn is_mastered(&self) -> bool {
        self.box_level == MAX_BOX
    }

    pub fn review_count(&self) -> u64 {
        u64::from(self.correct_count) + u64::from(self.incorrect_count)
    }

    /// Merge a partial update into this card
    pub fn apply(&mut self, update: &CardUpdate) {
        if let Some(box_level) = update.box_level {
            self.box_level = box_level.clamp(MIN_BOX, MAX_BOX);
        }
        if let Some(last_reviewed) = update.last_reviewed {
            self.last_reviewed = Some(last_reviewed);
        }
        if let Some(next_review) = update.next_review {
            self.next_review = Some(next_review);
        }
        if let Some(correct) = update.correct_count {
            self.correct_count = correct;
        }
        if let Some(incorrect) = update.incorrect_count {
            self.incorrect_count = incorrect;
        }
        if let Some(ref module) = update.module {
            self.module = module.clone();
        }
    }
}

/// Partial card update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub box_level: Option<u8>,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
    pub correct_count: Option<u32>,
    pub incorrect_count: Option<u32>,
    pub module: Option<String>,
}

/// Recall quality reported for a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }

    /// Every grade except `Again` counts as a correct recall
    pub fn is_correct(&self) -> bool {
        !matches!(self, Grade::Again)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    /// Accepts the name, its first letter, or the button number 1-4
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "again" | "a" | "1" => Ok(Grade::Again),
            "hard" | "h" | "2" => Ok(Grade::Hard),
            "good" | "g" | "3" => Ok(Grade::Good),
            "easy" | "e" | "4" => Ok(Grade::Easy),
            other => Err(format!("unknown grade '{}' (expected again, hard, good or easy)", other)),
        }
    }
}

/// A named collection of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Ordered card membership
    #[serde(default)]
    pub card_ids: Vec<String>,
    #[serde(default = "epoch", deserialize_with = "lenient::timestamp_or_epoch")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "epoch", deserialize_with = "lenient::timestamp_or_epoch")]
    pub updated_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(name: String, description: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            card_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.card_ids.iter().any(|id| id == card_id)
    }
}

/// Outcome of a single answer within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAnswer {
    pub card_id: String,
    pub correct: bool,
    /// Milliseconds spent on the card
    #[serde(rename = "timeSpent", default, deserialize_with = "lenient::counter_u64")]
    pub time_spent_ms: u64,
}

/// A study session and its answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    pub id: String,
    /// Cards in presentation order, as they were when the session started
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub current_index: usize,
    #[serde(default)]
    pub answers: Vec<SessionAnswer>,
    #[serde(default = "epoch", deserialize_with = "lenient::timestamp_or_epoch")]
    pub started_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient::optional_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    pub fn new(cards: Vec<Card>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            cards,
            current_index: 0,
            answers: Vec::new(),
            started_at: now,
            completed_at: None,
        }
    }

    /// Next card without an answer
    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.answers.len())
    }

    pub fn record_answer(&mut self, card_id: String, correct: bool, time_spent_ms: u64) {
        self.answers.push(SessionAnswer {
            card_id,
            correct,
            time_spent_ms,
        });
        self.current_index = self.answers.len().min(self.cards.len().saturating_sub(1));
    }

    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.completed_at = Some(now);
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn correct_answers(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_card_deserializes_legacy_field_names() {
        let json = r#"{
            "id": "1700000000000-abc123def",
            "arabic": "كِتَاب",
            "bangla": "বই",
            "transliteration": "kitab",
            "module": "Module 1",
            "box": 3,
            "lastReviewed": "2024-05-01T10:00:00.000Z",
            "nextReview": "2024-05-08T10:00:00.000Z",
            "correctCount": 4,
            "incorrectCount": 1,
            "createdAt": "2024-04-01T09:00:00.000Z"
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.front, "كِتَاب");
        assert_eq!(card.back, "বই");
        assert_eq!(card.pronunciation.as_deref(), Some("kitab"));
        assert_eq!(card.box_level, 3);
        assert_eq!(
            card.next_review,
            Some(Utc.with_ymd_and_hms(2024, 5, 8, 10, 0, 0).unwrap())
        );
        assert_eq!(card.review_count(), 5);
    }

    #[test]
    fn test_card_repairs_malformed_fields() {
        let json = r#"{
            "id": "c1",
            "front": "a",
            "back": "b",
            "box": 9,
            "lastReviewed": "not a date",
            "nextReview": 12345,
            "correctCount": -3,
            "incorrectCount": "many",
            "createdAt": "garbage"
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.box_level, MAX_BOX);
        assert!(card.last_reviewed.is_none());
        assert!(card.next_review.is_none());
        assert_eq!(card.correct_count, 0);
        assert_eq!(card.incorrect_count, 0);
        assert_eq!(card.created_at, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(card.module, "");
    }

    #[test]
    fn test_card_box_below_range_and_missing() {
        let low: Card = serde_json::from_str(r#"{"id":"c","front":"a","back":"b","box":0}"#).unwrap();
        assert_eq!(low.box_level, MIN_BOX);

        let missing: Card = serde_json::from_str(r#"{"id":"c","front":"a","back":"b"}"#).unwrap();
        assert_eq!(missing.box_level, MIN_BOX);
        assert!(missing.is_unseen());
    }

    #[test]
    fn test_card_serializes_box_and_nulls() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let card = Card::new("front".to_string(), "back".to_string(), "Deck".to_string(), now);
        let value = serde_json::to_value(&card).unwrap();

        assert_eq!(value["box"], 1);
        assert!(value["lastReviewed"].is_null());
        assert!(value["nextReview"].is_null());
        assert!(value.get("pronunciation").is_none());
    }

    #[test]
    fn test_apply_partial_update() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut card = Card::new("f".to_string(), "b".to_string(), "M".to_string(), now);
        card.correct_count = 2;

        card.apply(&CardUpdate {
            box_level: Some(4),
            incorrect_count: Some(1),
            ..Default::default()
        });

        assert_eq!(card.box_level, 4);
        assert_eq!(card.correct_count, 2);
        assert_eq!(card.incorrect_count, 1);
        assert!(card.last_reviewed.is_none());
    }

    #[test]
    fn test_grade_from_str() {
        assert_eq!("again".parse::<Grade>().unwrap(), Grade::Again);
        assert_eq!(" H ".parse::<Grade>().unwrap(), Grade::Hard);
        assert_eq!("3".parse::<Grade>().unwrap(), Grade::Good);
        assert_eq!("Easy".parse::<Grade>().unwrap(), Grade::Easy);
        assert!("perfect".parse::<Grade>().is_err());
    }

    #[test]
    fn test_session_answer_bookkeeping() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let cards = vec![
            Card::new("a".to_string(), "1".to_string(), "M".to_string(), now),
            Card::new("b".to_string(), "2".to_string(), "M".to_string(), now),
        ];
        let first_id = cards[0].id.clone();
        let mut session = QuizSession::new(cards, now);

        assert_eq!(session.current_card().map(|c| c.id.as_str()), Some(first_id.as_str()));
        session.record_answer(first_id, true, 1200);
        assert_eq!(session.current_index, 1);

        let second_id = session.cards[1].id.clone();
        session.record_answer(second_id, false, 800);
        assert_eq!(session.current_index, 1);
        assert!(session.current_card().is_none());
        assert_eq!(session.correct_answers(), 1);

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["answers"][0]["timeSpent"], 1200);
        assert!(json["completedAt"].is_null());
    }
}
