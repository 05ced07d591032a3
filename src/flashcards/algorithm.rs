//! Leitner box scheduling
//!
//! Each card sits in one of five boxes. A grade moves the card between boxes
//! and the box it lands in alone decides when it is due again:
//!
//! | box | interval |
//! |-----|----------|
//! | 1   | 1 day    |
//! | 2   | 3 days   |
//! | 3   | 1 week   |
//! | 4   | 2 weeks  |
//! | 5   | 1 month  |

use chrono::{DateTime, Duration, Utc};

use super::models::{Card, CardUpdate, Grade, MAX_BOX, MIN_BOX};

/// Review interval in days for a box
pub fn interval_days(box_level: u8) -> i64 {
    match box_level {
        1 => 1,
        2 => 3,
        3 => 7,
        4 => 14,
        5 => 30,
        _ => 1,
    }
}

pub fn calculate_next_review(box_level: u8, now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(interval_days(box_level))
}

/// Box a card in `box_level` moves to after `grade`
pub fn next_box(box_level: u8, grade: Grade) -> u8 {
    match grade {
        Grade::Again => MIN_BOX,
        Grade::Hard => box_level,
        Grade::Good => box_level.saturating_add(1).min(MAX_BOX),
        Grade::Easy => box_level.saturating_add(2).min(MAX_BOX),
    }
}

/// Compute the state change for grading `card` at `now`
pub fn grade_card(card: &Card, grade: Grade, now: DateTime<Utc>) -> CardUpdate {
    let new_box = next_box(card.box_level, grade);

    let mut update = CardUpdate {
        box_level: Some(new_box),
        last_reviewed: Some(now),
        next_review: Some(calculate_next_review(new_box, now)),
        ..Default::default()
    };

    if grade.is_correct() {
        update.correct_count = Some(card.correct_count.saturating_add(1));
    } else {
        update.incorrect_count = Some(card.incorrect_count.saturating_add(1));
    }

    update
}

/// Interval in days each grade would give, ordered Again, Hard, Good, Easy
pub fn preview_intervals(card: &Card) -> [i64; 4] {
    Grade::ALL.map(|grade| interval_days(next_box(card.box_level, grade)))
}

pub fn box_label(box_level: u8) -> &'static str {
    match box_level {
        1 => "New",
        2 => "Learning",
        3 => "Familiar",
        4 => "Known",
        5 => "Mastered",
        _ => "Unknown",
    }
}

pub fn cards_in_box(cards: &[Card], box_level: u8) -> Vec<Card> {
    cards
        .iter()
        .filter(|card| card.box_level == box_level)
        .cloned()
        .collect()
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: i64) -> String {
    if days <= 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
