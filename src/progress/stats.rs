//! Progress statistics derived from cards and session history

use chrono::{DateTime, NaiveDate, Utc};

use super::models::{DeckStats, Progress, SessionSummary};
use crate::flashcards::session::{cards_in_deck, get_due_cards};
use crate::flashcards::{Card, Deck, QuizSession, MAX_BOX, MIN_BOX};

/// Rounded percentage of `part` in `whole`, 0 when `whole` is 0
fn percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round().min(100.0) as u32
}

/// Recompute card counts and accuracy, keeping the streak fields of `persisted`
pub fn calculate_progress(cards: &[Card], persisted: &Progress) -> Progress {
    let mastered_cards = cards.iter().filter(|c| c.box_level == MAX_BOX).count();
    let learning_cards = cards
        .iter()
        .filter(|c| c.box_level > MIN_BOX && c.box_level < MAX_BOX)
        .count();
    let new_cards = cards
        .iter()
        .filter(|c| c.box_level == MIN_BOX && c.correct_count == 0 && c.incorrect_count == 0)
        .count();

    let total_reviews: u64 = cards.iter().map(Card::review_count).sum();
    let correct_reviews: u64 = cards.iter().map(|c| u64::from(c.correct_count)).sum();

    Progress {
        total_cards: cards.len(),
        mastered_cards,
        learning_cards,
        new_cards,
        total_reviews,
        accuracy_rate: percentage(correct_reviews, total_reviews),
        ..persisted.clone()
    }
}

pub fn deck_stats(deck: &Deck, cards: &[Card], now: DateTime<Utc>) -> DeckStats {
    let deck_cards = cards_in_deck(cards, deck);
    DeckStats {
        total: deck_cards.len(),
        due: get_due_cards(&deck_cards, now).len(),
        mastered: deck_cards.iter().filter(|c| c.is_mastered()).count(),
    }
}

/// Number of cards in each box, index 0 being box 1
pub fn box_distribution(cards: &[Card]) -> [usize; MAX_BOX as usize] {
    let mut counts = [0; MAX_BOX as usize];
    for card in cards {
        let index = card.box_level.clamp(MIN_BOX, MAX_BOX) - MIN_BOX;
        counts[index as usize] += 1;
    }
    counts
}

pub fn summarize_session(session: &QuizSession) -> SessionSummary {
    let correct = session.correct_answers();
    let total = session.cards.len();
    SessionSummary {
        correct,
        total,
        accuracy: percentage(correct as u64, total as u64),
    }
}

/// The `limit` most recently started sessions, newest first
pub fn recent_sessions(sessions: &[QuizSession], limit: usize) -> Vec<QuizSession> {
    let mut sorted = sessions.to_vec();
    sorted.sort_by(|a, b| b.started_at.cmp(&a.started_at));
    sorted.truncate(limit);
    sorted
}

/// Answers recorded in sessions started on `day` (UTC)
pub fn reviews_on(sessions: &[QuizSession], day: NaiveDate) -> usize {
    sessions
        .iter()
        .filter(|s| s.started_at.date_naive() == day)
        .map(|s| s.answers.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn card(box_level: u8, correct: u32, incorrect: u32) -> Card {
        let mut c = Card::new("f".to_string(), "b".to_string(), "M".to_string(), now());
        c.box_level = box_level;
        c.correct_count = correct;
        c.incorrect_count = incorrect;
        if correct + incorrect > 0 {
            c.last_reviewed = Some(now() - Duration::days(1));
            c.next_review = Some(now() + Duration::days(1));
        }
        c
    }

    #[test]
    fn test_progress_of_empty_collection() {
        let progress = calculate_progress(&[], &Progress::default());
        assert_eq!(progress, Progress::default());
        assert_eq!(progress.accuracy_rate, 0);
    }

    #[test]
    fn test_progress_counts() {
        let cards = vec![
            card(1, 0, 0),
            card(1, 0, 2), // demoted back to box 1, not new
            card(2, 1, 0),
            card(4, 3, 1),
            card(5, 6, 0),
        ];
        let progress = calculate_progress(&cards, &Progress::default());

        assert_eq!(progress.total_cards, 5);
        assert_eq!(progress.new_cards, 1);
        assert_eq!(progress.learning_cards, 2);
        assert_eq!(progress.mastered_cards, 1);
        assert_eq!(progress.total_reviews, 13);
        // 10 of 13 correct
        assert_eq!(progress.accuracy_rate, 77);
    }

    #[test]
    fn test_progress_keeps_streak_fields() {
        let persisted = Progress {
            current_streak: 4,
            longest_streak: 9,
            last_study_date: NaiveDate::from_ymd_opt(2024, 6, 9),
            total_cards: 100,
            ..Default::default()
        };
        let progress = calculate_progress(&[card(3, 1, 1)], &persisted);

        assert_eq!(progress.current_streak, 4);
        assert_eq!(progress.longest_streak, 9);
        assert_eq!(progress.last_study_date, persisted.last_study_date);
        assert_eq!(progress.total_cards, 1);
        assert_eq!(progress.accuracy_rate, 50);
    }

    #[test]
    fn test_accuracy_bounds() {
        let all_wrong = calculate_progress(&[card(1, 0, 7)], &Progress::default());
        assert_eq!(all_wrong.accuracy_rate, 0);

        let all_right = calculate_progress(&[card(5, 7, 0)], &Progress::default());
        assert_eq!(all_right.accuracy_rate, 100);
    }

    #[test]
    fn test_deck_stats() {
        let mut fresh = card(1, 0, 0);
        fresh.id = "fresh".to_string();
        let mut mastered = card(5, 5, 0);
        mastered.id = "mastered".to_string();
        let mut outside = card(1, 0, 0);
        outside.id = "outside".to_string();

        let mut deck = Deck::new("D".to_string(), String::new(), now());
        deck.card_ids = vec!["fresh".to_string(), "mastered".to_string()];

        let stats = deck_stats(&deck, &[fresh, mastered, outside], now());
        assert_eq!(stats, DeckStats { total: 2, due: 1, mastered: 1 });
    }

    #[test]
    fn test_box_distribution() {
        let cards = vec![card(1, 0, 0), card(1, 0, 0), card(3, 1, 0), card(5, 4, 0)];
        assert_eq!(box_distribution(&cards), [2, 0, 1, 0, 1]);
    }

    #[test]
    fn test_session_summary_and_history() {
        let cards = vec![card(1, 0, 0), card(1, 0, 0), card(1, 0, 0)];
        let mut older = QuizSession::new(cards.clone(), now() - Duration::days(1));
        older.record_answer(cards[0].id.clone(), true, 100);

        let mut newer = QuizSession::new(cards.clone(), now());
        newer.record_answer(cards[0].id.clone(), true, 100);
        newer.record_answer(cards[1].id.clone(), true, 100);
        newer.record_answer(cards[2].id.clone(), false, 100);

        let summary = summarize_session(&newer);
        assert_eq!(summary, SessionSummary { correct: 2, total: 3, accuracy: 67 });

        let empty = QuizSession::new(Vec::new(), now());
        assert_eq!(summarize_session(&empty).accuracy, 0);

        let recent = recent_sessions(&[older.clone(), newer.clone()], 1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, newer.id);

        let sessions = [older, newer];
        assert_eq!(reviews_on(&sessions, now().date_naive()), 3);
        assert_eq!(reviews_on(&sessions, (now() - Duration::days(1)).date_naive()), 1);
    }
}
