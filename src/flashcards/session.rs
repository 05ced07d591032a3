//! Study session composition
//!
//! Sessions are filled in three tiers, each skipping cards an earlier tier
//! already took:
//! 1. incorrect backlog: missed cards still in box 1 or 2, oldest miss first
//! 2. due cards, earliest due first (never-scheduled cards first)
//! 3. unseen cards in pool order

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::models::{Card, Deck};

/// Most backlog cards a single session takes
pub const INCORRECT_BACKLOG_LIMIT: usize = 5;

/// Highest box still counted as early learning for the backlog tier
const BACKLOG_MAX_BOX: u8 = 2;

fn in_incorrect_backlog(card: &Card, now: DateTime<Utc>) -> bool {
    match card.last_reviewed {
        Some(last) => card.incorrect_count > 0 && card.box_level <= BACKLOG_MAX_BOX && last <= now,
        None => false,
    }
}

/// Cards whose next review is unset or has passed, in pool order
pub fn get_due_cards(cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
    cards.iter().filter(|card| card.is_due(now)).cloned().collect()
}

/// Pick up to `max_cards` cards to study, in presentation order
pub fn get_session_cards(cards: &[Card], max_cards: usize, now: DateTime<Utc>) -> Vec<Card> {
    if max_cards == 0 || cards.is_empty() {
        return Vec::new();
    }

    let mut backlog: Vec<&Card> = cards
        .iter()
        .filter(|card| in_incorrect_backlog(card, now))
        .collect();
    backlog.sort_by_key(|card| card.last_reviewed);
    backlog.truncate(INCORRECT_BACKLOG_LIMIT);

    let backlog_ids: HashSet<&str> = backlog.iter().map(|card| card.id.as_str()).collect();
    let mut due: Vec<&Card> = cards
        .iter()
        .filter(|card| !backlog_ids.contains(card.id.as_str()) && card.is_due(now))
        .collect();
    // None orders before Some, so never-scheduled cards lead
    due.sort_by_key(|card| card.next_review);

    let mut seen: HashSet<&str> = HashSet::new();
    let mut session = Vec::with_capacity(max_cards.min(cards.len()));

    let unseen = cards.iter().filter(|card| card.is_unseen());
    for card in backlog.into_iter().chain(due).chain(unseen) {
        if session.len() == max_cards {
            break;
        }
        if seen.insert(card.id.as_str()) {
            session.push(card.clone());
        }
    }

    log::debug!(
        "Composed session of {} cards from a pool of {}",
        session.len(),
        cards.len()
    );
    session
}

/// Cards belonging to `deck`, in pool order
pub fn cards_in_deck(cards: &[Card], deck: &Deck) -> Vec<Card> {
    let members: HashSet<&str> = deck.card_ids.iter().map(String::as_str).collect();
    cards
        .iter()
        .filter(|card| members.contains(card.id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn card(id: &str) -> Card {
        let mut card = Card::new(id.to_string(), format!("{}-back", id), "M".to_string(), now());
        card.id = id.to_string();
        card
    }

    /// Reviewed card that was missed and is sitting in box 1
    fn missed(id: &str, hours_ago: i64) -> Card {
        let mut c = card(id);
        c.last_reviewed = Some(now() - Duration::hours(hours_ago));
        c.next_review = Some(now() + Duration::hours(24 - hours_ago));
        c.incorrect_count = 1;
        c
    }

    /// Reviewed card due `hours_ago` hours ago, never missed
    fn due(id: &str, hours_ago: i64) -> Card {
        let mut c = card(id);
        c.box_level = 3;
        c.correct_count = 2;
        c.last_reviewed = Some(now() - Duration::days(7) - Duration::hours(hours_ago));
        c.next_review = Some(now() - Duration::hours(hours_ago));
        c
    }

    /// Reviewed card not due for a while
    fn scheduled(id: &str) -> Card {
        let mut c = card(id);
        c.box_level = 4;
        c.correct_count = 3;
        c.last_reviewed = Some(now() - Duration::days(1));
        c.next_review = Some(now() + Duration::days(13));
        c
    }

    fn ids(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_empty_pool() {
        assert!(get_session_cards(&[], 10, now()).is_empty());
        assert!(get_due_cards(&[], now()).is_empty());
    }

    #[test]
    fn test_zero_size_session() {
        let pool = vec![card("a"), card("b")];
        assert!(get_session_cards(&pool, 0, now()).is_empty());
    }

    #[test]
    fn test_backlog_capped_at_five_oldest_first() {
        let pool: Vec<Card> = (0..6).map(|i| missed(&format!("m{}", i), i + 1)).collect();
        let session = get_session_cards(&pool, 10, now());

        // m5 was missed longest ago, m0 most recently
        assert_eq!(&ids(&session)[..5], &["m5", "m4", "m3", "m2", "m1"]);
        // m0 is neither due nor unseen, so nothing else qualifies
        assert_eq!(session.len(), 5);
    }

    #[test]
    fn test_backlog_then_due_then_unseen() {
        let mut pool: Vec<Card> = (0..6).map(|i| missed(&format!("m{}", i), i + 1)).collect();
        pool.push(due("d-recent", 1));
        pool.push(due("d-old", 30));
        pool.push(scheduled("later"));
        pool.push(card("new1"));
        pool.push(card("new2"));

        let session = get_session_cards(&pool, 10, now());
        assert_eq!(
            ids(&session),
            vec!["m5", "m4", "m3", "m2", "m1", "new1", "new2", "d-old", "d-recent"]
        );
    }

    #[test]
    fn test_session_truncated_to_limit() {
        let pool = vec![missed("m", 2), due("d", 1), card("n1"), card("n2")];
        let session = get_session_cards(&pool, 2, now());
        assert_eq!(ids(&session), vec!["m", "n1"]);
    }

    #[test]
    fn test_backlog_requires_early_box_and_past_review() {
        let mut high_box = missed("high", 2);
        high_box.box_level = 3;
        let mut future = missed("future", 2);
        future.last_reviewed = Some(now() + Duration::hours(1));
        let never_missed = scheduled("fine");

        let pool = vec![high_box, future, never_missed];
        assert!(get_session_cards(&pool, 10, now()).is_empty());
    }

    #[test]
    fn test_no_duplicates_and_never_exceeds_limit() {
        let mut pool = Vec::new();
        for i in 0..4 {
            let mut m = missed(&format!("m{}", i), i + 1);
            // also due, so it qualifies for tiers 1 and 2
            m.next_review = Some(now() - Duration::hours(1));
            pool.push(m);
        }
        for i in 0..4 {
            pool.push(card(&format!("n{}", i)));
        }

        for limit in 0..12 {
            let session = get_session_cards(&pool, limit, now());
            let unique: HashSet<&str> = session.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(unique.len(), session.len());
            assert!(session.len() <= limit);
        }

        let session = get_session_cards(&pool, 20, now());
        assert_eq!(session.len(), 8);
        assert_eq!(&ids(&session)[..4], &["m3", "m2", "m1", "m0"]);
    }

    #[test]
    fn test_get_due_cards_keeps_pool_order() {
        let pool = vec![scheduled("later"), due("d1", 5), card("new"), due("d2", 50)];
        assert_eq!(ids(&get_due_cards(&pool, now())), vec!["d1", "new", "d2"]);
    }

    #[test]
    fn test_due_exactly_now_is_due() {
        let mut c = card("edge");
        c.next_review = Some(now());
        assert_eq!(get_due_cards(&[c], now()).len(), 1);
    }

    #[test]
    fn test_cards_in_deck() {
        let pool = vec![card("a"), card("b"), card("c")];
        let mut deck = Deck::new("Deck".to_string(), String::new(), now());
        deck.card_ids = vec!["c".to_string(), "a".to_string(), "missing".to_string()];

        assert_eq!(ids(&cards_in_deck(&pool, &deck)), vec!["a", "c"]);
    }
}
