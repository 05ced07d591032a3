//! First-run population from a vocabulary file
//!
//! The file maps a module name to its word list:
//! ```json
//! { "Greetings": [{ "Arabic_Term": "سلام", "Bengali_Meaning": "শান্তি", "Transliteration": "salām" }] }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::file_storage::Result;
use super::repository::Repository;
use crate::flashcards::{Card, Deck};

#[derive(Debug, Deserialize)]
struct VocabularyItem {
    #[serde(rename = "Arabic_Term")]
    arabic_term: String,
    #[serde(rename = "Bengali_Meaning")]
    bengali_meaning: String,
    #[serde(rename = "Transliteration", default)]
    transliteration: Option<String>,
}

/// Create one deck per module and a new card per item
///
/// Does nothing when the repository already holds cards. Returns whether
/// anything was written.
pub fn initialize_default_data<R: Repository + ?Sized>(
    repo: &R,
    vocabulary_json: &str,
    now: DateTime<Utc>,
) -> Result<bool> {
    if !repo.get_all_cards()?.is_empty() {
        log::debug!("Repository already has cards, skipping seed");
        return Ok(false);
    }

    let vocabulary: BTreeMap<String, Vec<VocabularyItem>> = serde_json::from_str(vocabulary_json)?;

    let mut cards = Vec::new();
    let mut decks = repo.list_decks()?;
    let created = vocabulary.len();

    for (module, items) in vocabulary {
        let mut deck = Deck::new(
            module.clone(),
            format!("{} vocabulary items", items.len()),
            now,
        );

        for item in items {
            let mut card = Card::new(item.arabic_term, item.bengali_meaning, module.clone(), now);
            card.pronunciation = item.transliteration.filter(|t| !t.trim().is_empty());
            deck.card_ids.push(card.id.clone());
            cards.push(card);
        }

        decks.push(deck);
    }

    repo.store_cards(&cards)?;
    repo.store_decks(&decks)?;

    log::info!("Seeded {} cards in {} new decks", cards.len(), created);
    Ok(!cards.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::MIN_BOX;
    use crate::storage::MemoryStorage;

    const VOCABULARY: &str = r#"{
        "Numbers": [
            {"Arabic_Term": "واحد", "Bengali_Meaning": "এক", "Transliteration": "wāḥid"},
            {"Arabic_Term": "اثنان", "Bengali_Meaning": "দুই", "Transliteration": "ithnān"}
        ],
        "Colours": [
            {"Arabic_Term": "أحمر", "Bengali_Meaning": "লাল", "Transliteration": ""}
        ]
    }"#;

    #[test]
    fn test_seed_creates_decks_and_cards() {
        let repo = MemoryStorage::new();
        let now = Utc::now();

        assert!(initialize_default_data(&repo, VOCABULARY, now).unwrap());

        let decks = repo.list_decks().unwrap();
        let names: Vec<&str> = decks.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Colours", "Numbers"]);
        assert_eq!(decks[1].description, "2 vocabulary items");
        assert_eq!(decks[1].card_ids.len(), 2);

        let cards = repo.get_all_cards().unwrap();
        assert_eq!(cards.len(), 3);
        assert!(cards.iter().all(|c| c.box_level == MIN_BOX && c.is_unseen()));
        let red = cards.iter().find(|c| c.front == "أحمر").unwrap();
        assert_eq!(red.module, "Colours");
        assert_eq!(red.pronunciation, None);
    }

    #[test]
    fn test_seed_keeps_existing_empty_decks() {
        let repo = MemoryStorage::new();
        let now = Utc::now();
        let mine = repo.create_deck("Mine".to_string(), String::new(), now).unwrap();

        assert!(initialize_default_data(&repo, VOCABULARY, now).unwrap());

        let decks = repo.list_decks().unwrap();
        assert_eq!(decks.len(), 3);
        assert_eq!(decks[0], mine);
        assert_eq!(decks.iter().filter(|d| !d.card_ids.is_empty()).count(), 2);
    }

    #[test]
    fn test_seed_runs_once() {
        let repo = MemoryStorage::new();
        let now = Utc::now();

        assert!(initialize_default_data(&repo, VOCABULARY, now).unwrap());
        assert!(!initialize_default_data(&repo, VOCABULARY, now).unwrap());
        assert_eq!(repo.get_all_cards().unwrap().len(), 3);
    }

    #[test]
    fn test_seed_rejects_malformed_file() {
        let repo = MemoryStorage::new();
        assert!(initialize_default_data(&repo, r#"{"Numbers": 3}"#, Utc::now()).is_err());
        assert!(repo.list_decks().unwrap().is_empty());
    }
}
