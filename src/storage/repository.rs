//! Repository port for cards, decks, settings, progress and sessions
//!
//! Implementations only load and store whole documents; the record-level
//! operations are provided on top of those primitives.

use chrono::{DateTime, Utc};

use super::file_storage::{Result, StorageError};
use super::models::{Settings, SettingsUpdate};
use crate::flashcards::{Card, CardUpdate, Deck, QuizSession};
use crate::progress::Progress;

/// Number of sessions kept in the history log
pub const MAX_SESSIONS: usize = 50;

pub trait Repository {
    fn load_cards(&self) -> Result<Vec<Card>>;
    fn store_cards(&self, cards: &[Card]) -> Result<()>;

    fn load_decks(&self) -> Result<Vec<Deck>>;
    fn store_decks(&self, decks: &[Deck]) -> Result<()>;

    fn load_settings(&self) -> Result<Settings>;
    fn store_settings(&self, settings: &Settings) -> Result<()>;

    fn load_progress(&self) -> Result<Progress>;
    fn store_progress(&self, progress: &Progress) -> Result<()>;

    fn load_sessions(&self) -> Result<Vec<QuizSession>>;
    fn store_sessions(&self, sessions: &[QuizSession]) -> Result<()>;

    /// Remove every stored document
    fn clear_all(&self) -> Result<()>;

    // ==================== Card Operations ====================

    fn get_all_cards(&self) -> Result<Vec<Card>> {
        self.load_cards()
    }

    fn get_card(&self, id: &str) -> Result<Option<Card>> {
        Ok(self.load_cards()?.into_iter().find(|c| c.id == id))
    }

    /// Merge `update` into the stored card and return the result
    fn update_card(&self, id: &str, update: &CardUpdate) -> Result<Card> {
        let mut cards = self.load_cards()?;
        let card = cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StorageError::CardNotFound(id.to_string()))?;

        card.apply(update);
        let updated = card.clone();
        self.store_cards(&cards)?;

        Ok(updated)
    }

    /// Create a card in a deck; its module is the deck name
    fn add_card(
        &self,
        deck_id: &str,
        front: String,
        back: String,
        pronunciation: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Card> {
        let mut decks = self.load_decks()?;
        let deck = decks
            .iter_mut()
            .find(|d| d.id == deck_id)
            .ok_or_else(|| StorageError::DeckNotFound(deck_id.to_string()))?;

        let mut card = Card::new(front, back, deck.name.clone(), now);
        card.pronunciation = pronunciation.filter(|p| !p.trim().is_empty());

        deck.card_ids.push(card.id.clone());
        deck.updated_at = now;

        let mut cards = self.load_cards()?;
        cards.push(card.clone());
        self.store_cards(&cards)?;
        self.store_decks(&decks)?;

        Ok(card)
    }

    /// Delete a card and drop it from every deck
    fn delete_card(&self, id: &str, now: DateTime<Utc>) -> Result<()> {
        let mut cards = self.load_cards()?;
        let len_before = cards.len();
        cards.retain(|c| c.id != id);
        if cards.len() == len_before {
            return Err(StorageError::CardNotFound(id.to_string()));
        }

        let mut decks = self.load_decks()?;
        for deck in decks.iter_mut().filter(|d| d.contains(id)) {
            deck.card_ids.retain(|card_id| card_id != id);
            deck.updated_at = now;
        }

        self.store_cards(&cards)?;
        self.store_decks(&decks)?;
        Ok(())
    }

    /// Make `deck_id` the only deck containing the card
    fn move_card(&self, card_id: &str, deck_id: &str, now: DateTime<Utc>) -> Result<Card> {
        let mut decks = self.load_decks()?;
        let target_name = decks
            .iter()
            .find(|d| d.id == deck_id)
            .map(|d| d.name.clone())
            .ok_or_else(|| StorageError::DeckNotFound(deck_id.to_string()))?;

        let card = self.update_card(
            card_id,
            &CardUpdate {
                module: Some(target_name),
                ..Default::default()
            },
        )?;

        for deck in decks.iter_mut() {
            if deck.id == deck_id {
                if !deck.contains(card_id) {
                    deck.card_ids.push(card_id.to_string());
                    deck.updated_at = now;
                }
            } else if deck.contains(card_id) {
                deck.card_ids.retain(|id| id != card_id);
                deck.updated_at = now;
            }
        }
        self.store_decks(&decks)?;

        Ok(card)
    }

    // ==================== Deck Operations ====================

    fn list_decks(&self) -> Result<Vec<Deck>> {
        self.load_decks()
    }

    fn get_deck(&self, id: &str) -> Result<Option<Deck>> {
        Ok(self.load_decks()?.into_iter().find(|d| d.id == id))
    }

    fn create_deck(&self, name: String, description: String, now: DateTime<Utc>) -> Result<Deck> {
        if name.trim().is_empty() {
            return Err(StorageError::InvalidOperation(
                "Deck name must not be empty".to_string(),
            ));
        }

        let deck = Deck::new(name, description, now);
        let mut decks = self.load_decks()?;
        decks.push(deck.clone());
        self.store_decks(&decks)?;

        Ok(deck)
    }

    /// Delete a deck; its cards stay in the collection
    fn delete_deck(&self, id: &str) -> Result<()> {
        let mut decks = self.load_decks()?;
        let len_before = decks.len();
        decks.retain(|d| d.id != id);
        if decks.len() == len_before {
            return Err(StorageError::DeckNotFound(id.to_string()));
        }
        self.store_decks(&decks)
    }

    // ==================== Settings & Progress ====================

    fn get_settings(&self) -> Result<Settings> {
        self.load_settings()
    }

    fn update_settings(&self, update: &SettingsUpdate) -> Result<Settings> {
        let mut settings = self.load_settings()?;
        settings.apply(update);
        self.store_settings(&settings)?;
        Ok(settings)
    }

    fn get_progress(&self) -> Result<Progress> {
        self.load_progress()
    }

    fn save_progress(&self, progress: &Progress) -> Result<()> {
        self.store_progress(progress)
    }

    // ==================== Session History ====================

    fn get_sessions(&self) -> Result<Vec<QuizSession>> {
        self.load_sessions()
    }

    /// Append to the history, evicting the oldest beyond [`MAX_SESSIONS`]
    fn append_session(&self, session: QuizSession) -> Result<()> {
        let mut sessions = self.load_sessions()?;
        sessions.push(session);
        if sessions.len() > MAX_SESSIONS {
            let excess = sessions.len() - MAX_SESSIONS;
            sessions.drain(..excess);
        }
        self.store_sessions(&sessions)
    }
}
