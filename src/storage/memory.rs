//! In-process repository

use std::cell::RefCell;

use super::file_storage::Result;
use super::models::Settings;
use super::repository::Repository;
use crate::flashcards::{Card, Deck, QuizSession};
use crate::progress::Progress;

#[derive(Debug, Default, Clone)]
struct MemoryData {
    cards: Vec<Card>,
    decks: Vec<Deck>,
    settings: Settings,
    progress: Progress,
    sessions: Vec<QuizSession>,
}

/// Repository holding every document in memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: RefCell<MemoryData>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryStorage {
    fn load_cards(&self) -> Result<Vec<Card>> {
        Ok(self.data.borrow().cards.clone())
    }

    fn store_cards(&self, cards: &[Card]) -> Result<()> {
        self.data.borrow_mut().cards = cards.to_vec();
        Ok(())
    }

    fn load_decks(&self) -> Result<Vec<Deck>> {
        Ok(self.data.borrow().decks.clone())
    }

    fn store_decks(&self, decks: &[Deck]) -> Result<()> {
        self.data.borrow_mut().decks = decks.to_vec();
        Ok(())
    }

    fn load_settings(&self) -> Result<Settings> {
        Ok(self.data.borrow().settings.clone())
    }

    fn store_settings(&self, settings: &Settings) -> Result<()> {
        self.data.borrow_mut().settings = settings.clone();
        Ok(())
    }

    fn load_progress(&self) -> Result<Progress> {
        Ok(self.data.borrow().progress.clone())
    }

    fn store_progress(&self, progress: &Progress) -> Result<()> {
        self.data.borrow_mut().progress = progress.clone();
        Ok(())
    }

    fn load_sessions(&self) -> Result<Vec<QuizSession>> {
        Ok(self.data.borrow().sessions.clone())
    }

    fn store_sessions(&self, sessions: &[QuizSession]) -> Result<()> {
        self.data.borrow_mut().sessions = sessions.to_vec();
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        *self.data.borrow_mut() = MemoryData::default();
        Ok(())
    }
}
