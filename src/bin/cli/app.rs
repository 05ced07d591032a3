use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use hifz_lib::clock::{Clock, SystemClock};
use hifz_lib::flashcards::{Card, Deck};
use hifz_lib::storage::{FileStorage, Repository};
use hifz_lib::study::StudyService;

/// Shared application state for CLI commands
pub struct App {
    pub storage: FileStorage,
    pub clock: SystemClock,
}

impl App {
    /// Open the given data directory, or the default one
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => FileStorage::default_data_dir().context("Failed to get data directory")?,
        };

        let storage = FileStorage::new(data_dir);
        storage.init().context("Failed to initialize data directory")?;

        Ok(Self {
            storage,
            clock: SystemClock,
        })
    }

    pub fn study(&self) -> StudyService<'_, FileStorage, SystemClock> {
        StudyService::new(&self.storage, &self.clock)
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Find a deck by name (case-insensitive prefix match)
    pub fn find_deck(&self, name: &str) -> Result<Deck> {
        let decks = self.list_decks()?;
        let name_lower = name.to_lowercase();

        // Exact match first
        if let Some(deck) = decks.iter().find(|d| d.name.to_lowercase() == name_lower) {
            return Ok(deck.clone());
        }

        let matches: Vec<&Deck> = decks
            .iter()
            .filter(|d| d.name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No deck matching '{}'. Available decks:\n{}",
                name,
                decks
                    .iter()
                    .map(|d| format!("  - {}", d.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous deck name '{}'. Matches:\n{}",
                name,
                matches
                    .iter()
                    .map(|d| format!("  - {}", d.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Find a card by id or unique id prefix
    pub fn find_card(&self, id: &str) -> Result<Card> {
        let cards = self.all_cards()?;

        if let Some(card) = cards.iter().find(|c| c.id == id) {
            return Ok(card.clone());
        }

        let matches: Vec<&Card> = cards.iter().filter(|c| c.id.starts_with(id)).collect();
        match matches.len() {
            0 => bail!("No card with id '{}'", id),
            1 => Ok(matches[0].clone()),
            n => bail!("Card id prefix '{}' matches {} cards", id, n),
        }
    }

    pub fn list_decks(&self) -> Result<Vec<Deck>> {
        self.storage.list_decks().context("Failed to list decks")
    }

    pub fn all_cards(&self) -> Result<Vec<Card>> {
        self.storage.get_all_cards().context("Failed to load cards")
    }
}
