//! JSON file repository
//!
//! Layout under the data directory:
//! ```text
//! cards.json      # Array of all cards
//! decks.json      # Array of all decks
//! settings.json   # User settings
//! progress.json   # Aggregate progress and streak
//! sessions.json   # Last completed sessions, oldest first
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::models::Settings;
use super::repository::Repository;
use crate::flashcards::{Card, Deck, QuizSession};
use crate::progress::Progress;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Deck not found: {0}")]
    DeckNotFound(String),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

const CARDS_FILE: &str = "cards.json";
const DECKS_FILE: &str = "decks.json";
const SETTINGS_FILE: &str = "settings.json";
const PROGRESS_FILE: &str = "progress.json";
const SESSIONS_FILE: &str = "sessions.json";

const ALL_FILES: [&str; 5] = [
    CARDS_FILE,
    DECKS_FILE,
    SETTINGS_FILE,
    PROGRESS_FILE,
    SESSIONS_FILE,
];

pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("hifz"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize the data directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path(&self, file: &str) -> PathBuf {
        self.base_path.join(file)
    }

    /// Read a document, or its default when the file does not exist yet
    fn read_json<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T> {
        let path = self.path(file);
        if !path.exists() {
            return Ok(T::default());
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        self.init()?;
        fs::write(self.path(file), serde_json::to_string_pretty(value)?)?;
        Ok(())
    }
}

impl Repository for FileStorage {
    fn load_cards(&self) -> Result<Vec<Card>> {
        self.read_json(CARDS_FILE)
    }

    fn store_cards(&self, cards: &[Card]) -> Result<()> {
        self.write_json(CARDS_FILE, cards)
    }

    fn load_decks(&self) -> Result<Vec<Deck>> {
        self.read_json(DECKS_FILE)
    }

    fn store_decks(&self, decks: &[Deck]) -> Result<()> {
        self.write_json(DECKS_FILE, decks)
    }

    fn load_settings(&self) -> Result<Settings> {
        self.read_json(SETTINGS_FILE)
    }

    fn store_settings(&self, settings: &Settings) -> Result<()> {
        self.write_json(SETTINGS_FILE, settings)
    }

    fn load_progress(&self) -> Result<Progress> {
        self.read_json(PROGRESS_FILE)
    }

    fn store_progress(&self, progress: &Progress) -> Result<()> {
        self.write_json(PROGRESS_FILE, progress)
    }

    fn load_sessions(&self) -> Result<Vec<QuizSession>> {
        self.read_json(SESSIONS_FILE)
    }

    fn store_sessions(&self, sessions: &[QuizSession]) -> Result<()> {
        self.write_json(SESSIONS_FILE, sessions)
    }

    fn clear_all(&self) -> Result<()> {
        for file in ALL_FILES {
            let path = self.path(file);
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        log::info!("Cleared all data in {}", self.base_path.display());
        Ok(())
    }
}
