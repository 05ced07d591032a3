//! Whole-collection export and import as a single JSON document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::file_storage::Result;
use super::models::Settings;
use super::repository::{Repository, MAX_SESSIONS};
use crate::flashcards::{Card, Deck, QuizSession};
use crate::progress::Progress;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument {
    cards: Vec<Card>,
    decks: Vec<Deck>,
    settings: Settings,
    progress: Progress,
    sessions: Vec<QuizSession>,
    exported_at: DateTime<Utc>,
}

/// Import input; absent sections leave the stored data untouched
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImportDocument {
    cards: Option<Vec<Card>>,
    decks: Option<Vec<Deck>>,
    settings: Option<Settings>,
    progress: Option<Progress>,
    sessions: Option<Vec<QuizSession>>,
}

/// What an import replaced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub cards: Option<usize>,
    pub decks: Option<usize>,
    pub sessions: Option<usize>,
    pub settings: bool,
    pub progress: bool,
}

impl ImportSummary {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Serialize every document in the repository
pub fn export_data<R: Repository + ?Sized>(repo: &R, now: DateTime<Utc>) -> Result<String> {
    let document = ExportDocument {
        cards: repo.get_all_cards()?,
        decks: repo.list_decks()?,
        settings: repo.get_settings()?,
        progress: repo.get_progress()?,
        sessions: repo.get_sessions()?,
        exported_at: now,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Overwrite each section present in `json`
///
/// The whole document is parsed before anything is written, so a malformed
/// document changes nothing. Only the newest [`MAX_SESSIONS`] sessions are kept.
pub fn import_data<R: Repository + ?Sized>(repo: &R, json: &str) -> Result<ImportSummary> {
    let document: ImportDocument = serde_json::from_str(json)?;
    let mut summary = ImportSummary::default();

    if let Some(cards) = document.cards {
        repo.store_cards(&cards)?;
        summary.cards = Some(cards.len());
    }
    if let Some(decks) = document.decks {
        repo.store_decks(&decks)?;
        summary.decks = Some(decks.len());
    }
    if let Some(settings) = document.settings {
        repo.store_settings(&settings)?;
        summary.settings = true;
    }
    if let Some(progress) = document.progress {
        repo.store_progress(&progress)?;
        summary.progress = true;
    }
    if let Some(mut sessions) = document.sessions {
        if sessions.len() > MAX_SESSIONS {
            let excess = sessions.len() - MAX_SESSIONS;
            sessions.drain(..excess);
        }
        repo.store_sessions(&sessions)?;
        summary.sessions = Some(sessions.len());
    }

    log::info!(
        "Imported data: {} cards, {} decks, {} sessions",
        summary.cards.unwrap_or(0),
        summary.decks.unwrap_or(0),
        summary.sessions.unwrap_or(0)
    );
    Ok(summary)
}
