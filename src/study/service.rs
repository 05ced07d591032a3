use crate::clock::Clock;
use crate::flashcards::algorithm::grade_card;
use crate::flashcards::session::{cards_in_deck, get_due_cards, get_session_cards};
use crate::flashcards::{Card, Grade, QuizSession};
use crate::progress::{calculate_progress, record_study_activity, Progress};
use crate::storage::{Repository, Result, StorageError};

/// Outcome of asking for a new session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStart {
    DeckNotFound,
    /// The pool has no backlog, due or unseen cards
    NothingDue,
    Ready(QuizSession),
}

/// Runs study sessions against a repository
///
/// Each operation reads `now` from the clock once and uses it throughout.
pub struct StudyService<'a, R: Repository + ?Sized, C: Clock + ?Sized> {
    repo: &'a R,
    clock: &'a C,
}

impl<'a, R: Repository + ?Sized, C: Clock + ?Sized> StudyService<'a, R, C> {
    pub fn new(repo: &'a R, clock: &'a C) -> Self {
        Self { repo, clock }
    }

    /// Compose a session from one deck's cards
    pub fn start_session(&self, deck_id: &str) -> Result<SessionStart> {
        let Some(deck) = self.repo.get_deck(deck_id)? else {
            return Ok(SessionStart::DeckNotFound);
        };
        let pool = cards_in_deck(&self.repo.get_all_cards()?, &deck);
        self.compose(&pool)
    }

    /// Compose a session from the whole collection
    pub fn start_review(&self) -> Result<SessionStart> {
        let pool = self.repo.get_all_cards()?;
        self.compose(&pool)
    }

    fn compose(&self, pool: &[Card]) -> Result<SessionStart> {
        let now = self.clock.now();
        let size = self.repo.get_settings()?.session_size();

        let cards = get_session_cards(pool, size, now);
        if cards.is_empty() {
            return Ok(SessionStart::NothingDue);
        }
        Ok(SessionStart::Ready(QuizSession::new(cards, now)))
    }

    /// Stored state of the card `session` will grade next
    pub fn current_card(&self, session: &QuizSession) -> Result<Option<Card>> {
        match session.current_card() {
            Some(card) => self.repo.get_card(&card.id),
            None => Ok(None),
        }
    }

    /// Grade the current card of `session` and persist the outcome
    ///
    /// Cards are answered in presentation order, each once. The scheduler runs
    /// on the stored card rather than the session's copy.
    pub fn grade(
        &self,
        session: &mut QuizSession,
        card_id: &str,
        grade: Grade,
        correct: bool,
        time_spent_ms: u64,
    ) -> Result<Card> {
        if session.is_completed() {
            return Err(StorageError::InvalidOperation(format!(
                "Session {} is already completed",
                session.id
            )));
        }
        match session.current_card() {
            Some(current) if current.id == card_id => {}
            Some(current) => {
                return Err(StorageError::InvalidOperation(format!(
                    "Card {} is not the current card of session {} (expected {})",
                    card_id, session.id, current.id
                )));
            }
            None => {
                return Err(StorageError::InvalidOperation(format!(
                    "Session {} has no unanswered cards",
                    session.id
                )));
            }
        }

        let now = self.clock.now();
        let stored = self
            .repo
            .get_card(card_id)?
            .ok_or_else(|| StorageError::CardNotFound(card_id.to_string()))?;

        let update = grade_card(&stored, grade, now);
        let updated = self.repo.update_card(card_id, &update)?;
        session.record_answer(card_id.to_string(), correct, time_spent_ms);

        let mut progress = self.repo.get_progress()?;
        record_study_activity(&mut progress, now.date_naive());
        self.repo.save_progress(&progress)?;

        Ok(updated)
    }

    /// Complete `session`, store it in the history and refresh progress
    pub fn finish(&self, mut session: QuizSession) -> Result<Progress> {
        if session.is_completed() {
            return Err(StorageError::InvalidOperation(format!(
                "Session {} is already completed",
                session.id
            )));
        }
        session.complete(self.clock.now());
        log::info!(
            "Completed session {}: {}/{} correct",
            session.id,
            session.correct_answers(),
            session.answers.len()
        );
        self.repo.append_session(session)?;
        self.refresh_progress()
    }

    /// Recompute the derived progress fields and store them
    pub fn refresh_progress(&self) -> Result<Progress> {
        let cards = self.repo.get_all_cards()?;
        let progress = calculate_progress(&cards, &self.repo.get_progress()?);
        self.repo.save_progress(&progress)?;
        Ok(progress)
    }

    pub fn due_cards(&self) -> Result<Vec<Card>> {
        Ok(get_due_cards(&self.repo.get_all_cards()?, self.clock.now()))
    }
}
