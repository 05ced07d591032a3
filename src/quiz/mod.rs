//! Answer capture for the different quiz modes
//!
//! Multiple-choice and typed answers produce a right/wrong outcome that is
//! turned into a grade; flashcard mode asks the learner for the grade.

pub mod answer;
pub mod options;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::flashcards::Grade;

pub use answer::{check_answer, normalize_text};
pub use options::{generate_multiple_choice_options, AnswerOption, DEFAULT_OPTION_COUNT};

/// How answers are captured during a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
    #[default]
    MultipleChoice,
    TypeAnswer,
    Flashcard,
}

impl QuizMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizMode::MultipleChoice => "multiple-choice",
            QuizMode::TypeAnswer => "type-answer",
            QuizMode::Flashcard => "flashcard",
        }
    }

    /// Whether the learner picks the grade instead of it being derived
    pub fn grades_explicitly(&self) -> bool {
        matches!(self, QuizMode::Flashcard)
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multiple-choice" | "mc" => Ok(QuizMode::MultipleChoice),
            "type-answer" | "type" => Ok(QuizMode::TypeAnswer),
            "flashcard" | "flip" => Ok(QuizMode::Flashcard),
            other => Err(format!(
                "unknown quiz mode '{}' (expected multiple-choice, type-answer or flashcard)",
                other
            )),
        }
    }
}

/// Grade for an automatically checked answer
pub fn grade_for_outcome(correct: bool) -> Grade {
    if correct {
        Grade::Good
    } else {
        Grade::Again
    }
}
