use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::quiz::QuizMode;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme '{}' (expected light, dark or system)", other)),
        }
    }
}

/// User preferences; fields missing from the stored document take defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub quiz_mode: QuizMode,
    pub cards_per_session: i32,
    /// Target number of answers per day
    pub daily_goal: i32,
    pub show_transliteration: bool,
    pub theme: Theme,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quiz_mode: QuizMode::MultipleChoice,
            cards_per_session: 20,
            daily_goal: 50,
            show_transliteration: true,
            theme: Theme::System,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Session size; zero or negative values give empty sessions
    pub fn session_size(&self) -> usize {
        usize::try_from(self.cards_per_session).unwrap_or(0)
    }

    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(mode) = update.quiz_mode {
            self.quiz_mode = mode;
        }
        if let Some(n) = update.cards_per_session {
            self.cards_per_session = n;
        }
        if let Some(goal) = update.daily_goal {
            self.daily_goal = goal;
        }
        if let Some(show) = update.show_transliteration {
            self.show_transliteration = show;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(sound) = update.sound_enabled {
            self.sound_enabled = sound;
        }
    }
}

/// Partial settings change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub quiz_mode: Option<QuizMode>,
    pub cards_per_session: Option<i32>,
    pub daily_goal: Option<i32>,
    pub show_transliteration: Option<bool>,
    pub theme: Option<Theme>,
    pub sound_enabled: Option<bool>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
