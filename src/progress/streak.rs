//! Daily study streak tracking
//!
//! Days are compared as calendar dates so studying late one evening and early
//! the next morning still counts as consecutive days.

use chrono::{Duration, NaiveDate};

use super::models::Progress;

/// How a call to [`record_study_activity`] changed the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// First recorded study day
    Started,
    /// Already studied today
    Unchanged,
    /// Studied yesterday, streak grows by one
    Extended,
    /// A day or more was missed
    Reset,
}

/// Record that the user studied on `today`
pub fn record_study_activity(progress: &mut Progress, today: NaiveDate) -> StreakChange {
    let change = match progress.last_study_date {
        None => StreakChange::Started,
        Some(last) if last == today => return StreakChange::Unchanged,
        Some(last) if last + Duration::days(1) == today => StreakChange::Extended,
        Some(_) => StreakChange::Reset,
    };

    progress.current_streak = match change {
        StreakChange::Extended => progress.current_streak.saturating_add(1),
        _ => 1,
    };
    progress.longest_streak = progress.longest_streak.max(progress.current_streak);
    progress.last_study_date = Some(today);

    log::debug!(
        "Streak {:?}: current {} longest {}",
        change,
        progress.current_streak,
        progress.longest_streak
    );
    change
}
