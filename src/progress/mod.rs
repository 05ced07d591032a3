//! Progress statistics and streak tracking

pub mod models;
pub mod stats;
pub mod streak;

pub use models::*;
pub use stats::calculate_progress;
pub use streak::{record_study_activity, StreakChange};
