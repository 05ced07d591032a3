use anyhow::Result;

use hifz_lib::flashcards::algorithm::box_label;
use hifz_lib::flashcards::MIN_BOX;
use hifz_lib::progress::stats::{box_distribution, recent_sessions, reviews_on, summarize_session};
use hifz_lib::storage::Repository;

use crate::app::App;
use crate::render::terminal::{box_color, paint, progress_bar, Color};
use crate::OutputFormat;

const RECENT_SESSIONS: usize = 5;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let progress = app.study().refresh_progress()?;
    let cards = app.all_cards()?;
    let sessions = app.storage.get_sessions()?;
    let settings = app.storage.get_settings()?;
    let today = app.now().date_naive();

    let distribution = box_distribution(&cards);
    let reviewed_today = reviews_on(&sessions, today);
    let recent = recent_sessions(&sessions, RECENT_SESSIONS);

    match format {
        OutputFormat::Json => {
            let recent_json: Vec<serde_json::Value> = recent
                .iter()
                .map(|s| {
                    let summary = summarize_session(s);
                    serde_json::json!({
                        "id": s.id,
                        "startedAt": s.started_at,
                        "completedAt": s.completed_at,
                        "correct": summary.correct,
                        "total": summary.total,
                        "accuracy": summary.accuracy,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "progress": progress,
                "boxes": distribution,
                "reviewedToday": reviewed_today,
                "dailyGoal": settings.daily_goal,
                "recentSessions": recent_json,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "{} cards: {} new, {} learning, {} mastered",
                progress.total_cards, progress.new_cards, progress.learning_cards, progress.mastered_cards
            );
            println!(
                "Accuracy {} {}% over {} reviews",
                progress_bar(progress.accuracy_rate, 20),
                progress.accuracy_rate,
                progress.total_reviews
            );
            println!(
                "Streak {} day(s), best {}",
                paint(&progress.current_streak.to_string(), Color::BOLD, use_color),
                progress.longest_streak
            );

            let goal = u32::try_from(settings.daily_goal).unwrap_or(0);
            if goal > 0 {
                let percent = (reviewed_today as u64 * 100 / u64::from(goal)).min(100) as u32;
                println!(
                    "Today {} {}/{}",
                    progress_bar(percent, 20),
                    reviewed_today,
                    goal
                );
            }

            println!();
            for (i, count) in distribution.iter().enumerate() {
                let box_level = MIN_BOX + i as u8;
                let label = format!("Box {} {:<9}", box_level, box_label(box_level));
                println!("{} {:>5}", paint(&label, box_color(box_level), use_color), count);
            }

            if !recent.is_empty() {
                println!("\nRecent sessions");
                for session in &recent {
                    let summary = summarize_session(session);
                    println!(
                        "  {}  {}/{} ({}%)",
                        session.started_at.format("%Y-%m-%d %H:%M"),
                        summary.correct,
                        summary.total,
                        summary.accuracy
                    );
                }
            }
        }
    }

    Ok(())
}
