use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{bail, Result};

use hifz_lib::flashcards::algorithm::{format_interval, interval_days, preview_intervals};
use hifz_lib::flashcards::{Card, Grade};
use hifz_lib::progress::stats::summarize_session;
use hifz_lib::quiz::{
    check_answer, generate_multiple_choice_options, grade_for_outcome, QuizMode,
    DEFAULT_OPTION_COUNT,
};
use hifz_lib::storage::Repository;
use hifz_lib::study::SessionStart;

use crate::app::App;
use crate::render::terminal::{box_color, paint, Color};

/// What the learner did with one card
enum Answer {
    Graded { grade: Grade, correct: bool },
    Quit,
}

pub fn run(app: &App, deck_name: Option<&str>, mode: Option<QuizMode>, use_color: bool) -> Result<()> {
    let settings = app.storage.get_settings()?;
    let mode = mode.unwrap_or(settings.quiz_mode);
    let service = app.study();

    let start = match deck_name {
        Some(name) => {
            let deck = app.find_deck(name)?;
            service.start_session(&deck.id)?
        }
        None => service.start_review()?,
    };

    let mut session = match start {
        SessionStart::Ready(session) => session,
        SessionStart::NothingDue => {
            println!("Nothing to study right now. Come back later!");
            return Ok(());
        }
        SessionStart::DeckNotFound => bail!("Deck not found"),
    };

    let all_cards = app.all_cards()?;
    let mut rng = rand::thread_rng();
    let total = session.cards.len();
    println!(
        "{} cards, {} mode. Type 'q' to stop.\n",
        total,
        paint(mode.as_str(), Color::CYAN, use_color)
    );

    while let Some(card) = session.current_card().cloned() {
        let position = session.answers.len() + 1;
        println!(
            "{} {}",
            paint(&format!("({}/{})", position, total), Color::GRAY, use_color),
            paint(&card.front, Color::BOLD, use_color)
        );
        if settings.show_transliteration {
            if let Some(pronunciation) = &card.pronunciation {
                println!("    {}", paint(pronunciation, Color::DIM, use_color));
            }
        }

        let started = Instant::now();
        let answer = match mode {
            QuizMode::MultipleChoice => {
                let options =
                    generate_multiple_choice_options(&card, &all_cards, DEFAULT_OPTION_COUNT, &mut rng);
                for (i, option) in options.iter().enumerate() {
                    println!("  {}) {}", i + 1, option.text);
                }
                match read_choice(options.len())? {
                    Some(choice) => {
                        let correct = options[choice].is_correct;
                        Answer::Graded {
                            grade: grade_for_outcome(correct),
                            correct,
                        }
                    }
                    None => Answer::Quit,
                }
            }
            QuizMode::TypeAnswer => match prompt("Meaning: ")? {
                Some(input) if input.trim() != "q" => {
                    let correct = check_answer(&input, &card.back);
                    Answer::Graded {
                        grade: grade_for_outcome(correct),
                        correct,
                    }
                }
                _ => Answer::Quit,
            },
            QuizMode::Flashcard => match prompt("Press Enter to reveal ")? {
                Some(input) if input.trim() != "q" => {
                    println!("  {}", card.back);
                    let stored = service.current_card(&session)?.unwrap_or_else(|| card.clone());
                    match read_grade(&stored)? {
                        Some(grade) => Answer::Graded {
                            grade,
                            correct: grade.is_correct(),
                        },
                        None => Answer::Quit,
                    }
                }
                _ => Answer::Quit,
            },
        };
        let time_spent_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let (grade, correct) = match answer {
            Answer::Graded { grade, correct } => (grade, correct),
            Answer::Quit => break,
        };

        if !mode.grades_explicitly() {
            if correct {
                println!("  {}", paint("Correct!", Color::GREEN, use_color));
            } else {
                println!("  {} Answer: {}", paint("Wrong.", Color::RED, use_color), card.back);
            }
        }

        let updated = service.grade(&mut session, &card.id, grade, correct, time_spent_ms)?;
        println!(
            "  {} next review in {}\n",
            paint(&format!("Box {}", updated.box_level), box_color(updated.box_level), use_color),
            format_interval(interval_days(updated.box_level))
        );
    }

    if session.answers.is_empty() {
        println!("No answers recorded.");
        return Ok(());
    }

    let summary = summarize_session(&session);
    let progress = service.finish(session)?;

    println!(
        "Session complete: {}/{} correct ({}%)",
        summary.correct, summary.total, summary.accuracy
    );
    println!(
        "Streak: {} day{} (best {})",
        progress.current_streak,
        if progress.current_streak == 1 { "" } else { "s" },
        progress.longest_streak
    );

    Ok(())
}

/// Print `message` and read one line; `None` at end of input
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Zero-based option index, or `None` to quit
fn read_choice(count: usize) -> Result<Option<usize>> {
    loop {
        let Some(input) = prompt("Choice: ")? else {
            return Ok(None);
        };
        let input = input.trim();
        if input == "q" {
            return Ok(None);
        }
        match input.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(Some(n - 1)),
            _ => println!("Enter a number from 1 to {}.", count),
        }
    }
}

fn read_grade(card: &Card) -> Result<Option<Grade>> {
    let choices: Vec<String> = Grade::ALL
        .iter()
        .zip(preview_intervals(card))
        .enumerate()
        .map(|(i, (grade, days))| format!("{}) {} ({})", i + 1, grade, format_interval(days)))
        .collect();
    println!("  {}", choices.join("  "));

    loop {
        let Some(input) = prompt("Grade: ")? else {
            return Ok(None);
        };
        if input.trim() == "q" {
            return Ok(None);
        }
        match input.parse::<Grade>() {
            Ok(grade) => return Ok(Some(grade)),
            Err(e) => println!("{}", e),
        }
    }
}
