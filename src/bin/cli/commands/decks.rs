use anyhow::{Context, Result};

use hifz_lib::flashcards::algorithm::{box_label, cards_in_box, format_interval, interval_days};
use hifz_lib::flashcards::session::cards_in_deck;
use hifz_lib::flashcards::{MAX_BOX, MIN_BOX};
use hifz_lib::progress::stats::deck_stats;
use hifz_lib::storage::Repository;

use crate::app::App;
use crate::render::terminal::{box_color, paint, Color};
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let decks = app.list_decks()?;
    let cards = app.all_cards()?;
    let now = app.now();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = decks
                .iter()
                .map(|deck| {
                    let stats = deck_stats(deck, &cards, now);
                    serde_json::json!({
                        "id": deck.id,
                        "name": deck.name,
                        "description": deck.description,
                        "total": stats.total,
                        "due": stats.due,
                        "mastered": stats.mastered,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("No decks. Load a vocabulary file with `hifz-cli init <file>`.");
                return Ok(());
            }

            let width = decks.iter().map(|d| d.name.chars().count()).max().unwrap_or(4).max(4);
            println!("{:<width$}  Total    Due  Mastered", "Deck", width = width);
            println!("{}", "\u{2500}".repeat(width + 24));

            for deck in &decks {
                let stats = deck_stats(deck, &cards, now);
                let due = format!("{:>5}", stats.due);
                let due = if stats.due > 0 {
                    paint(&due, Color::YELLOW, use_color)
                } else {
                    due
                };
                println!(
                    "{:<width$}  {:>5}  {}  {:>8}",
                    deck.name,
                    stats.total,
                    due,
                    stats.mastered,
                    width = width
                );
            }
        }
    }

    Ok(())
}

pub fn run_show(app: &App, name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.find_deck(name)?;
    let cards = cards_in_deck(&app.all_cards()?, &deck);
    let now = app.now();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": deck,
                "cards": cards,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint(&deck.name, Color::BOLD, use_color));
            if !deck.description.is_empty() {
                println!("{}", paint(&deck.description, Color::DIM, use_color));
            }
            let stats = deck_stats(&deck, &cards, now);
            println!("{} cards, {} due, {} mastered\n", stats.total, stats.due, stats.mastered);

            for box_level in MIN_BOX..=MAX_BOX {
                let in_box = cards_in_box(&cards, box_level);
                if in_box.is_empty() {
                    continue;
                }
                let header = format!(
                    "Box {} - {} (every {}) - {} cards",
                    box_level,
                    box_label(box_level),
                    format_interval(interval_days(box_level)),
                    in_box.len()
                );
                println!("{}", paint(&header, box_color(box_level), use_color));

                for card in &in_box {
                    let due = if card.is_due(now) { " *" } else { "" };
                    let id_short: String = card.id.chars().take(8).collect();
                    println!(
                        "  {} {}  {}{}",
                        paint(&id_short, Color::GRAY, use_color),
                        card.front,
                        card.back,
                        due
                    );
                }
                println!();
            }
        }
    }

    Ok(())
}

pub fn run_create(app: &App, name: String, description: String, format: &OutputFormat) -> Result<()> {
    let deck = app
        .storage
        .create_deck(name, description, app.now())
        .context("Failed to create deck")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&deck)?),
        OutputFormat::Plain => println!("Created deck '{}' ({})", deck.name, deck.id),
    }
    Ok(())
}

pub fn run_delete(app: &App, name: &str) -> Result<()> {
    let deck = app.find_deck(name)?;
    app.storage
        .delete_deck(&deck.id)
        .context("Failed to delete deck")?;
    println!("Deleted deck '{}' ({} cards kept)", deck.name, deck.card_ids.len());
    Ok(())
}

pub fn run_add_card(
    app: &App,
    deck_name: &str,
    front: String,
    back: String,
    pronunciation: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let card = app
        .storage
        .add_card(&deck.id, front, back, pronunciation, app.now())
        .context("Failed to add card")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => println!("Added '{}' to '{}' ({})", card.front, deck.name, card.id),
    }
    Ok(())
}

pub fn run_move_card(app: &App, card_id: &str, deck_name: &str) -> Result<()> {
    let card = app.find_card(card_id)?;
    let deck = app.find_deck(deck_name)?;
    app.storage
        .move_card(&card.id, &deck.id, app.now())
        .context("Failed to move card")?;
    println!("Moved '{}' to '{}'", card.front, deck.name);
    Ok(())
}
