use anyhow::Result;

use hifz_lib::flashcards::session::{cards_in_deck, get_due_cards};

use crate::app::App;
use crate::render::terminal::{box_color, paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, deck_name: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let mut pool = app.all_cards()?;
    if let Some(name) = deck_name {
        let deck = app.find_deck(name)?;
        pool = cards_in_deck(&pool, &deck);
    }
    let due = get_due_cards(&pool, app.now());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing due.");
                return Ok(());
            }

            for card in &due {
                let marker = paint(&format!("[{}]", card.box_level), box_color(card.box_level), use_color);
                let when = match card.next_review {
                    Some(at) => at.format("%Y-%m-%d").to_string(),
                    None => "new".to_string(),
                };
                println!(
                    "{} {}  {}  {}",
                    marker,
                    card.front,
                    card.back,
                    paint(&when, Color::GRAY, use_color)
                );
            }
            println!("\n{} cards due", due.len());
        }
    }

    Ok(())
}
