use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use hifz_lib::storage::seed::initialize_default_data;
use hifz_lib::storage::Repository;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, vocabulary: &Path, format: &OutputFormat) -> Result<()> {
    let content = fs::read_to_string(vocabulary)
        .with_context(|| format!("Failed to read {}", vocabulary.display()))?;

    let seeded = initialize_default_data(&app.storage, &content, app.now())
        .context("Failed to load vocabulary")?;
    let cards = app.storage.get_all_cards()?.len();
    let decks = app.storage.list_decks()?.len();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "seeded": seeded,
                "cards": cards,
                "decks": decks,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if seeded {
                println!("Loaded {} cards into {} decks.", cards, decks);
            } else {
                println!(
                    "Collection already has {} cards; nothing loaded. Run `hifz-cli clear --yes` to start over.",
                    cards
                );
            }
        }
    }

    Ok(())
}
