use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use hifz_lib::storage::backup::{export_data, import_data};

use crate::app::App;
use crate::OutputFormat;

pub fn run_export(app: &App, file: Option<&Path>) -> Result<()> {
    let json = export_data(&app.storage, app.now()).context("Failed to export data")?;

    match file {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub fn run_import(app: &App, file: &Path, format: &OutputFormat) -> Result<()> {
    let json = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let summary = import_data(&app.storage, &json).context("Failed to import data")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Plain => {
            if summary.is_empty() {
                println!("Nothing to import in {}", file.display());
                return Ok(());
            }
            if let Some(n) = summary.cards {
                println!("cards     {}", n);
            }
            if let Some(n) = summary.decks {
                println!("decks     {}", n);
            }
            if let Some(n) = summary.sessions {
                println!("sessions  {}", n);
            }
            if summary.settings {
                println!("settings  replaced");
            }
            if summary.progress {
                println!("progress  replaced");
            }
        }
    }
    Ok(())
}
