use anyhow::{bail, Context, Result};

use hifz_lib::storage::{Repository, Settings, SettingsUpdate};

use crate::app::App;
use crate::OutputFormat;

pub fn run_show(app: &App, format: &OutputFormat) -> Result<()> {
    let settings = app.storage.get_settings().context("Failed to load settings")?;
    print_settings(&settings, format)
}

pub fn run_set(app: &App, update: &SettingsUpdate, format: &OutputFormat) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to change. See `hifz-cli settings set --help`.");
    }
    let settings = app
        .storage
        .update_settings(update)
        .context("Failed to save settings")?;
    print_settings(&settings, format)
}

fn print_settings(settings: &Settings, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(settings)?),
        OutputFormat::Plain => {
            println!("quiz-mode             {}", settings.quiz_mode);
            println!("cards-per-session     {}", settings.cards_per_session);
            println!("daily-goal            {}", settings.daily_goal);
            println!("show-transliteration  {}", settings.show_transliteration);
            println!("theme                 {}", settings.theme);
            println!("sound-enabled         {}", settings.sound_enabled);
        }
    }
    Ok(())
}
