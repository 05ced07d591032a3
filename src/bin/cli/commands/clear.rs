use anyhow::{bail, Context, Result};

use hifz_lib::storage::Repository;

use crate::app::App;

pub fn run(app: &App, yes: bool) -> Result<()> {
    if !yes {
        bail!(
            "This deletes every card, deck, setting and session in {}. Re-run with --yes to confirm.",
            app.storage.base_path().display()
        );
    }
    app.storage.clear_all().context("Failed to clear data")?;
    println!("All data cleared.");
    Ok(())
}
