mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hifz_lib::quiz::QuizMode;
use hifz_lib::storage::Theme;

#[derive(Parser)]
#[command(name = "hifz-cli", about = "Leitner-box vocabulary trainer", version)]
struct Cli {
    /// Data directory (default: platform data dir + /hifz)
    #[arg(long, global = true, env = "HIFZ_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Load decks and cards from a vocabulary file (only into an empty collection)
    Init {
        /// JSON file mapping module names to word lists
        vocabulary: PathBuf,
    },

    /// List decks with card counts
    Decks,

    /// Deck and card management
    #[command(subcommand)]
    Deck(DeckCommand),

    /// List cards due for review
    Due {
        /// Only cards in this deck (case-insensitive prefix match)
        #[arg(long)]
        deck: Option<String>,
    },

    /// Run an interactive study session
    Study {
        /// Deck name (default: the whole collection)
        #[arg(long)]
        deck: Option<String>,
        /// Quiz mode: multiple-choice, type-answer or flashcard (default: from settings)
        #[arg(long)]
        mode: Option<QuizMode>,
    },

    /// Show progress, streak and recent sessions
    Progress,

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Export all data as JSON
    Export {
        /// Output file (default: stdout)
        file: Option<PathBuf>,
    },

    /// Import data exported earlier, replacing the sections it contains
    Import {
        file: PathBuf,
    },

    /// Delete all data
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DeckCommand {
    /// Show a deck's cards grouped by box
    Show {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },

    /// Create an empty deck
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a deck (its cards are kept)
    Delete {
        deck: String,
    },

    /// Add a card to a deck
    AddCard {
        deck: String,
        /// Prompt side (Arabic term)
        front: String,
        /// Answer side (meaning)
        back: String,
        /// Transliteration shown with the prompt
        #[arg(long)]
        pronunciation: Option<String>,
    },

    /// Move a card into another deck
    MoveCard {
        /// Card id (or unique id prefix)
        card: String,
        /// Target deck name
        deck: String,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print current settings
    Show,

    /// Change one or more settings
    Set {
        #[arg(long)]
        quiz_mode: Option<QuizMode>,
        #[arg(long)]
        cards_per_session: Option<i32>,
        #[arg(long)]
        daily_goal: Option<i32>,
        #[arg(long)]
        show_transliteration: Option<bool>,
        #[arg(long)]
        theme: Option<Theme>,
        #[arg(long)]
        sound_enabled: Option<bool>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::Init { vocabulary } => {
            commands::init::run(&app, &vocabulary, &cli.format)?;
        }
        Command::Decks => {
            commands::decks::run_list(&app, &cli.format, use_color)?;
        }
        Command::Deck(subcmd) => match subcmd {
            DeckCommand::Show { deck } => {
                commands::decks::run_show(&app, &deck, &cli.format, use_color)?;
            }
            DeckCommand::Create { name, description } => {
                commands::decks::run_create(&app, name, description, &cli.format)?;
            }
            DeckCommand::Delete { deck } => {
                commands::decks::run_delete(&app, &deck)?;
            }
            DeckCommand::AddCard {
                deck,
                front,
                back,
                pronunciation,
            } => {
                commands::decks::run_add_card(&app, &deck, front, back, pronunciation, &cli.format)?;
            }
            DeckCommand::MoveCard { card, deck } => {
                commands::decks::run_move_card(&app, &card, &deck)?;
            }
        },
        Command::Due { deck } => {
            commands::due::run(&app, deck.as_deref(), &cli.format, use_color)?;
        }
        Command::Study { deck, mode } => {
            commands::study::run(&app, deck.as_deref(), mode, use_color)?;
        }
        Command::Progress => {
            commands::progress::run(&app, &cli.format, use_color)?;
        }
        Command::Settings(subcmd) => match subcmd {
            SettingsCommand::Show => {
                commands::settings::run_show(&app, &cli.format)?;
            }
            SettingsCommand::Set {
                quiz_mode,
                cards_per_session,
                daily_goal,
                show_transliteration,
                theme,
                sound_enabled,
            } => {
                let update = hifz_lib::storage::SettingsUpdate {
                    quiz_mode,
                    cards_per_session,
                    daily_goal,
                    show_transliteration,
                    theme,
                    sound_enabled,
                };
                commands::settings::run_set(&app, &update, &cli.format)?;
            }
        },
        Command::Export { file } => {
            commands::transfer::run_export(&app, file.as_deref())?;
        }
        Command::Import { file } => {
            commands::transfer::run_import(&app, &file, &cli.format)?;
        }
        Command::Clear { yes } => {
            commands::clear::run(&app, yes)?;
        }
    }

    Ok(())
}
