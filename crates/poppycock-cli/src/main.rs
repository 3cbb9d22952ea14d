//! Poppycock CLI
//!
//! Command-line interface for the Poppycock sentence history.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use poppycock_core::{Config, SentenceStore};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "poppycock")]
#[command(about = "Poppycock - a history of generated nonsense")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file (defaults to ~/.config/poppycock/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a sentence
    #[command(alias = "new")]
    Add {
        /// The sentence text
        text: String,
        /// Mark as favorite right away
        #[arg(short, long)]
        favorite: bool,
    },
    /// List recorded sentences, newest first
    #[command(alias = "ls")]
    History {
        /// Sort oldest first
        #[arg(long)]
        oldest_first: bool,
        /// Only show favorites
        #[arg(short, long)]
        favorites: bool,
    },
    /// Show a sentence and its neighbors
    Show {
        /// Sentence ID
        id: i64,
    },
    /// Show the sentence recorded after the given one
    Next {
        /// Sentence ID
        id: i64,
    },
    /// Show the sentence recorded before the given one
    #[command(alias = "previous")]
    Prev {
        /// Sentence ID
        id: i64,
    },
    /// Toggle favorite status of a sentence
    #[command(alias = "fav")]
    Favorite {
        /// Sentence ID
        id: i64,
    },
    /// Delete a sentence
    #[command(alias = "rm")]
    Delete {
        /// Sentence ID
        id: i64,
        /// Don't ask before deleting a favorite
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete all non-favorite sentences (or all favorites)
    Clear {
        /// Delete favorites instead of non-favorites
        #[arg(long)]
        favorites: bool,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show status (database location, counts)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, database_name, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    init_logging(&config);

    let store = SentenceStore::new(config);
    if let Err(e) = store.open() {
        // Keep going: reads degrade to empty views, writes report the failure
        warn!("Could not open sentence store: {}", e);
        output.warning(&e.to_string());
        if let Some(suggestion) = e.recovery_suggestion() {
            output.warning(suggestion);
        }
    }

    let result = match cli.command {
        Commands::Add { text, favorite } => {
            commands::sentence::add(&store, text, favorite, &output)
        }
        Commands::History {
            oldest_first,
            favorites,
        } => commands::sentence::history(&store, oldest_first, favorites, &output),
        Commands::Show { id } => commands::sentence::show(&store, id, &output),
        Commands::Next { id } => commands::sentence::next(&store, id, &output),
        Commands::Prev { id } => commands::sentence::previous(&store, id, &output),
        Commands::Favorite { id } => commands::sentence::favorite(&store, id, &output),
        Commands::Delete { id, yes } => commands::sentence::delete(&store, id, yes, &output),
        Commands::Clear { favorites, yes } => {
            commands::sentence::clear(&store, favorites, yes, &output)
        }
        Commands::Status => commands::status::show(&store, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    };

    store.close();
    result
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Initialize logging
///
/// Only initializes if POPPYCOCK_LOG environment variable is set.
/// Logs to config.log_file when set, stderr otherwise.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("POPPYCOCK_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "poppycock_core={},poppycock_cli={}",
        log_level, log_level
    ));

    match &config.log_file {
        Some(log_path) => {
            let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
                    return;
                }
            };

            // Ignore error if already initialized
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init();

            info!("Logging initialized to {:?}", log_path);
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
