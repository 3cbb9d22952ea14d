//! Status command handler

use anyhow::Result;

use poppycock_core::{SentenceStore, SCHEMA_VERSION};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &SentenceStore, output: &Output) -> Result<()> {
    let config = store.config();
    let open = store.is_open();
    let sentences = store.count().ok();
    let favorites = store.favorite_count().ok();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "open": open,
                    "database": config.database_path(),
                    "schema_version": SCHEMA_VERSION,
                    "counts": {
                        "sentences": sentences,
                        "favorites": favorites
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", if open { "open" } else { "unavailable" });
        }
        OutputFormat::Human => {
            println!("Poppycock Status");
            println!("================");
            println!();
            println!("Storage:");
            println!("  Database: {}", config.database_path().display());
            println!("  Schema:   v{}", SCHEMA_VERSION);
            println!(
                "  Status:   {}",
                if open { "open" } else { "unavailable" }
            );
            println!();
            println!("Contents:");
            println!("  Sentences: {}", display_count(sentences));
            println!("  Favorites: {}", display_count(favorites));
        }
    }

    Ok(())
}

fn display_count(count: Option<i64>) -> String {
    count.map_or_else(|| "-".to_string(), |c| c.to_string())
}
