//! Sentence command handlers

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, warn};

use poppycock_core::{Sentence, SentenceStore};

use crate::output::Output;
use crate::prompt::confirm;

/// Record a new sentence
pub fn add(store: &SentenceStore, text: String, favorite: bool, output: &Output) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        bail!("Sentence text cannot be empty");
    }

    let mut sentence = store
        .insert(Sentence::new(text))
        .context("Failed to record sentence")?;
    if favorite {
        store
            .toggle_favorite(&mut sentence)
            .context("Failed to mark sentence as favorite")?;
    }

    output.success(&format!(
        "Recorded sentence {}",
        sentence.id.unwrap_or_default()
    ));
    output.print_sentence(&sentence);
    Ok(())
}

/// List the history, or only favorites
///
/// An unavailable store is shown as an empty history.
pub fn history(
    store: &SentenceStore,
    oldest_first: bool,
    favorites: bool,
    output: &Output,
) -> Result<()> {
    let result = if favorites {
        store.get_favorites(oldest_first)
    } else {
        store.get_history(oldest_first)
    };

    let sentences = match result {
        Ok(sentences) => sentences,
        Err(e) if e.is_unavailable() => {
            warn!("History requested while store unavailable: {}", e);
            output.warning("Sentence history is unavailable right now.");
            Vec::new()
        }
        Err(e) => return Err(e).context("Failed to read sentence history"),
    };

    output.print_sentences(&sentences);
    Ok(())
}

/// Show one sentence with its neighbors
pub fn show(store: &SentenceStore, id: i64, output: &Output) -> Result<()> {
    let sentence = find(store, id)?;
    let previous = store.get_previous_id(id)?;
    let next = store.get_next_id(id)?;

    output.print_review(&sentence, previous, next);
    Ok(())
}

/// Show the sentence recorded after `id`
pub fn next(store: &SentenceStore, id: i64, output: &Output) -> Result<()> {
    match store.get_next_id(id)? {
        Some(next_id) => show(store, next_id, output),
        None => {
            output.message(&format!("No sentence after {}.", id));
            Ok(())
        }
    }
}

/// Show the sentence recorded before `id`
pub fn previous(store: &SentenceStore, id: i64, output: &Output) -> Result<()> {
    match store.get_previous_id(id)? {
        Some(previous_id) => show(store, previous_id, output),
        None => {
            output.message(&format!("No sentence before {}.", id));
            Ok(())
        }
    }
}

/// Toggle the favorite flag of a sentence
pub fn favorite(store: &SentenceStore, id: i64, output: &Output) -> Result<()> {
    let mut sentence = find(store, id)?;
    debug!("Toggle favorite status of sentence {}", id);

    if !store
        .toggle_favorite(&mut sentence)
        .context("Failed to toggle favorite")?
    {
        bail!("Sentence {} disappeared before it could be updated", id);
    }

    output.success(&if sentence.favorite {
        format!("Sentence {} marked as favorite", id)
    } else {
        format!("Sentence {} is no longer a favorite", id)
    });
    output.print_sentence(&sentence);
    Ok(())
}

/// Delete a single sentence
///
/// Favorites need an explicit confirmation (or `--yes`).
pub fn delete(store: &SentenceStore, id: i64, yes: bool, output: &Output) -> Result<()> {
    let sentence = find(store, id)?;

    if sentence.favorite && !yes {
        if !output.should_prompt() {
            bail!("Sentence {} is a favorite. Pass --yes to delete it.", id);
        }
        println!("Sentence {} is a favorite: {}", id, sentence.text);
        if !confirm("Delete it anyway?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if !store.delete_one(id).context("Failed to delete sentence")? {
        bail!("Sentence {} was already gone", id);
    }

    output.success(&format!("Deleted sentence {}", id));
    Ok(())
}

/// Delete every favorite, or every non-favorite, sentence
pub fn clear(store: &SentenceStore, favorites: bool, yes: bool, output: &Output) -> Result<()> {
    let category = if favorites { "favorite" } else { "non-favorite" };

    if !yes && output.should_prompt() && !confirm(&format!("Delete all {} sentences?", category))? {
        println!("Cancelled.");
        return Ok(());
    }

    let removed = store
        .delete_category(favorites)
        .with_context(|| format!("Failed to delete {} sentences", category))?;

    output.success(&format!("Deleted {} {} sentence(s)", removed, category));
    Ok(())
}

fn find(store: &SentenceStore, id: i64) -> Result<Sentence> {
    store
        .get_by_id(id)
        .context("Failed to look up sentence")?
        .ok_or_else(|| anyhow!("Sentence not found: {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use poppycock_core::Config;
    use tempfile::TempDir;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn open_store(temp_dir: &TempDir) -> SentenceStore {
        SentenceStore::open_with_config(Config::with_data_dir(temp_dir.path())).unwrap()
    }

    #[test]
    fn test_add_records_sentence() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        add(&store, "  The lamp is tired.  ".into(), true, &quiet()).unwrap();

        let stored = store.get_by_id(1).unwrap().unwrap();
        assert_eq!(stored.text, "The lamp is tired.");
        assert!(stored.favorite);
    }

    #[test]
    fn test_add_rejects_empty_text() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        assert!(add(&store, "   ".into(), false, &quiet()).is_err());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_history_degrades_when_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);
        store.close();

        assert!(history(&store, true, false, &quiet()).is_ok());
        assert!(add(&store, "Nope.".into(), false, &quiet()).is_err());
    }

    #[test]
    fn test_favorite_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);
        add(&store, "Keep me.".into(), false, &quiet()).unwrap();

        favorite(&store, 1, &quiet()).unwrap();
        assert!(store.get_by_id(1).unwrap().unwrap().favorite);

        // Favorites are protected without --yes outside interactive mode
        assert!(delete(&store, 1, false, &quiet()).is_err());
        assert!(store.get_by_id(1).unwrap().is_some());

        delete(&store, 1, true, &quiet()).unwrap();
        assert!(store.get_by_id(1).unwrap().is_none());
        assert!(delete(&store, 1, true, &quiet()).is_err());
    }

    #[test]
    fn test_navigation_commands() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);
        add(&store, "one".into(), false, &quiet()).unwrap();
        add(&store, "two".into(), false, &quiet()).unwrap();

        assert!(show(&store, 1, &quiet()).is_ok());
        assert!(next(&store, 1, &quiet()).is_ok());
        assert!(next(&store, 2, &quiet()).is_ok());
        assert!(previous(&store, 1, &quiet()).is_ok());
        assert!(show(&store, 3, &quiet()).is_err());
    }

    #[test]
    fn test_clear_category() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);
        add(&store, "plain".into(), false, &quiet()).unwrap();
        add(&store, "loved".into(), true, &quiet()).unwrap();

        clear(&store, false, false, &quiet()).unwrap();

        let remaining = store.get_history(true).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text, "loved");
    }
}
