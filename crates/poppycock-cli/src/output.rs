//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::Local;
use serde::Serialize;

use poppycock_core::Sentence;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single sentence
    pub fn print_sentence(&self, sentence: &Sentence) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", display_id(sentence));
                println!("Created:  {}", format_timestamp(sentence));
                println!("Favorite: {}", if sentence.favorite { "yes" } else { "no" });
                println!();
                println!("{}", sentence.text);
            }
            OutputFormat::Json => print_json(sentence),
            OutputFormat::Quiet => println!("{}", display_id(sentence)),
        }
    }

    /// Print a sentence along with the ids of its neighbors
    pub fn print_review(&self, sentence: &Sentence, previous: Option<i64>, next: Option<i64>) {
        match self.format {
            OutputFormat::Human => {
                self.print_sentence(sentence);
                println!();
                println!(
                    "← {}    {} →",
                    previous.map_or_else(|| "(first)".to_string(), |id| id.to_string()),
                    next.map_or_else(|| "(last)".to_string(), |id| id.to_string())
                );
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "sentence": sentence,
                "previous": previous,
                "next": next
            })),
            OutputFormat::Quiet => println!("{}", display_id(sentence)),
        }
    }

    /// Print a list of sentences
    pub fn print_sentences(&self, sentences: &[Sentence]) {
        match self.format {
            OutputFormat::Human => {
                if sentences.is_empty() {
                    println!("No sentences found.");
                    return;
                }
                for sentence in sentences {
                    println!(
                        "{:>5} | {} | {} | {}",
                        display_id(sentence),
                        format_timestamp(sentence),
                        if sentence.favorite { "★" } else { " " },
                        truncate_line(&sentence.text, 60)
                    );
                }
                println!("\n{} sentence(s)", sentences.len());
            }
            OutputFormat::Json => print_json(&sentences),
            OutputFormat::Quiet => {
                for sentence in sentences {
                    println!("{}", display_id(sentence));
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning to stderr (suppressed in quiet mode)
    pub fn warning(&self, message: &str) {
        if !self.is_quiet() {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON output: {}", e),
    }
}

fn display_id(sentence: &Sentence) -> String {
    sentence
        .id
        .map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// Format the creation time in local time
fn format_timestamp(sentence: &Sentence) -> String {
    sentence
        .created_at()
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "????-??-?? ??:??".to_string())
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate to first line and max length
fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}
