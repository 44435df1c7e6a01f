//! carelog CLI
//!
//! Command-line interface for the caregiver journal:
//! - Log free-text or structured entries
//! - List, search, and delete entries
//! - Run the analytics pipeline and print insights
//! - Import CSV history

use anyhow::Context;
use carelog::analysis::Severity;
use carelog::config::{generate_default_config, Config, LoggingConfig};
use carelog::extract::{Extractor, InputMode};
use carelog::import::CsvImporter;
use carelog::insights::{InsightCategory, InsightGenerator};
use carelog::journal::store::EntryStore;
use carelog::journal::types::JournalEntry;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "carelog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Caregiver journal with pattern analysis")]
#[command(
    long_about = "carelog is a journal for caregivers.\nLog quick notes about the person you care for, and the analysis\ncommands surface correlations, trends, and medication patterns."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", global = true)]
    format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a free-text note; structured fields are extracted automatically
    Note {
        /// The note text
        text: Vec<String>,
        /// Mark the note as transcribed speech
        #[arg(long)]
        voice: bool,
        /// Observation date (default: now). Supports "now", "yesterday",
        /// YYYY-MM-DD, ISO 8601
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Log a structured entry directly
    Add {
        /// Observation date (default: now)
        #[arg(short, long)]
        date: Option<String>,
        /// Mood, 1-5
        #[arg(long)]
        mood: Option<f64>,
        /// Energy, 1-5
        #[arg(long)]
        energy: Option<f64>,
        /// Pain, 0-10
        #[arg(long)]
        pain: Option<f64>,
        /// Hours of sleep
        #[arg(long)]
        sleep: Option<f64>,
        /// Symptom (repeatable)
        #[arg(short, long)]
        symptom: Vec<String>,
        /// Medication (repeatable)
        #[arg(short, long)]
        medication: Vec<String>,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List recent entries
    List {
        /// How many entries to show, newest last
        #[arg(short, long, default_value = "14")]
        last: usize,
    },

    /// Search entries by text, tag, symptom, or medication
    Search {
        /// Search query (case-insensitive substring)
        query: String,
    },

    /// Delete an entry by id
    Delete {
        /// Entry id
        id: String,
    },

    /// Analyze the journal and print insights
    Insights,

    /// Import entries from a CSV file
    Import {
        /// Path to CSV file
        path: PathBuf,
        /// Parse and validate without saving anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    let json = cli.format == "json";

    match cli.command {
        Commands::Note { text, voice, date } => {
            let text = text.join(" ");
            if text.trim().is_empty() {
                anyhow::bail!("note text is empty");
            }
            let date = parse_date(date.as_deref())?;
            let mode = if voice {
                InputMode::Voice
            } else {
                InputMode::Text
            };

            let extraction = Extractor::new().extract(&text, date, mode);
            let mut store = open_store(&config)?;
            let saved = store.save(extraction.entry)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                println!("Saved entry {}", saved.id);
                print_entry(&saved);
                println!("  extraction confidence: {:.2}", extraction.confidence);
                for reason in &extraction.uncertainties {
                    println!("  note: {}", reason);
                }
            }
        }

        Commands::Add {
            date,
            mood,
            energy,
            pain,
            sleep,
            symptom,
            medication,
            note,
        } => {
            let mut entry = JournalEntry::new(parse_date(date.as_deref())?);
            entry.mood = mood;
            entry.energy = energy;
            entry.pain = pain;
            entry.sleep_hours = sleep;
            entry.symptoms = symptom.into_iter().map(|s| s.to_lowercase()).collect();
            entry.medications = medication.into_iter().map(|m| m.to_lowercase()).collect();
            entry.free_text = note.unwrap_or_default();

            let mut store = open_store(&config)?;
            let saved = store.save(entry)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                println!("Saved entry {}", saved.id);
                print_entry(&saved);
            }
        }

        Commands::List { last } => {
            let store = open_store(&config)?;
            let entries = store.entries();
            let shown = &entries[entries.len().saturating_sub(last)..];

            if json {
                println!("{}", serde_json::to_string_pretty(shown)?);
            } else if shown.is_empty() {
                println!("No entries yet.");
            } else {
                for entry in shown {
                    print_entry(entry);
                }
            }
        }

        Commands::Search { query } => {
            let store = open_store(&config)?;
            let matches = store.search(&query);

            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else if matches.is_empty() {
                println!("No entries match {:?}.", query);
            } else {
                for entry in matches {
                    print_entry(entry);
                }
            }
        }

        Commands::Delete { id } => {
            let mut store = open_store(&config)?;
            store.delete(&id)?;
            if !json {
                println!("Deleted entry {}", id);
            }
        }

        Commands::Insights => {
            let store = open_store(&config)?;
            let generator = InsightGenerator::with_thresholds(config.analysis.clone());
            let categories = generator.generate(store.entries());

            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                print_insights(&categories);
            }
        }

        Commands::Import { path, dry_run } => {
            let mut store = if dry_run {
                EntryStore::in_memory()
            } else {
                open_store(&config)?
            };
            let report = CsvImporter::import_file(&mut store, &path)?;

            if dry_run {
                println!("Dry run: {} entries would be imported.", report.imported);
            } else {
                println!("Imported {} entries.", report.imported);
            }
            for (row, reason) in &report.skipped {
                eprintln!("  row {}: skipped ({})", row, reason);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {:?}", path))?;
                    println!("Wrote config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("carelog={}", logging.level)),
    );

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_store(config: &Config) -> anyhow::Result<EntryStore> {
    let path = config.store.entries_path();
    EntryStore::open(&path).with_context(|| format!("opening journal at {:?}", path))
}

/// Parse a user-supplied date into Unix milliseconds
fn parse_date(raw: Option<&str>) -> anyhow::Result<i64> {
    match raw {
        None | Some("now") => Ok(Utc::now().timestamp_millis()),
        Some("yesterday") => Ok((Utc::now() - Duration::days(1)).timestamp_millis()),
        Some(s) => {
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                // Noon keeps the entry on the same calendar day nearby
                let noon = date
                    .and_hms_opt(12, 0, 0)
                    .ok_or_else(|| anyhow::anyhow!("invalid date: {}", s))?;
                return Ok(noon.and_utc().timestamp_millis());
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Ok(dt.timestamp_millis());
            }
            anyhow::bail!("unrecognized date format: {}", s)
        }
    }
}

fn print_entry(entry: &JournalEntry) {
    let date = DateTime::<Utc>::from_timestamp_millis(entry.date)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| entry.date.to_string());

    let mut parts = Vec::new();
    if let Some(v) = entry.mood {
        parts.push(format!("mood {}", v));
    }
    if let Some(v) = entry.energy {
        parts.push(format!("energy {}", v));
    }
    if let Some(v) = entry.pain {
        parts.push(format!("pain {}", v));
    }
    if let Some(v) = entry.sleep_hours {
        parts.push(format!("sleep {}h", v));
    }
    if !entry.symptoms.is_empty() {
        parts.push(format!(
            "symptoms: {}",
            entry.symptoms.iter().cloned().collect::<Vec<_>>().join(", ")
        ));
    }
    if !entry.medications.is_empty() {
        parts.push(format!(
            "meds: {}",
            entry
                .medications
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    println!("[{}] {} ({})", date, parts.join(" | "), entry.id);
    if !entry.free_text.is_empty() {
        println!("    {}", entry.free_text);
    }
}

fn print_insights(categories: &[InsightCategory]) {
    if categories.is_empty() {
        println!("Nothing to report yet.");
        return;
    }

    for category in categories {
        println!("\n== {} ==", category.category);
        println!("{}", category.summary);

        for insight in &category.insights {
            let marker = match insight.severity {
                Severity::High => "!!",
                Severity::Medium => " !",
                Severity::Low => "  ",
            };
            println!(
                "{} {} ({}, confidence {:.2})",
                marker, insight.title, insight.timeframe, insight.confidence
            );
            println!("     {}", insight.description);
            if let Some(suggestion) = &insight.suggestion {
                println!("     -> {}", suggestion);
            }
        }
    }
}
