//! msrs CLI
//!
//! Reviews flashcards kept in a JSON deck file. Grade a card by typing a mark
//! (`1`-`4` by default) into one of its slots, then run `msrs review`.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use msrs_core::{import_jpdb, parse_timestamp, Calendar, Deck, DeckStats, ScheduleRun};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// msrs - spaced repetition for plain decks
#[derive(Parser)]
#[command(name = "msrs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Schedule flashcard reviews in a JSON deck with FSRS")]
struct Cli {
    /// Treat this instant as "now" (RFC 3339 or YYYY-MM-DD)
    #[arg(long, global = true)]
    now: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn marks into reviews, reschedule and rewrite the deck
    Review {
        /// Path to the deck file
        deck: PathBuf,
        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show upcoming reviews grouped by day
    Due {
        /// Path to the deck file
        deck: PathBuf,
        /// Only show days up to this many days ahead
        #[arg(long, default_value = "30")]
        days: u32,
    },

    /// Show deck statistics
    Stats {
        /// Path to the deck file
        deck: PathBuf,
        /// Activity window in weeks
        #[arg(long, default_value = "52")]
        weeks: u32,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a jpdb.io reviews.json export into deck cards
    ImportJpdb {
        /// Path to the jpdb export
        input: PathBuf,
        /// Deck to add the cards to (created if missing); stdout if omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let now = parse_now(cli.now.as_deref())?;

    match cli.command {
        Commands::Review { deck, dry_run } => run_review(&deck, now, dry_run),
        Commands::Due { deck, days } => run_due(&deck, now, days),
        Commands::Stats { deck, weeks, json } => run_stats(&deck, now, weeks, json),
        Commands::ImportJpdb { input, output } => run_import_jpdb(&input, output.as_deref()),
    }
}

fn parse_now(value: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match value {
        None => Ok(Utc::now()),
        Some(raw) => parse_timestamp(raw)
            .ok_or_else(|| anyhow::anyhow!("Invalid --now '{}'. Use RFC 3339 or YYYY-MM-DD.", raw)),
    }
}

fn load_deck(path: &Path) -> anyhow::Result<Deck> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read deck {}", path.display()))?;
    Deck::from_json(&source).with_context(|| format!("Failed to parse deck {}", path.display()))
}

fn save_deck(path: &Path, deck: &Deck) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, deck.to_json()?)
        .with_context(|| format!("Failed to write deck {}", path.display()))
}

fn report_warnings(run: &ScheduleRun) {
    for warning in &run.warnings {
        tracing::warn!("{}", warning);
    }
}

/// Run review command
fn run_review(path: &Path, now: DateTime<Utc>, dry_run: bool) -> anyhow::Result<()> {
    let mut deck = load_deck(path)?;
    let run = if dry_run {
        deck.preview(now)?
    } else {
        deck.review(now)?
    };
    report_warnings(&run);

    if !dry_run {
        save_deck(path, &deck)?;
    }

    let label = if dry_run { "Would record" } else { "Recorded" };
    println!(
        "{} {} review(s) across {} card(s)",
        label.white().bold(),
        run.new_reviews(),
        run.cards.len()
    );
    println!("{}: {}", "Due now".white().bold(), run.due_now().count());
    println!("{}: {}", "New".white().bold(), run.new_cards().count());
    if !run.warnings.is_empty() {
        println!("{}: {}", "Warnings".yellow().bold(), run.warnings.len());
    }
    Ok(())
}

/// Run due command
fn run_due(path: &Path, now: DateTime<Utc>, days: u32) -> anyhow::Result<()> {
    let deck = load_deck(path)?;
    let run = deck.preview(now)?;
    report_warnings(&run);

    let calendar = Calendar::build(&run, &Local);
    let today = now.with_timezone(&Local).date_naive();
    let horizon = today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX);

    println!("{}", "=== Schedule ===".cyan().bold());
    if !calendar.new_cards.is_empty() {
        println!("{}: {}", "New".white().bold(), calendar.new_cards.len());
    }

    for day in calendar.days.iter().take_while(|d| d.date <= horizon) {
        if day.cards.first().is_some_and(|&i| calendar.is_first_of_month(i)) {
            println!();
            println!("{}", day.date.format("%B %Y").to_string().magenta().bold());
        }

        let heading = if day.date <= today {
            day.date.format("%a %d").to_string().red().bold()
        } else {
            day.date.format("%a %d").to_string().white().bold()
        };
        let questions: Vec<&str> = day
            .cards
            .iter()
            .map(|&i| run.cards[i].id.as_str())
            .collect();
        println!("  {} {:>3}  {}", heading, day.cards.len(), questions.join(", ").dimmed());
    }

    Ok(())
}

/// Run stats command
fn run_stats(path: &Path, now: DateTime<Utc>, weeks: u32, json: bool) -> anyhow::Result<()> {
    let deck = load_deck(path)?;
    let run = deck.preview(now)?;
    let stats = DeckStats::from_run(&run, &Local);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let today = now.with_timezone(&Local).date_naive();
    println!("{}", "=== Deck Statistics ===".cyan().bold());
    println!();
    println!("{}: {}", "Cards".white().bold(), stats.cards);
    println!("{}: {}", "New".white().bold(), stats.new_cards);
    println!("{}: {}", "Reviews".white().bold(), stats.reviews);
    println!("{}: {}", "Due now".white().bold(), stats.due_now);
    if let Some(avg) = stats.average_retention {
        println!("{}: {:.1}%", "Average Retention".white().bold(), avg * 100.0);
    }
    println!(
        "{}: {} day(s) in the last {} week(s)",
        "Active".white().bold(),
        stats.active_days(today, weeks),
        weeks
    );
    println!("{}: {} day(s)", "Streak".white().bold(), stats.streak(today));
    Ok(())
}

/// Run import-jpdb command
fn run_import_jpdb(input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read export {}", input.display()))?;
    let cards = import_jpdb(&source)?;
    let total = cards.len();

    let Some(output) = output else {
        let deck = Deck {
            cards,
            ..Default::default()
        };
        print!("{}", deck.to_json()?);
        return Ok(());
    };

    let mut deck = if output.exists() {
        load_deck(output)?
    } else {
        Deck::default()
    };
    let added = deck.add_cards(cards);
    save_deck(output, &deck)?;

    println!(
        "{} {} of {} card(s) into {}",
        "Imported".green().bold(),
        added,
        total,
        output.display()
    );
    Ok(())
}
