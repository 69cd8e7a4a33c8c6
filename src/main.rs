mod calendar;
mod input;
mod merge;
mod parser;
mod pipeline;
mod records;
mod settings;
mod store;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use settings::Settings;

#[derive(Parser)]
#[command(name = "scout_ledger", about = "Player profile and transfer listing extractor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one player profile and save it by PlayerID
    Profile {
        /// Profile text file (default: paste on stdin)
        file: Option<PathBuf>,
        /// Print the record instead of saving it
        #[arg(long)]
        print: bool,
    },
    /// Extract every *.txt profile in a directory
    Batch {
        /// Directory to read (default: inbox_dir from settings)
        dir: Option<PathBuf>,
    },
    /// Merge a transfer listing into a stored profile
    Merge {
        /// PlayerID of the stored profile
        #[arg(short, long)]
        player: u64,
        /// Listing text file (default: paste on stdin)
        #[arg(short, long)]
        listing: Option<PathBuf>,
    },
    /// Merge every stored profile that has a listing file
    MergeAll,
    /// Show the game season and week for a date
    Week {
        /// ISO date, e.g. 2025-01-05 (default: today)
        date: Option<NaiveDate>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    info!(settings_loaded = ?settings, msg = "Starting scout ledger");
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Profile { file, print } => {
            let text = input::read_block(file.as_deref(), "profile")?;
            let record = settings.assembler().assemble(&text);
            if print {
                println!("{}", serde_json::to_string_pretty(&record)?);
                return Ok(());
            }
            match pipeline::save_profile(&settings, &record)? {
                Some(path) => println!("Saved {}", path.display()),
                None => {
                    warn!("Profile has no [playerid=..] tag; printing instead of saving");
                    println!("{}", serde_json::to_string_pretty(&record)?);
                }
            }
        }
        Commands::Batch { dir } => {
            let dir = dir.unwrap_or_else(|| settings.inbox_dir.clone());
            println!("Extracting profiles from {}", dir.display());
            let counts = pipeline::run_batch(&settings, &dir)?;
            println!(
                "Saved {} profiles ({} without PlayerID, {} errors).",
                counts.saved, counts.unidentified, counts.failed
            );
        }
        Commands::Merge { player, listing } => {
            let text = input::read_block(listing.as_deref(), "listing")?;
            let path = pipeline::merge_player(&settings, player, &text, today)?;
            println!("Saved {}", path.display());
        }
        Commands::MergeAll => {
            let counts = pipeline::merge_all(&settings, today)
                .with_context(|| format!("merging {}", settings.profiles_dir.display()))?;
            println!(
                "Merged {} ({} without PlayerID, {} without listing, {} errors).",
                counts.merged, counts.no_player_id, counts.no_listing, counts.failed
            );
        }
        Commands::Week { date } => {
            let date = date.unwrap_or(today);
            println!("{}: {}", date, settings.calendar.coordinate(date));
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}
