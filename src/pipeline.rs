//! File-level flows behind the CLI commands. Each input file is handled on
//! its own: a bad file is logged and counted, and the loop moves on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::merge::{self, MergeError};
use crate::parser::extract::ProfileAssembler;
use crate::records::ProfileRecord;
use crate::settings::Settings;
use crate::store;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchCounts {
    pub saved: usize,
    pub unidentified: usize,
    pub failed: usize,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeCounts {
    pub merged: usize,
    pub no_player_id: usize,
    pub no_listing: usize,
    pub failed: usize,
}

/// Saves a profile as `<profiles_dir>/<PlayerID>.json`. Returns `None` when the
/// record has no identity and therefore nothing to be keyed by.
pub fn save_profile(settings: &Settings, record: &ProfileRecord) -> Result<Option<PathBuf>> {
    let Some(id) = record.player_id else {
        return Ok(None);
    };
    let path = store::save(&settings.profiles_dir, &id.to_string(), record)?;
    info!(player_id = id, path = %path.display(), "profile saved");
    Ok(Some(path))
}

#[cfg(feature = "rayon")]
fn assemble_all(assembler: &ProfileAssembler, texts: &[(PathBuf, String)]) -> Vec<ProfileRecord> {
    texts.par_iter().map(|(_, text)| assembler.assemble(text)).collect()
}

#[cfg(not(feature = "rayon"))]
fn assemble_all(assembler: &ProfileAssembler, texts: &[(PathBuf, String)]) -> Vec<ProfileRecord> {
    texts.iter().map(|(_, text)| assembler.assemble(text)).collect()
}

/// Assembles and saves every `*.txt` profile in `dir`.
pub fn run_batch(settings: &Settings, dir: &Path) -> Result<BatchCounts> {
    let files = store::list_files(dir, "txt")?;
    let mut counts = BatchCounts::default();

    let mut texts = Vec::with_capacity(files.len());
    for path in files {
        match std::fs::read_to_string(&path) {
            Ok(text) => texts.push((path, text)),
            Err(e) => {
                warn!("Cannot read {}: {}", path.display(), e);
                counts.failed += 1;
            }
        }
    }
    if texts.is_empty() {
        return Ok(counts);
    }

    let records = assemble_all(&settings.assembler(), &texts);

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")?
            .progress_chars("=> "),
    );
    for ((path, _), record) in texts.iter().zip(&records) {
        match save_profile(settings, record) {
            Ok(Some(_)) => counts.saved += 1,
            Ok(None) => {
                warn!("{}: no [playerid=..] tag, not saved", path.display());
                counts.unidentified += 1;
            }
            Err(e) => {
                warn!("{}: {:#}", path.display(), e);
                counts.failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(counts)
}

/// Parses `listing_text`, merges it into `stored` and saves the result under
/// `merged_dir`. Returns the written path.
pub fn merge_listing(
    settings: &Settings,
    stored: Map<String, Value>,
    listing_text: &str,
    today: NaiveDate,
) -> Result<PathBuf> {
    let listing = settings.listing_parser().parse(listing_text).map_err(|e| {
        debug!(stage = %e.stage(), "listing rejected");
        anyhow::Error::new(e).context("listing rejected")
    })?;

    let now = settings.calendar.coordinate(today);
    let weeks_old = settings
        .calendar
        .weeks_between(i64::from(listing.season), listing.season_week, now);
    debug!(season = listing.season, week = listing.season_week, weeks_old, "listing parsed");
    if weeks_old < 0 {
        warn!(
            "listing is dated season {} week {}, after today ({})",
            listing.season, listing.season_week, now
        );
    }

    let merged = merge::merge(stored, &listing)?;
    let path = store::save(&settings.merged_dir, &merged.file_key, &merged)?;
    info!(key = %merged.file_key, path = %path.display(), "merged record saved");
    Ok(path)
}

/// Merges the listing pasted for one player into their stored profile.
pub fn merge_player(
    settings: &Settings,
    player_id: u64,
    listing_text: &str,
    today: NaiveDate,
) -> Result<PathBuf> {
    let path = settings.profiles_dir.join(format!("{}.json", player_id));
    let stored = store::load_object(&path)?;
    merge_listing(settings, stored, listing_text, today)
        .with_context(|| format!("merging player {}", player_id))
}

/// Merges every stored profile that has a `<listings_dir>/<PlayerID>.txt`.
pub fn merge_all(settings: &Settings, today: NaiveDate) -> Result<MergeCounts> {
    let mut counts = MergeCounts::default();
    for path in store::list_files(&settings.profiles_dir, "json")? {
        let stored = match store::load_object(&path) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("{:#}", e);
                counts.failed += 1;
                continue;
            }
        };
        let id = match merge::player_id(&stored) {
            Ok(id) => id,
            Err(MergeError::MissingPlayerId) => {
                warn!("{}: no usable PlayerID, skipped", path.display());
                counts.no_player_id += 1;
                continue;
            }
            Err(e) => {
                warn!("{}: {}", path.display(), e);
                counts.failed += 1;
                continue;
            }
        };

        let listing_path = settings.listings_dir.join(format!("{}.txt", id));
        if !listing_path.is_file() {
            debug!(player_id = %id, "no listing text");
            counts.no_listing += 1;
            continue;
        }

        let result = std::fs::read_to_string(&listing_path)
            .with_context(|| format!("reading {}", listing_path.display()))
            .and_then(|text| merge_listing(settings, stored, &text, today));
        match result {
            Ok(_) => counts.merged += 1,
            Err(e) => {
                warn!("player {}: {:#}", id, e);
                counts.failed += 1;
            }
        }
    }
    Ok(counts)
}
